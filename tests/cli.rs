use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn folio() -> Command {
    Command::cargo_bin("folio").unwrap()
}

#[test]
fn passes_on_the_site() {
    folio()
        .args(["--root", env!("CARGO_MANIFEST_DIR")])
        .assert()
        .success()
        .stdout(predicate::str::contains("33 passed, 0 failed"))
        .stdout(predicate::str::contains("FAIL").not());
}

#[test]
fn filter_limits_the_checks_run() {
    folio()
        .args(["--root", env!("CARGO_MANIFEST_DIR"), "--filter", "header animation"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Header animation"))
        .stdout(predicate::str::contains("Links").not())
        .stdout(predicate::str::contains("4 passed, 0 failed"));
}

#[test]
fn filter_matching_nothing_is_an_error() {
    folio()
        .args(["--root", env!("CARGO_MANIFEST_DIR"), "--filter", "no such check"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no checks match the filter"));
}

#[test]
fn failing_page_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("index.html"),
        r#"<a href="http://example.com" target="_blank">x</a>"#,
    )
    .unwrap();
    fs::write(dir.path().join("withey.css"), "").unwrap();

    folio()
        .arg("--root")
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FAIL all external links use HTTPS"))
        .stdout(predicate::str::contains("PASS external links open in a new tab"));
}

#[test]
fn custom_file_names() {
    let dir = tempfile::tempdir().unwrap();
    fs::copy(
        concat!(env!("CARGO_MANIFEST_DIR"), "/index.html"),
        dir.path().join("page.html"),
    )
    .unwrap();
    fs::copy(
        concat!(env!("CARGO_MANIFEST_DIR"), "/withey.css"),
        dir.path().join("site.css"),
    )
    .unwrap();

    folio()
        .arg("--root")
        .arg(dir.path())
        .args(["--markup", "page.html", "--stylesheet", "site.css"])
        .assert()
        .success();
}

#[test]
fn missing_fixture_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    folio()
        .arg("--root")
        .arg(dir.path())
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("could not read fixture"));
}

#[test]
fn unknown_argument_prints_usage() {
    folio()
        .arg("--verbose")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unexpected arguments"))
        .stderr(predicate::str::contains("USAGE:"));
}

#[test]
fn help() {
    folio()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--stylesheet FILE"));
}
