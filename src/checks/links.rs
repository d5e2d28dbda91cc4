use html::{DOMElement, Document};
use tracing::trace;

use super::{describe, ensure, none_of, Check, CheckResult};
use crate::page::Page;

const GROUP: &str = "Links";

/// Cards intentionally left without a link yet. Matched as substrings of the
/// `class` attribute. Maintained by hand alongside the page content.
pub const PLACEHOLDER_CLASSES: &[&str] = &["headphones", "masters", "radio", "thrive-wearables"];

pub const LINKEDIN: &str = "linkedin.com";
pub const GITHUB_PROFILE: &str = "github.com/withey";
pub const INSTAGRAM: &str = "instagram.com";

pub static CHECKS: &[Check] = &[
    Check {
        group: GROUP,
        name: "every anchor has a non-empty href, or is a known placeholder",
        run: href_completeness,
    },
    Check {
        group: GROUP,
        name: "placeholder cards are exactly the known set",
        run: placeholder_closure,
    },
    Check {
        group: GROUP,
        name: "all external links use HTTPS",
        run: external_links_use_https,
    },
    Check {
        group: GROUP,
        name: "all internal anchor links (#) point to an existing element",
        run: internal_links_resolve,
    },
    Check {
        group: GROUP,
        name: "external links open in a new tab",
        run: external_links_open_new_tab,
    },
    Check {
        group: GROUP,
        name: "LinkedIn link present and points to linkedin.com",
        run: linkedin_present,
    },
    Check {
        group: GROUP,
        name: "GitHub link present and points to github.com",
        run: github_present,
    },
    Check {
        group: GROUP,
        name: "Instagram link present and points to instagram.com",
        run: instagram_present,
    },
];

/// View of an `a` element
#[derive(Debug, Clone, Copy)]
pub struct Anchor<'a> {
    element: &'a DOMElement,
}

impl<'a> Anchor<'a> {
    pub fn href(&self) -> Option<&'a str> {
        self.element.get_attribute("href")
    }

    pub fn target(&self) -> Option<&'a str> {
        self.element.get_attribute("target")
    }

    pub fn class(&self) -> &'a str {
        self.element.get_attribute("class").unwrap_or("")
    }

    pub fn is_placeholder(&self) -> bool {
        let class = self.class();
        PLACEHOLDER_CLASSES.iter().any(|p| class.contains(p))
    }

    pub fn is_external(&self) -> bool {
        self.href().map_or(false, |h| h.starts_with("http"))
    }

    /// The id named by an in-page `#id` link
    pub fn fragment(&self) -> Option<&'a str> {
        self.href().and_then(|h| h.strip_prefix('#'))
    }

    fn describe(&self) -> String {
        describe(self.element, &["href", "target", "class"])
    }
}

pub fn anchors(document: &Document) -> Vec<Anchor<'_>> {
    let anchors: Vec<Anchor> = document
        .get_elements_by_name("a")
        .into_iter()
        .map(|element| Anchor { element })
        .collect();
    trace!(count = anchors.len(), "Collected anchors");
    anchors
}

fn offenders<'a>(page: &'a Page, offends: impl Fn(&Anchor<'a>) -> bool) -> Vec<String> {
    anchors(page.document())
        .iter()
        .filter(|a| offends(a))
        .map(Anchor::describe)
        .collect()
}

fn href_completeness(page: &Page) -> CheckResult {
    none_of(
        "a non-empty href on every non-placeholder anchor",
        offenders(page, |a| {
            !a.is_placeholder() && a.href().map_or(true, str::is_empty)
        }),
    )
}

fn placeholder_closure(page: &Page) -> CheckResult {
    none_of(
        &format!("anchors without href to carry one of {:?}", PLACEHOLDER_CLASSES),
        offenders(page, |a| a.href().is_none() && !a.is_placeholder()),
    )
}

fn external_links_use_https(page: &Page) -> CheckResult {
    none_of(
        "external hrefs to start with https:",
        offenders(page, |a| {
            a.is_external() && !a.href().map_or(false, |h| h.starts_with("https:"))
        }),
    )
}

fn internal_links_resolve(page: &Page) -> CheckResult {
    let document = page.document();
    none_of(
        "every #fragment link to name an existing id",
        offenders(page, |a| match a.fragment() {
            Some("") => true,
            Some(id) => document.get_element_by_id(id).is_none(),
            None => false,
        }),
    )
}

fn external_links_open_new_tab(page: &Page) -> CheckResult {
    none_of(
        "target=\"_blank\" on every external link",
        offenders(page, |a| a.is_external() && a.target() != Some("_blank")),
    )
}

fn hrefs_containing(page: &Page, needle: &str) -> usize {
    anchors(page.document())
        .iter()
        .filter(|a| a.href().map_or(false, |h| h.contains(needle)))
        .count()
}

fn linkedin_present(page: &Page) -> CheckResult {
    let count = hrefs_containing(page, LINKEDIN);
    ensure(count == 1, "exactly one link to linkedin.com", || {
        format!("{} links", count)
    })
}

fn github_present(page: &Page) -> CheckResult {
    let count = hrefs_containing(page, GITHUB_PROFILE);
    ensure(count > 0, "a link to github.com/withey", || "none".to_string())
}

fn instagram_present(page: &Page) -> CheckResult {
    let count = hrefs_containing(page, INSTAGRAM);
    ensure(count > 0, "a link to instagram.com", || "none".to_string())
}
