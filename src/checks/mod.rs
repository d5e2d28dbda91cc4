use html::DOMElement;
use std::fmt;

use crate::page::Page;

/// Link policies over every anchor on the page
pub mod links;
/// Content and structure of the header and sections
pub mod structure;
/// Breakpoints, grid and header animation declared in the stylesheet
pub mod style;

/// Why a check failed, as the condition that should hold and what was found instead
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub expected: String,
    pub observed: String,
}

impl Violation {
    pub fn new(expected: impl Into<String>, observed: impl Into<String>) -> Self {
        Self {
            expected: expected.into(),
            observed: observed.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected {}, observed {}", self.expected, self.observed)
    }
}

pub type CheckResult = Result<(), Violation>;

/// A named predicate over the page. Checks never depend on one another.
#[derive(Debug, Clone, Copy)]
pub struct Check {
    pub group: &'static str,
    pub name: &'static str,
    pub run: fn(&Page) -> CheckResult,
}

/// Every check, grouped and in a stable order
pub fn all() -> Vec<Check> {
    links::CHECKS
        .iter()
        .chain(structure::CHECKS)
        .chain(style::CHECKS)
        .copied()
        .collect()
}

fn ensure(condition: bool, expected: &str, observed: impl FnOnce() -> String) -> CheckResult {
    if condition {
        Ok(())
    } else {
        Err(Violation::new(expected, observed()))
    }
}

/// Fail with every offender listed, or pass if there are none
fn none_of(expected: &str, offenders: Vec<String>) -> CheckResult {
    ensure(offenders.is_empty(), expected, || offenders.join(", "))
}

fn select<'a>(page: &'a Page, selector: &str) -> Result<Vec<&'a DOMElement>, Violation> {
    page.document()
        .query_selector_all(selector)
        .map_err(|e| Violation::new(format!("a valid selector `{}`", selector), e.to_string()))
}

fn select_one<'a>(page: &'a Page, selector: &str) -> Result<&'a DOMElement, Violation> {
    select(page, selector)?
        .into_iter()
        .next()
        .ok_or_else(|| Violation::new(format!("an element matching `{}`", selector), "none"))
}

/// Short markup-like rendering of an element for failure messages
fn describe(elt: &DOMElement, attributes: &[&str]) -> String {
    let mut out = format!("<{}", elt.name);
    for name in attributes {
        if let Some(value) = elt.get_attribute(name) {
            out.push_str(&format!(" {}=\"{}\"", name, value));
        }
    }
    out.push('>');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_check_names_are_unique() {
        let checks = all();
        let names: HashSet<(&str, &str)> = checks.iter().map(|c| (c.group, c.name)).collect();
        assert_eq!(names.len(), checks.len());
        assert_eq!(checks.len(), 33);
    }

    #[test]
    fn test_select_one() {
        let page = Page::from_sources("<main><p id=a></p><p id=b></p></main>", "");
        assert_eq!(select_one(&page, "main p").unwrap().id(), Some("a"));
        assert_eq!(
            select_one(&page, "header"),
            Err(Violation::new("an element matching `header`", "none"))
        );
        assert!(select(&page, "p >").is_err());
    }

    #[test]
    fn test_describe() {
        let page = Page::from_sources(r#"<a href="/x" class="card" data-x=1>x</a>"#, "");
        let a = select_one(&page, "a").unwrap();
        assert_eq!(describe(a, &["href", "target", "class"]), r#"<a href="/x" class="card">"#);
    }
}
