use std::fmt;
use tracing::{debug, info, span, Level};

use crate::checks::{self, Check, Violation};
use crate::page::Page;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail(Violation),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub group: &'static str,
    pub name: &'static str,
    pub outcome: Outcome,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Pass
    }
}

/// A list of checks to run against one page
#[derive(Debug, Clone)]
pub struct Suite {
    checks: Vec<Check>,
}

impl Suite {
    pub fn new(checks: Vec<Check>) -> Self {
        Self { checks }
    }

    /// Every registered check
    pub fn all() -> Self {
        Self::new(checks::all())
    }

    /// Keep only checks whose group or name contains `filter`, ignoring case
    pub fn filtered(self, filter: &str) -> Self {
        let filter = filter.to_lowercase();
        Self::new(
            self.checks
                .into_iter()
                .filter(|c| {
                    c.group.to_lowercase().contains(&filter)
                        || c.name.to_lowercase().contains(&filter)
                })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.checks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }

    /// Run every check in order. A failing check never stops the ones after it.
    pub fn run(&self, page: &Page) -> Report {
        let span = span!(Level::DEBUG, "Running checks", count = self.checks.len());
        let _enter = span.enter();
        let outcomes: Vec<CheckOutcome> = self
            .checks
            .iter()
            .map(|check| {
                let outcome = match (check.run)(page) {
                    Ok(()) => Outcome::Pass,
                    Err(violation) => Outcome::Fail(violation),
                };
                debug!(group = check.group, name = check.name, ?outcome, "Check finished");
                CheckOutcome {
                    group: check.group,
                    name: check.name,
                    outcome,
                }
            })
            .collect();
        let report = Report { outcomes };
        info!(passed = report.passed(), failed = report.failed(), "Suite finished");
        report
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    outcomes: Vec<CheckOutcome>,
}

impl Report {
    pub fn outcomes(&self) -> &[CheckOutcome] {
        &self.outcomes
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn success(&self) -> bool {
        self.failed() == 0
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut group = None;
        for o in &self.outcomes {
            if group != Some(o.group) {
                writeln!(f, "{}", o.group)?;
                group = Some(o.group);
            }
            match &o.outcome {
                Outcome::Pass => writeln!(f, "  PASS {}", o.name)?,
                Outcome::Fail(v) => {
                    writeln!(f, "  FAIL {}", o.name)?;
                    writeln!(f, "       expected: {}", v.expected)?;
                    writeln!(f, "       observed: {}", v.observed)?;
                }
            }
        }
        writeln!(f)?;
        writeln!(f, "{} passed, {} failed", self.passed(), self.failed())
    }
}
