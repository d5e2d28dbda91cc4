use css::Stylesheet;
use html::Document;
use tracing::{span, Level};

use crate::fixture::{FixtureError, FixturePaths, Fixtures};

/// The page under test: its markup parsed into a [`Document`] and its stylesheet
/// kept as text. Built once, then only read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    document: Document,
    stylesheet: Stylesheet,
}

impl Page {
    /// Read the fixtures from disk and materialize the document
    pub fn load(paths: &FixturePaths) -> Result<Self, FixtureError> {
        Ok(Self::from_fixtures(Fixtures::load(paths)?))
    }

    pub fn from_fixtures(fixtures: Fixtures) -> Self {
        let span = span!(Level::DEBUG, "Materializing page");
        let _enter = span.enter();
        Self {
            document: html::document(&fixtures.markup),
            stylesheet: Stylesheet::new(fixtures.stylesheet),
        }
    }

    pub fn from_sources(markup: &str, stylesheet: &str) -> Self {
        Self::from_fixtures(Fixtures {
            markup: markup.to_string(),
            stylesheet: stylesheet.to_string(),
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }
}
