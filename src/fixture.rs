use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, span, Level};

pub const MARKUP_FILE: &str = "index.html";
pub const STYLESHEET_FILE: &str = "withey.css";

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("could not read fixture {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Where the page files live: a project root plus file names relative to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixturePaths {
    pub root: PathBuf,
    pub markup: PathBuf,
    pub stylesheet: PathBuf,
}

impl FixturePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            markup: MARKUP_FILE.into(),
            stylesheet: STYLESHEET_FILE.into(),
        }
    }

    pub fn markup_path(&self) -> PathBuf {
        self.root.join(&self.markup)
    }

    pub fn stylesheet_path(&self) -> PathBuf {
        self.root.join(&self.stylesheet)
    }
}

impl Default for FixturePaths {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Full text of the page markup and stylesheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixtures {
    pub markup: String,
    pub stylesheet: String,
}

impl Fixtures {
    /// Read both files. Either one missing is fatal, there is nothing to check without them.
    pub fn load(paths: &FixturePaths) -> Result<Self, FixtureError> {
        Ok(Self {
            markup: read_fixture(&paths.markup_path())?,
            stylesheet: read_fixture(&paths.stylesheet_path())?,
        })
    }
}

fn read_fixture(path: &Path) -> Result<String, FixtureError> {
    let span = span!(Level::DEBUG, "Loading fixture", path = %path.display());
    let _enter = span.enter();
    let text = std::fs::read_to_string(path).map_err(|source| FixtureError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(bytes = text.len(), "Fixture loaded");
    Ok(text)
}
