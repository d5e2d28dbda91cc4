use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;

use crate::fixture::FixturePaths;

pub const USAGE: &str = "\
Check the portfolio page against its structure and style rules

USAGE:
    folio [OPTIONS]

OPTIONS:
    --root DIR           Directory holding the page files [default: .]
    --markup FILE        Markup file relative to the root [default: index.html]
    --stylesheet FILE    Stylesheet relative to the root [default: withey.css]
    --filter TEXT        Only run checks whose group or name contains TEXT
    -t, --trace          Log progress to stderr (filtered by RUST_LOG)
    -h, --help           Print this message
";

#[derive(Debug, Error)]
pub enum ArgsError {
    #[error(transparent)]
    Parse(#[from] pico_args::Error),
    #[error("unexpected arguments: {0:?}")]
    Unexpected(Vec<OsString>),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub paths: FixturePaths,
    pub filter: Option<String>,
    pub trace: bool,
    pub help: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ArgsError> {
        Self::from_args(pico_args::Arguments::from_env())
    }

    pub fn from_vec(args: Vec<OsString>) -> Result<Self, ArgsError> {
        Self::from_args(pico_args::Arguments::from_vec(args))
    }

    fn from_args(mut pargs: pico_args::Arguments) -> Result<Self, ArgsError> {
        let help = pargs.contains(["-h", "--help"]);
        let trace = pargs.contains(["-t", "--trace"]);
        let mut paths = FixturePaths::default();
        if let Some(root) = pargs.opt_value_from_str::<_, PathBuf>("--root")? {
            paths.root = root;
        }
        if let Some(markup) = pargs.opt_value_from_str::<_, PathBuf>("--markup")? {
            paths.markup = markup;
        }
        if let Some(stylesheet) = pargs.opt_value_from_str::<_, PathBuf>("--stylesheet")? {
            paths.stylesheet = stylesheet;
        }
        let filter = pargs.opt_value_from_str("--filter")?;
        let rest = pargs.finish();
        if !rest.is_empty() {
            return Err(ArgsError::Unexpected(rest));
        }
        Ok(Self {
            paths,
            filter,
            trace,
            help,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vec(vec![]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.paths.markup_path(), PathBuf::from("./index.html"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_vec(args(&[
            "--root",
            "site",
            "--stylesheet",
            "main.css",
            "--filter",
            "links",
            "-t",
        ]))
        .unwrap();
        assert_eq!(config.paths.root, PathBuf::from("site"));
        assert_eq!(config.paths.markup, PathBuf::from("index.html"));
        assert_eq!(config.paths.stylesheet_path(), PathBuf::from("site/main.css"));
        assert_eq!(config.filter.as_deref(), Some("links"));
        assert!(config.trace);
        assert!(!config.help);
    }

    #[test]
    fn test_rejects_unknown_arguments() {
        assert!(matches!(
            Config::from_vec(args(&["--bogus"])),
            Err(ArgsError::Unexpected(_))
        ));
        assert!(matches!(
            Config::from_vec(args(&["--root"])),
            Err(ArgsError::Parse(_))
        ));
    }
}
