//! Verification of a static portfolio page.
//!
//! The page markup and stylesheet are loaded once into a [`page::Page`], then every
//! registered [`checks::Check`] runs against it independently and the outcomes are
//! collected into a [`report::Report`].

/// The registered checks over the page's structure and style
pub mod checks;
/// Command line configuration of the runner
pub mod config;
/// Reading of the page fixtures from disk
pub mod fixture;
/// The materialized page shared by every check
pub mod page;
/// Running checks and rendering their outcomes
pub mod report;
