pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod report;
pub mod rules;
pub mod sensor;
pub mod xml;

pub use error::{NdependError, ParseError, ParseErrorKind, Result, XmlError};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ISSUES_FOUND: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Key of the rule repository NDepend rules are registered under.
pub const REPOSITORY_KEY: &str = "ndepend";
/// Language the NDepend repository targets.
pub const LANGUAGE_KEY: &str = "cs";
pub const REPOSITORY_NAME: &str = "NDepend";

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
