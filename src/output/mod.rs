mod json;
mod sarif;
mod text;

pub use json::JsonFormatter;
pub use sarif::SarifFormatter;
pub use text::{ColorMode, TextFormatter};

use crate::error::Result;
use crate::rules::RulesRepository;
use crate::sensor::Finding;

/// Trait for formatting findings into various output formats.
pub trait OutputFormatter {
    /// Format the findings into a string.
    ///
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format(&self, findings: &[Finding]) -> Result<String>;
}

/// Trait for formatting a rule repository listing.
pub trait RuleListFormatter {
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format_rules(&self, repository: &RulesRepository) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Sarif,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "sarif" => Ok(Self::Sarif),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

/// Number of distinct files the findings touch.
fn distinct_files(findings: &[Finding]) -> usize {
    let mut paths: Vec<&str> = findings.iter().map(|f| f.path.as_str()).collect();
    paths.sort_unstable();
    paths.dedup();
    paths.len()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
