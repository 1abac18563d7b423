//! Issue extraction from NDepend violation reports.
//!
//! The report nests code elements ("scopes", any element with a `Name`
//! attribute) arbitrarily deep. A `RuleViolated` element carries only the rule
//! key; its location comes from the nearest enclosing scope.

mod parser;

use serde::Serialize;

pub use parser::ReportParser;

/// One rule violation at a source location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub rule_key: String,
    pub file_path: String,
    pub line: u32,
}

/// Receives issues as the report walker finds them, in document order.
pub trait IssueSink {
    fn on_issue(&mut self, rule_key: &str, file_path: &str, line: u32);
}

impl IssueSink for Vec<Issue> {
    fn on_issue(&mut self, rule_key: &str, file_path: &str, line: u32) {
        self.push(Issue {
            rule_key: rule_key.to_string(),
            file_path: file_path.to_string(),
            line,
        });
    }
}

impl<S: IssueSink + ?Sized> IssueSink for &mut S {
    fn on_issue(&mut self, rule_key: &str, file_path: &str, line: u32) {
        (**self).on_issue(rule_key, file_path, line);
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
