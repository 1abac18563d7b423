use std::fmt::Write;

use crate::error::Result;
use crate::rules::RulesRepository;
use crate::sensor::Finding;

use super::{OutputFormatter, RuleListFormatter, distinct_files};

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const RESET: &str = "\x1b[0m";
}

pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                // Respect NO_COLOR environment variable
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn colorize(&self, text: &str, severity: Option<&str>) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        let color = match severity {
            Some("BLOCKER" | "CRITICAL") => ansi::RED,
            Some("MAJOR") | None => ansi::YELLOW,
            Some(_) => ansi::CYAN,
        };
        format!("{color}{text}{}", ansi::RESET)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, findings: &[Finding]) -> Result<String> {
        let mut output = String::new();

        for finding in findings {
            let severity = finding.severity.as_deref();
            let label = self.colorize(severity.unwrap_or("ISSUE"), severity);
            writeln!(
                output,
                "{}:{}: {label} {}: {}",
                finding.path, finding.line, finding.rule_key, finding.message
            )
            .ok();
        }

        if findings.is_empty() {
            writeln!(output, "No NDepend findings.").ok();
        } else {
            writeln!(output).ok();
            writeln!(
                output,
                "Summary: {} finding(s) in {} file(s)",
                findings.len(),
                distinct_files(findings)
            )
            .ok();
        }

        Ok(output)
    }
}

impl RuleListFormatter for TextFormatter {
    fn format_rules(&self, repository: &RulesRepository) -> Result<String> {
        let mut output = String::new();

        for rule in repository.rules() {
            let severity = self.colorize(&rule.severity, Some(&rule.severity));
            write!(output, "{} [{severity}] {}", rule.key, rule.name).ok();
            if !rule.tags.is_empty() {
                write!(output, " ({})", rule.tags.join(", ")).ok();
            }
            writeln!(output).ok();
        }

        writeln!(
            output,
            "{} rule(s) in repository {} ({}, {})",
            repository.len(),
            repository.key(),
            repository.name(),
            repository.language()
        )
        .ok();

        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
