use serde::Serialize;

use crate::error::Result;
use crate::rules::{RuleRecord, RulesRepository};
use crate::sensor::Finding;

use super::{OutputFormatter, RuleListFormatter, distinct_files};

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: Summary,
    findings: &'a [Finding],
}

#[derive(Serialize)]
struct Summary {
    total_findings: usize,
    files: usize,
}

#[derive(Serialize)]
struct RuleListing<'a> {
    repository: RepositoryInfo<'a>,
    rules: Vec<&'a RuleRecord>,
}

#[derive(Serialize)]
struct RepositoryInfo<'a> {
    key: &'a str,
    name: &'a str,
    language: &'a str,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, findings: &[Finding]) -> Result<String> {
        let output = JsonOutput {
            summary: Summary {
                total_findings: findings.len(),
                files: distinct_files(findings),
            },
            findings,
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

impl RuleListFormatter for JsonFormatter {
    fn format_rules(&self, repository: &RulesRepository) -> Result<String> {
        let listing = RuleListing {
            repository: RepositoryInfo {
                key: repository.key(),
                name: repository.name(),
                language: repository.language(),
            },
            rules: repository.rules().collect(),
        };

        Ok(serde_json::to_string_pretty(&listing)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
