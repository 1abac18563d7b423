use serde::Serialize;

use crate::error::Result;
use crate::rules::{RuleRecord, RulesRepository};
use crate::sensor::Finding;

use super::{OutputFormatter, RuleListFormatter};

/// SARIF 2.1.0 output formatter for GitHub Code Scanning and other CI/CD tools.
///
/// Every catalog rule becomes a `reportingDescriptor`; findings refer to
/// them by index.
#[derive(Debug, Default)]
pub struct SarifFormatter {
    rules: Vec<RuleRecord>,
}

impl SarifFormatter {
    #[must_use]
    pub const fn new() -> Self {
        Self { rules: Vec::new() }
    }

    #[must_use]
    pub fn with_rules(mut self, repository: &RulesRepository) -> Self {
        self.rules = repository.rules().cloned().collect();
        self
    }
}

const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const SARIF_VERSION: &str = "2.1.0";
const TOOL_NAME: &str = "ndepend-bridge";
const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");
const TOOL_INFO_URI: &str = "https://www.ndepend.com/docs/rules";

#[derive(Serialize)]
struct SarifLog<'a> {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<Run<'a>>,
}

#[derive(Serialize)]
struct Run<'a> {
    tool: Tool<'a>,
    results: Vec<SarifResult<'a>>,
}

#[derive(Serialize)]
struct Tool<'a> {
    driver: ToolDriver<'a>,
}

#[derive(Serialize)]
struct ToolDriver<'a> {
    name: &'static str,
    version: &'static str,
    #[serde(rename = "informationUri")]
    information_uri: &'static str,
    rules: Vec<ReportingDescriptor<'a>>,
}

#[derive(Serialize)]
struct ReportingDescriptor<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(rename = "shortDescription")]
    short_description: MultiformatMessageString<'a>,
    #[serde(rename = "fullDescription")]
    full_description: MultiformatMessageString<'a>,
    #[serde(rename = "defaultConfiguration")]
    default_configuration: ReportingConfiguration,
    properties: DescriptorProperties<'a>,
}

#[derive(Serialize)]
struct ReportingConfiguration {
    level: &'static str,
}

#[derive(Serialize)]
struct MultiformatMessageString<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct DescriptorProperties<'a> {
    tags: &'a [String],
    severity: &'a str,
}

#[derive(Serialize)]
struct SarifResult<'a> {
    #[serde(rename = "ruleId")]
    rule_id: &'a str,
    #[serde(rename = "ruleIndex", skip_serializing_if = "Option::is_none")]
    rule_index: Option<usize>,
    level: &'static str,
    message: Message<'a>,
    locations: Vec<Location>,
}

#[derive(Serialize)]
struct Message<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Location {
    #[serde(rename = "physicalLocation")]
    physical_location: PhysicalLocation,
}

#[derive(Serialize)]
struct PhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: ArtifactLocation,
    region: Region,
}

#[derive(Serialize)]
struct ArtifactLocation {
    uri: String,
    #[serde(rename = "uriBaseId")]
    uri_base_id: &'static str,
}

#[derive(Serialize)]
struct Region {
    #[serde(rename = "startLine")]
    start_line: u32,
}

/// SARIF level for an NDepend priority. Unknown priorities are warnings.
fn level_for(severity: Option<&str>) -> &'static str {
    match severity.map(str::to_ascii_uppercase).as_deref() {
        Some("BLOCKER" | "CRITICAL") => "error",
        Some("MINOR" | "INFO") => "note",
        _ => "warning",
    }
}

impl SarifFormatter {
    fn build_rules(&self) -> Vec<ReportingDescriptor<'_>> {
        self.rules
            .iter()
            .map(|rule| ReportingDescriptor {
                id: &rule.key,
                name: &rule.name,
                short_description: MultiformatMessageString { text: &rule.name },
                full_description: MultiformatMessageString {
                    text: &rule.html_description,
                },
                default_configuration: ReportingConfiguration {
                    level: level_for(Some(&rule.severity)),
                },
                properties: DescriptorProperties {
                    tags: &rule.tags,
                    severity: &rule.severity,
                },
            })
            .collect()
    }

    fn convert_finding<'a>(&self, finding: &'a Finding) -> SarifResult<'a> {
        let rule_index = self.rules.iter().position(|r| r.key == finding.rule_key);

        SarifResult {
            rule_id: &finding.rule_key,
            rule_index,
            level: level_for(finding.severity.as_deref()),
            message: Message {
                text: &finding.message,
            },
            locations: vec![Location {
                physical_location: PhysicalLocation {
                    artifact_location: ArtifactLocation {
                        uri: finding.path.replace('\\', "/"),
                        uri_base_id: "%SRCROOT%",
                    },
                    region: Region {
                        start_line: finding.line,
                    },
                },
            }],
        }
    }

    fn render(&self, results: Vec<SarifResult<'_>>) -> Result<String> {
        let log = SarifLog {
            schema: SARIF_SCHEMA,
            version: SARIF_VERSION,
            runs: vec![Run {
                tool: Tool {
                    driver: ToolDriver {
                        name: TOOL_NAME,
                        version: TOOL_VERSION,
                        information_uri: TOOL_INFO_URI,
                        rules: self.build_rules(),
                    },
                },
                results,
            }],
        };

        Ok(serde_json::to_string_pretty(&log)?)
    }
}

impl OutputFormatter for SarifFormatter {
    fn format(&self, findings: &[Finding]) -> Result<String> {
        let results = findings.iter().map(|f| self.convert_finding(f)).collect();
        self.render(results)
    }
}

impl RuleListFormatter for SarifFormatter {
    /// A run with the repository's rules as descriptors and no results.
    fn format_rules(&self, repository: &RulesRepository) -> Result<String> {
        let formatter = Self::new().with_rules(repository);
        formatter.render(Vec::new())
    }
}

#[cfg(test)]
#[path = "sarif_tests.rs"]
mod tests;
