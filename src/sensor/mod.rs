//! Turns an NDepend run into findings on the host project's files.

mod executor;
mod file_index;
mod profile;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Serialize;

use crate::config::{FileSystem, NdependSettings};
use crate::error::{NdependError, Result};
use crate::report::{IssueSink, ReportParser};

pub use executor::{Executor, ProcessExecutor};
pub use file_index::{FileIndex, IndexedFile, PassThroughIndex, ProjectFileIndex, language_for_path};
pub use profile::{ActiveRule, QualityProfile};

/// Name of the violation report inside the work directory.
pub const REPORT_FILE_NAME: &str = "ndepend-report.xml";

/// A user-visible finding: an active rule violated on an indexed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub rule_key: String,
    /// Rule name, shown as the finding's message.
    pub message: String,
    pub severity: Option<String>,
    pub path: String,
    pub line: u32,
}

/// Everything needed to run the rule runner once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisPlan {
    pub rule_runner: PathBuf,
    pub project: PathBuf,
    pub work_dir: PathBuf,
    pub timeout: Duration,
}

impl AnalysisPlan {
    /// # Errors
    /// Returns an error if the runner or project path is missing or invalid.
    pub fn from_settings<F: FileSystem>(settings: &NdependSettings<F>) -> Result<Self> {
        Ok(Self {
            rule_runner: settings.rule_runner_path()?,
            project: settings.project_path()?,
            work_dir: settings.work_dir(),
            timeout: Duration::from_secs(settings.timeout_minutes().saturating_mul(60)),
        })
    }

    #[must_use]
    pub fn report_path(&self) -> PathBuf {
        self.work_dir.join(REPORT_FILE_NAME)
    }
}

/// Decides whether NDepend should run and maps its report onto findings.
pub struct Sensor<'a, I: FileIndex> {
    profile: &'a QualityProfile,
    index: &'a I,
    language: &'a str,
}

impl<'a, I: FileIndex> Sensor<'a, I> {
    pub const fn new(profile: &'a QualityProfile, index: &'a I, language: &'a str) -> Self {
        Self {
            profile,
            index,
            language,
        }
    }

    /// False when there is nothing to analyze or every rule is disabled.
    #[must_use]
    pub fn should_execute(&self) -> bool {
        if !self.index.has_files(self.language) {
            tracing::info!("No {} files to analyze, skipping NDepend.", self.language);
            return false;
        }
        if self.profile.is_empty() {
            tracing::info!("All NDepend rules are disabled, skipping its execution.");
            return false;
        }
        true
    }

    /// Runs the rule runner and imports the report it writes.
    ///
    /// # Errors
    /// Returns an error if the work directory cannot be created, the runner
    /// fails, or the report is malformed.
    pub fn analyze(&self, plan: &AnalysisPlan, executor: &impl Executor) -> Result<Vec<Finding>> {
        fs::create_dir_all(&plan.work_dir).map_err(|source| NdependError::FileRead {
            path: plan.work_dir.clone(),
            source,
        })?;

        let report = plan.report_path();
        executor.execute(&plan.rule_runner, &plan.project, &report, plan.timeout)?;
        self.import_report(&report)
    }

    /// Maps an existing report onto findings.
    ///
    /// # Errors
    /// Returns an error if the report cannot be read or is malformed.
    pub fn import_report(&self, report: &Path) -> Result<Vec<Finding>> {
        let mut collector = FindingCollector {
            profile: self.profile,
            index: self.index,
            findings: Vec::new(),
        };
        ReportParser::new(&mut collector).parse(report)?;

        tracing::info!("{} NDepend finding(s)", collector.findings.len());
        Ok(collector.findings)
    }
}

struct FindingCollector<'a, I> {
    profile: &'a QualityProfile,
    index: &'a I,
    findings: Vec<Finding>,
}

impl<I: FileIndex> IssueSink for FindingCollector<'_, I> {
    fn on_issue(&mut self, rule_key: &str, file_path: &str, line: u32) {
        let Some(rule) = self.profile.active_rule(rule_key) else {
            log_skipped_issue(
                "the rule is disabled in the current quality profile",
                rule_key,
                file_path,
                line,
            );
            return;
        };

        let Some(file) = self.index.main_file(file_path) else {
            log_skipped_issue(
                "the file is not part of the indexed project",
                rule_key,
                file_path,
                line,
            );
            return;
        };

        self.findings.push(Finding {
            rule_key: rule.key.to_string(),
            message: rule.name.to_string(),
            severity: rule.severity.map(String::from),
            path: file.relative_path,
            line,
        });
    }
}

fn log_skipped_issue(reason: &str, rule_key: &str, file: &str, line: u32) {
    tracing::debug!(
        "Skipping NDepend issue on file {file} at line {line} on rule {rule_key} because {reason}"
    );
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
