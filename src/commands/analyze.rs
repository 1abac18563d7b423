use crate::cli::{AnalyzeArgs, Cli};
use crate::config::NdependSettings;
use crate::rules::{RulesRepository, define_rules};
use crate::sensor::{
    AnalysisPlan, Executor, Finding, ProcessExecutor, ProjectFileIndex, QualityProfile, Sensor,
};
use crate::{EXIT_ERROR, Result};

use super::context::{
    color_choice_to_mode, findings_exit_code, format_findings, load_settings, write_output,
};

#[must_use]
pub fn run_analyze(args: &AnalyzeArgs, cli: &Cli) -> i32 {
    match run_analyze_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            tracing::debug!(kind = e.error_type(), "command failed");
            eprintln!("Error: {e}");
            EXIT_ERROR
        }
    }
}

/// Runs NDepend on the configured project and prints its findings.
///
/// # Errors
/// Returns an error if the configuration is invalid, the rule runner fails,
/// or its report cannot be read.
pub fn run_analyze_impl(args: &AnalyzeArgs, cli: &Cli) -> Result<i32> {
    let settings = load_settings(cli.config.as_deref())?;
    let (repository, findings) = analyze_project(args, &settings, &ProcessExecutor::new())?;

    let output = format_findings(
        args.format,
        &findings,
        &repository,
        color_choice_to_mode(cli.color),
    )?;
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    Ok(findings_exit_code(&findings, args.strict))
}

/// Full sensor run: defines the rules, indexes the project and, unless there
/// is nothing to do, runs `executor` and imports its report.
///
/// # Errors
/// Returns an error if the settings are invalid or the execution fails.
pub fn analyze_project(
    args: &AnalyzeArgs,
    settings: &NdependSettings,
    executor: &impl Executor,
) -> Result<(RulesRepository, Vec<Finding>)> {
    let repository = define_rules(&settings.rules()?);
    let profile = QualityProfile::from_repository(&repository, &settings.config().disabled_rules);
    let index = ProjectFileIndex::scan(&args.project_dir);
    let sensor = Sensor::new(&profile, &index, settings.language());

    if !sensor.should_execute() {
        return Ok((repository, Vec::new()));
    }

    let plan = AnalysisPlan::from_settings(settings)?;
    let findings = sensor.analyze(&plan, executor)?;
    Ok((repository, findings))
}

#[cfg(test)]
#[path = "analyze_tests.rs"]
mod tests;
