use crate::cli::{Cli, ReportArgs};
use crate::sensor::{PassThroughIndex, ProjectFileIndex, QualityProfile, Sensor};
use crate::{EXIT_ERROR, Result};

use super::context::{
    color_choice_to_mode, findings_exit_code, format_findings, load_rules, load_settings,
    write_output,
};

#[must_use]
pub fn run_report(args: &ReportArgs, cli: &Cli) -> i32 {
    match run_report_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            tracing::debug!(kind = e.error_type(), "command failed");
            eprintln!("Error: {e}");
            EXIT_ERROR
        }
    }
}

/// Extracts findings from an existing violation report.
///
/// Without a rule catalog every rule counts as active. Without
/// `--project-dir` every file counts as part of the project.
///
/// # Errors
/// Returns an error if the configuration, catalog or report cannot be read.
pub fn run_report_impl(args: &ReportArgs, cli: &Cli) -> Result<i32> {
    let settings = load_settings(cli.config.as_deref())?;
    let repository = load_rules(args.rules_file.as_deref(), &settings)?;

    let profile = if repository.is_empty() {
        QualityProfile::accept_all()
    } else {
        QualityProfile::from_repository(&repository, &settings.config().disabled_rules)
    };

    let language = settings.language();
    let findings = match &args.project_dir {
        Some(dir) => {
            let index = ProjectFileIndex::scan(dir);
            Sensor::new(&profile, &index, language).import_report(&args.report)?
        }
        None => Sensor::new(&profile, &PassThroughIndex, language).import_report(&args.report)?,
    };

    let output = format_findings(
        args.format,
        &findings,
        &repository,
        color_choice_to_mode(cli.color),
    )?;
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    Ok(findings_exit_code(&findings, args.strict))
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
