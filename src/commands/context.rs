use std::fs;
use std::path::Path;

use crate::cli::ColorChoice;
use crate::config::{ConfigLoader, FileConfigLoader, FileSystem, NdependSettings};
use crate::error::{NdependError, Result};
use crate::output::{
    ColorMode, JsonFormatter, OutputFormat, OutputFormatter, RuleListFormatter, SarifFormatter,
    TextFormatter,
};
use crate::rules::{RuleRecords, RulesRepository};
use crate::sensor::Finding;
use crate::{EXIT_ISSUES_FOUND, EXIT_SUCCESS};

#[must_use]
pub const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

/// Loads the configuration from `config_path`, or from the default search
/// locations when it is `None`.
///
/// # Errors
/// Returns an error if the configuration file cannot be read or parsed.
pub fn load_settings(config_path: Option<&Path>) -> Result<NdependSettings> {
    let loader = FileConfigLoader::new();
    let loaded = config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))?;
    Ok(NdependSettings::new(loaded))
}

/// Loads the rule catalog from `rules_file`, falling back to the configured
/// rules. Unlike [`crate::rules::define_rules`], a broken catalog is an error.
///
/// # Errors
/// Returns an error if the catalog cannot be read or is malformed.
pub fn load_rules<F: FileSystem>(
    rules_file: Option<&Path>,
    settings: &NdependSettings<F>,
) -> Result<RulesRepository> {
    let (xml, origin) = match rules_file {
        Some(path) => {
            let xml = fs::read_to_string(path).map_err(|source| NdependError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
            (xml, Some(path.to_path_buf()))
        }
        None => (settings.rules()?, settings.rules_origin()),
    };

    let mut repository = RulesRepository::ndepend();
    if xml.is_empty() {
        tracing::warn!("No NDepend rules defined.");
        return Ok(repository);
    }

    let records = match origin {
        Some(origin) => RuleRecords::with_origin(&xml, origin),
        None => RuleRecords::new(&xml),
    };
    records.commit_to(&mut repository)?;
    Ok(repository)
}

/// Renders findings; SARIF output describes every rule in `repository`.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn format_findings(
    format: OutputFormat,
    findings: &[Finding],
    repository: &RulesRepository,
    color_mode: ColorMode,
) -> Result<String> {
    match format {
        OutputFormat::Text => TextFormatter::new(color_mode).format(findings),
        OutputFormat::Json => JsonFormatter.format(findings),
        OutputFormat::Sarif => SarifFormatter::new()
            .with_rules(repository)
            .format(findings),
    }
}

/// # Errors
/// Returns an error if serialization fails.
pub fn format_rule_list(
    format: OutputFormat,
    repository: &RulesRepository,
    color_mode: ColorMode,
) -> Result<String> {
    match format {
        OutputFormat::Text => TextFormatter::new(color_mode).format_rules(repository),
        OutputFormat::Json => JsonFormatter.format_rules(repository),
        OutputFormat::Sarif => SarifFormatter::new().format_rules(repository),
    }
}

/// Write output to a file or stdout.
///
/// The `quiet` flag only affects stdout output; file writes always proceed.
pub(crate) fn write_output(
    output_path: Option<&Path>,
    content: &str,
    quiet: bool,
) -> Result<()> {
    if let Some(path) = output_path {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}

pub(crate) const fn findings_exit_code(findings: &[Finding], strict: bool) -> i32 {
    if strict && !findings.is_empty() {
        EXIT_ISSUES_FOUND
    } else {
        EXIT_SUCCESS
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
