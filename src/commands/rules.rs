use crate::cli::{Cli, RulesArgs};
use crate::{EXIT_ERROR, EXIT_SUCCESS, Result};

use super::context::{color_choice_to_mode, format_rule_list, load_rules, load_settings, write_output};

#[must_use]
pub fn run_rules(args: &RulesArgs, cli: &Cli) -> i32 {
    match run_rules_impl(args, cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            tracing::debug!(kind = e.error_type(), "command failed");
            eprintln!("Error: {e}");
            EXIT_ERROR
        }
    }
}

/// Parses the rule catalog and prints its rules.
///
/// # Errors
/// Returns an error if the configuration or the catalog cannot be loaded.
pub fn run_rules_impl(args: &RulesArgs, cli: &Cli) -> Result<()> {
    let settings = load_settings(cli.config.as_deref())?;
    let repository = load_rules(args.rules_file.as_deref(), &settings)?;
    tracing::info!(
        "Loaded {} rule(s) into repository {}",
        repository.len(),
        repository.key()
    );

    let output = format_rule_list(args.format, &repository, color_choice_to_mode(cli.color))?;
    write_output(args.output.as_deref(), &output, cli.quiet)
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
