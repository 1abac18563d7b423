use std::fs;

use crate::{EXIT_ERROR, EXIT_SUCCESS, NdependError, Result};

#[must_use]
pub fn run_init(args: &crate::cli::InitArgs) -> i32 {
    match run_init_impl(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            tracing::debug!(kind = e.error_type(), "command failed");
            eprintln!("Error: {e}");
            EXIT_ERROR
        }
    }
}

/// Initializes a new configuration file.
///
/// # Errors
/// Returns an error if the file already exists (without --force) or cannot be written.
pub fn run_init_impl(args: &crate::cli::InitArgs) -> Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(NdependError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    fs::write(output_path, generate_config_template())?;

    println!("Created configuration file: {}", output_path.display());
    Ok(())
}

#[must_use]
pub fn generate_config_template() -> String {
    r#"# ndepend-bridge configuration file

# Absolute path to the NDepend rule runner executable
# rule_runner_path = "C:/Tools/NDepend/NDepend.SonarQube.RuleRunner.exe"

# Absolute path to the NDepend project to analyze
# project_path = "C:/Projects/MyApp/MyApp.ndproj"

# Rule catalog, either inline XML or a file relative to this one
# rules = "<ArrayOfRule>...</ArrayOfRule>"
# rules_path = "ndepend-rules.xml"

# Minutes after which the rule runner is killed (default: 10)
timeout_minutes = 10

# Directory receiving the violation report (default: .ndepend-bridge)
work_dir = ".ndepend-bridge"

# Language key of the analyzed files (default: cs)
language = "cs"

# Rule keys whose violations are never reported
# disabled_rules = ["AvoidNamespacesWithFewTypes"]
"#
    .to_string()
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
