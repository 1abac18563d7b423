use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::LOCAL_CONFIG_NAME;
use crate::output::OutputFormat;

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Parser, Debug)]
#[command(name = "ndepend-bridge")]
#[command(author, version, about = "Import NDepend rules and violations into code quality tooling")]
#[command(long_about = "Parses NDepend rule catalogs and violation reports, and runs the \
    NDepend rule runner against a project.\n\n\
    Exit codes:\n  \
    0 - Success\n  \
    1 - Findings present (with --strict)\n  \
    2 - Configuration, parse or runtime error")]
pub struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a rule catalog and list its rules
    Rules(RulesArgs),

    /// Extract findings from an existing NDepend violation report
    Report(ReportArgs),

    /// Run NDepend on the configured project and report its findings
    Analyze(AnalyzeArgs),

    /// Generate a default configuration file
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct RulesArgs {
    /// Rule catalog XML file (overrides the configured rules)
    #[arg(long)]
    pub rules_file: Option<PathBuf>,

    /// Output format [possible values: text, json, sarif]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// NDepend violation report to read
    pub report: PathBuf,

    /// Rule catalog XML file (overrides the configured rules)
    #[arg(long)]
    pub rules_file: Option<PathBuf>,

    /// Only keep findings on files under this directory
    #[arg(long)]
    pub project_dir: Option<PathBuf>,

    /// Output format [possible values: text, json, sarif]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exit with code 1 when any finding is reported
    #[arg(long)]
    pub strict: bool,
}

#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Directory holding the analyzed sources
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Output format [possible values: text, json, sarif]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exit with code 1 when any finding is reported
    #[arg(long)]
    pub strict: bool,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long, default_value = LOCAL_CONFIG_NAME)]
    pub output: PathBuf,

    /// Overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
