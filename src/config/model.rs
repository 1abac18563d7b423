use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default execution timeout for the rule runner, in minutes.
pub const DEFAULT_TIMEOUT_MINUTES: u64 = 10;

pub const RULES_PROPERTY_KEY: &str = "rules";
pub const RULES_PATH_PROPERTY_KEY: &str = "rules_path";
pub const RULE_RUNNER_PATH_PROPERTY_KEY: &str = "rule_runner_path";
pub const PROJECT_PATH_PROPERTY_KEY: &str = "project_path";
pub const TIMEOUT_PROPERTY_KEY: &str = "timeout_minutes";

/// Contents of `.ndepend-bridge.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Rule catalog XML, as produced by the NDepend rule set builder.
    #[serde(default)]
    pub rules: Option<String>,

    /// File holding the rule catalog XML. Ignored when `rules` is set.
    #[serde(default)]
    pub rules_path: Option<PathBuf>,

    /// Absolute path to the NDepend rule runner executable.
    #[serde(default)]
    pub rule_runner_path: Option<String>,

    /// Absolute path to the NDepend project file.
    #[serde(default)]
    pub project_path: Option<String>,

    /// Minutes after which the rule runner is killed.
    #[serde(default = "default_timeout_minutes")]
    pub timeout_minutes: u64,

    /// Directory receiving the violation report.
    #[serde(default = "default_work_dir")]
    pub work_dir: PathBuf,

    /// Language key of the files NDepend analyzes.
    #[serde(default = "default_language")]
    pub language: String,

    /// Rule keys excluded from the quality profile.
    #[serde(default)]
    pub disabled_rules: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rules: None,
            rules_path: None,
            rule_runner_path: None,
            project_path: None,
            timeout_minutes: default_timeout_minutes(),
            work_dir: default_work_dir(),
            language: default_language(),
            disabled_rules: Vec::new(),
        }
    }
}

const fn default_timeout_minutes() -> u64 {
    DEFAULT_TIMEOUT_MINUTES
}

fn default_work_dir() -> PathBuf {
    PathBuf::from(".ndepend-bridge")
}

fn default_language() -> String {
    crate::LANGUAGE_KEY.to_string()
}
