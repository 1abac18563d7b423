mod analyze;
mod context;
mod init;
mod report;
mod rules;

pub use analyze::{analyze_project, run_analyze, run_analyze_impl};
pub use context::{color_choice_to_mode, format_findings, format_rule_list, load_rules, load_settings};
pub use init::{generate_config_template, run_init, run_init_impl};
pub use report::{run_report, run_report_impl};
pub use rules::{run_rules, run_rules_impl};
