use indexmap::IndexMap;

use crate::rules::{RuleRecord, RulesRepository};

/// A rule that is enabled for the current analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveRule<'a> {
    pub key: &'a str,
    pub name: &'a str,
    pub severity: Option<&'a str>,
}

/// The set of rules whose violations become findings.
#[derive(Debug, Clone, Default)]
pub struct QualityProfile {
    rules: IndexMap<String, RuleRecord>,
    accept_unknown: bool,
}

impl QualityProfile {
    /// Activates every rule in `repository` except the `disabled` keys.
    #[must_use]
    pub fn from_repository(repository: &RulesRepository, disabled: &[String]) -> Self {
        let rules = repository
            .rules()
            .filter(|rule| !disabled.contains(&rule.key))
            .map(|rule| (rule.key.clone(), rule.clone()))
            .collect();

        Self {
            rules,
            accept_unknown: false,
        }
    }

    /// Profile that accepts any rule key, naming unknown rules by their key.
    /// Used when no rule catalog is available.
    #[must_use]
    pub fn accept_all() -> Self {
        Self {
            rules: IndexMap::new(),
            accept_unknown: true,
        }
    }

    #[must_use]
    pub fn active_rule<'a>(&'a self, key: &'a str) -> Option<ActiveRule<'a>> {
        match self.rules.get(key) {
            Some(rule) => Some(ActiveRule {
                key: &rule.key,
                name: &rule.name,
                severity: Some(&rule.severity),
            }),
            None if self.accept_unknown => Some(ActiveRule {
                key,
                name: key,
                severity: None,
            }),
            None => None,
        }
    }

    /// Rules known to the profile, in catalog order.
    pub fn rules(&self) -> impl Iterator<Item = &RuleRecord> {
        self.rules.values()
    }

    /// Whether no rule could ever produce a finding.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && !self.accept_unknown
    }
}
