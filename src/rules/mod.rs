//! NDepend rule catalog: parsing and the repository that collects it.

mod definition;
mod parser;

use indexmap::IndexMap;
use serde::Serialize;

pub use definition::define_rules;
pub use parser::{RuleRecords, parse_rule_catalog};

use crate::{LANGUAGE_KEY, REPOSITORY_KEY, REPOSITORY_NAME};

/// Metadata for one NDepend rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleRecord {
    pub key: String,
    /// Free-form severity taken from the `Priority` attribute.
    pub severity: String,
    pub name: String,
    pub html_description: String,
    /// The rule's `Category`, if any, as its single tag.
    pub tags: Vec<String>,
}

/// Accepts rules as the catalog walker completes them.
pub trait RuleRepository {
    fn add_rule(&mut self, rule: RuleRecord);
}

impl RuleRepository for Vec<RuleRecord> {
    fn add_rule(&mut self, rule: RuleRecord) {
        self.push(rule);
    }
}

/// Named rule repository keyed by rule key, in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RulesRepository {
    key: String,
    language: String,
    name: String,
    rules: IndexMap<String, RuleRecord>,
}

impl RulesRepository {
    #[must_use]
    pub fn new(key: &str, language: &str, name: &str) -> Self {
        Self {
            key: key.to_string(),
            language: language.to_string(),
            name: name.to_string(),
            rules: IndexMap::new(),
        }
    }

    /// Empty repository for NDepend C# rules.
    #[must_use]
    pub fn ndepend() -> Self {
        Self::new(REPOSITORY_KEY, LANGUAGE_KEY, REPOSITORY_NAME)
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn rule(&self, key: &str) -> Option<&RuleRecord> {
        self.rules.get(key)
    }

    pub fn rules(&self) -> impl Iterator<Item = &RuleRecord> {
        self.rules.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl RuleRepository for RulesRepository {
    fn add_rule(&mut self, rule: RuleRecord) {
        let key = rule.key.clone();
        if self.rules.insert(key.clone(), rule).is_some() {
            tracing::warn!(
                "Duplicate rule \"{key}\" in repository {}, keeping the last definition",
                self.key
            );
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
