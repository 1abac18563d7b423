use super::{RulesRepository, parse_rule_catalog};

/// Builds the NDepend rule repository from catalog XML.
///
/// A broken catalog is logged, not propagated: the repository keeps every
/// rule that was completed before the defect.
#[must_use]
pub fn define_rules(xml: &str) -> RulesRepository {
    let mut repository = RulesRepository::ndepend();

    if xml.is_empty() {
        tracing::warn!("No NDepend rules defined.");
    } else if let Err(e) = parse_rule_catalog(xml, &mut repository) {
        tracing::error!("Error while creating the NDepend rule repository: {e}");
    }

    repository
}
