use super::*;
use crate::error::{NdependError, ParseErrorKind};

const VALID: &str = include_str!("../../tests/fixtures/rules/valid.xml");
const PARTIAL: &str = include_str!("../../tests/fixtures/rules/partial.xml");

fn rule(key: &str, severity: &str, name: &str, description: &str, tags: &[&str]) -> RuleRecord {
    RuleRecord {
        key: key.to_string(),
        severity: severity.to_string(),
        name: name.to_string(),
        html_description: description.to_string(),
        tags: tags.iter().map(ToString::to_string).collect(),
    }
}

fn parse_kind(xml: &str) -> (Vec<RuleRecord>, ParseErrorKind) {
    let mut repository = Vec::new();
    let err = parse_rule_catalog(xml, &mut repository).unwrap_err();
    let kind = err.as_parse_error().expect("parse error").kind.clone();
    (repository, kind)
}

#[test]
fn valid_catalog_yields_all_rules_in_order() {
    let mut repository = Vec::new();
    let parsed = parse_rule_catalog(VALID, &mut repository).unwrap();

    let expected = vec![
        rule("Key1", "BLOCKER", "Name1", "Description1", &["code-quality"]),
        rule("Key2", "MAJOR", "Name2", "Description2", &[]),
        rule("Key3", "MINOR", "Name3", "Description3", &["object-oriented-design"]),
    ];
    assert_eq!(parsed, expected);
    assert_eq!(repository, expected);
}

#[test]
fn empty_catalog_is_not_an_error() {
    let mut repository = Vec::new();
    assert!(parse_rule_catalog("", &mut repository).unwrap().is_empty());
    assert!(parse_rule_catalog("  \n", &mut repository).unwrap().is_empty());
    assert!(parse_rule_catalog("<Rules/>", &mut repository).unwrap().is_empty());
    assert!(repository.is_empty());
}

#[test]
fn missing_key_fails() {
    let (repository, kind) = parse_kind(include_str!("../../tests/fixtures/rules/no_key.xml"));
    assert!(repository.is_empty());
    assert_eq!(
        kind,
        ParseErrorKind::MissingAttribute {
            attribute: "Key".to_string(),
            element: "Rule".to_string(),
        }
    );
}

#[test]
fn missing_priority_fails() {
    let (repository, kind) =
        parse_kind(include_str!("../../tests/fixtures/rules/no_priority.xml"));
    assert!(repository.is_empty());
    assert_eq!(
        kind,
        ParseErrorKind::MissingAttribute {
            attribute: "Priority".to_string(),
            element: "Rule".to_string(),
        }
    );
}

#[test]
fn missing_name_fails_at_rule_end() {
    let mut repository = Vec::new();
    let err = parse_rule_catalog(
        include_str!("../../tests/fixtures/rules/no_name.xml"),
        &mut repository,
    )
    .unwrap_err();

    assert!(repository.is_empty());
    assert_eq!(err.to_string(), "Missing rule name at line 5");
}

#[test]
fn missing_description_fails() {
    let (repository, kind) =
        parse_kind(include_str!("../../tests/fixtures/rules/no_description.xml"));
    assert!(repository.is_empty());
    assert_eq!(kind, ParseErrorKind::MissingRuleDescription);
}

#[test]
fn rules_before_a_defect_are_kept() {
    let mut repository = Vec::new();
    let err = parse_rule_catalog(PARTIAL, &mut repository).unwrap_err();

    assert_eq!(
        repository,
        vec![rule("Key1", "BLOCKER", "Name1", "Description1", &[])]
    );
    assert_eq!(err.to_string(), "Missing rule description at line 9");
}

#[test]
fn iterator_stops_after_first_error() {
    let results: Vec<_> = RuleRecords::new(PARTIAL).collect();

    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(NdependError::Parse(_))));
}

#[test]
fn iterator_is_lazy() {
    let mut records = RuleRecords::new(PARTIAL);
    let first = records.next().unwrap().unwrap();
    assert_eq!(first.key, "Key1");
}

#[test]
fn unknown_children_are_ignored() {
    let xml = r#"<Rules>
  <Rule Key="K" Priority="INFO">
    <Extra><Nested>x</Nested></Extra>
    <Name>N</Name>
    <Description><![CDATA[<p>html</p>]]></Description>
  </Rule>
</Rules>"#;

    let mut repository = Vec::new();
    parse_rule_catalog(xml, &mut repository).unwrap();
    assert_eq!(repository, vec![rule("K", "INFO", "N", "<p>html</p>", &[])]);
}

#[test]
fn with_origin_names_the_catalog_file() {
    let xml = r#"<Rules><Rule Key="K"/></Rules>"#;
    let err = RuleRecords::with_origin(xml, "catalog.xml".into())
        .next()
        .unwrap()
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Missing attribute \"Priority\" in element <Rule> in catalog.xml at line 1"
    );
}

#[test]
fn unterminated_rule_is_malformed() {
    let mut repository = Vec::new();
    let err = parse_rule_catalog(r#"<Rules><Rule Key="K" Priority="P"><Name>N</Name>"#, &mut repository)
        .unwrap_err();
    assert!(matches!(err, NdependError::MalformedXml { .. }));
}

#[test]
fn truncated_catalog_fails_but_keeps_closed_rules() {
    let mut repository = Vec::new();
    let err = parse_rule_catalog(
        r#"<Rules><Rule Key="K" Priority="MAJOR"><Name>n</Name><Description>d</Description></Rule>"#,
        &mut repository,
    )
    .unwrap_err();

    assert!(matches!(err, NdependError::MalformedXml { .. }));
    assert!(err.to_string().contains("Rules"), "{err}");
    assert_eq!(repository, vec![rule("K", "MAJOR", "n", "d", &[])]);
}

#[test]
fn catalog_with_two_roots_is_malformed() {
    let xml = r#"<Rules><Rule Key="K" Priority="MAJOR"><Name>n</Name><Description>d</Description></Rule></Rules>
<Rules><Rule Key="K2" Priority="MINOR"><Name>n2</Name><Description>d2</Description></Rule></Rules>"#;

    let mut repository = Vec::new();
    let err = parse_rule_catalog(xml, &mut repository).unwrap_err();

    assert!(matches!(err, NdependError::MalformedXml { line: 2, .. }));
    assert_eq!(repository, vec![rule("K", "MAJOR", "n", "d", &[])]);
}
