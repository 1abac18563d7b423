use std::path::PathBuf;

use super::*;
use crate::error::{NdependError, ParseErrorKind};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/report")
        .join(name)
}

fn issue(rule_key: &str, file_path: &str, line: u32) -> Issue {
    Issue {
        rule_key: rule_key.to_string(),
        file_path: file_path.to_string(),
        line,
    }
}

fn parse_str(xml: &str) -> Vec<Issue> {
    let mut parser = ReportParser::new(Vec::new());
    parser.parse_str(xml).unwrap();
    parser.into_sink()
}

#[test]
fn valid_report_yields_issues_in_document_order() {
    let mut parser = ReportParser::new(Vec::new());
    let count = parser.parse(&fixture("valid.xml")).unwrap();
    let issues = parser.into_sink();

    assert_eq!(count, 7);
    assert_eq!(
        issues,
        vec![
            issue("AvoidNamespacesWithFewTypes", "Program.cs", 7),
            issue("ClassWithNoDescendantShouldBeSealedIfPossible", "Program.cs", 9),
            issue("AStatelessClassOrStructureMightBeTurnedIntoAStaticType", "Program.cs", 9),
            issue("NonStaticClassesShouldBeInstantiatedOrTurnedToStatic", "Program.cs", 9),
            issue("ClassWithNoDescendantShouldBeSealedIfPossible", "Program.cs", 9),
            issue("AStatelessClassOrStructureMightBeTurnedIntoAStaticType", "Program.cs", 9),
            issue("NonStaticClassesShouldBeInstantiatedOrTurnedToStatic", "Program.cs", 9),
        ]
    );
}

#[test]
fn parsing_twice_gives_identical_output() {
    let mut first = Vec::new();
    let mut second = Vec::new();
    ReportParser::new(&mut first)
        .parse(&fixture("valid.xml"))
        .unwrap();
    ReportParser::new(&mut second)
        .parse(&fixture("valid.xml"))
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn parent_location_is_restored_after_nested_scope() {
    let issues = parse_str(
        r#"<Report>
  <Namespace Name="N" File="a.cs" Line="3">
    <Type Name="T" File="b.cs" Line="10">
      <RuleViolated Key="Inner" />
    </Type>
    <RuleViolated Key="Outer" />
  </Namespace>
</Report>"#,
    );

    assert_eq!(
        issues,
        vec![issue("Inner", "b.cs", 10), issue("Outer", "a.cs", 3)]
    );
}

#[test]
fn violation_skips_non_scope_wrappers() {
    let issues = parse_str(
        r#"<Type Name="T" File="a.cs" Line="4">
  <Group><Inner><RuleViolated Key="Deep" /></Inner></Group>
</Type>"#,
    );

    assert_eq!(issues, vec![issue("Deep", "a.cs", 4)]);
}

#[test]
fn element_without_name_is_not_a_scope() {
    let issues = parse_str(
        r#"<Namespace Name="N">
  <Wrapper File="x.cs" Line="3"><RuleViolated Key="K" /></Wrapper>
</Namespace>"#,
    );

    assert!(issues.is_empty());
}

#[test]
fn scope_without_file_or_line_drops_violations() {
    let issues = parse_str(
        r#"<Root>
  <A Name="a" File="a.cs"><RuleViolated Key="NoLine" /></A>
  <B Name="b" Line="5"><RuleViolated Key="NoFile" /></B>
  <C Name="c" File="c.cs" Line="0"><RuleViolated Key="ZeroLine" /></C>
</Root>"#,
    );

    assert!(issues.is_empty());
}

#[test]
fn innermost_scope_wins_even_without_location() {
    let issues = parse_str(
        r#"<Type Name="T" File="a.cs" Line="4">
  <Method Name="M()"><RuleViolated Key="K" /></Method>
</Type>"#,
    );

    assert!(issues.is_empty());
}

#[test]
fn violation_outside_any_scope_is_ignored() {
    let issues = parse_str(r#"<Report File="a.cs" Line="1"><RuleViolated Key="K" /></Report>"#);
    assert!(issues.is_empty());
}

#[test]
fn scope_end_matches_by_depth_not_by_name() {
    let issues = parse_str(
        r#"<Type Name="A" File="a.cs" Line="1">
  <Type><RuleViolated Key="First" /></Type>
  <RuleViolated Key="Second" />
</Type>"#,
    );

    assert_eq!(
        issues,
        vec![issue("First", "a.cs", 1), issue("Second", "a.cs", 1)]
    );
}

#[test]
fn named_violation_uses_enclosing_scope_then_opens_its_own() {
    let issues = parse_str(
        r#"<Type Name="T" File="a.cs" Line="2">
  <RuleViolated Name="v" Key="Outer" File="b.cs" Line="8">
    <RuleViolated Key="Inner" />
  </RuleViolated>
</Type>"#,
    );

    assert_eq!(
        issues,
        vec![issue("Outer", "a.cs", 2), issue("Inner", "b.cs", 8)]
    );
}

#[test]
fn missing_key_reports_file_and_line() {
    let mut issues = Vec::new();
    let err = ReportParser::new(&mut issues)
        .parse(&fixture("no_key.xml"))
        .unwrap_err();

    let parse = err.as_parse_error().expect("parse error");
    assert_eq!(
        parse.kind,
        ParseErrorKind::MissingAttribute {
            attribute: "Key".to_string(),
            element: "RuleViolated".to_string(),
        }
    );
    assert_eq!(parse.line, 5);

    let message = err.to_string();
    assert!(message.contains("Missing attribute \"Key\" in element <RuleViolated>"));
    assert!(message.contains("no_key.xml at line 5"), "{message}");

    // the violation before the defect was already delivered
    assert_eq!(
        issues,
        vec![issue("AvoidNamespacesWithFewTypes", "Program.cs", 9)]
    );
}

#[test]
fn invalid_line_reports_value_and_line() {
    let err = ReportParser::new(Vec::new())
        .parse(&fixture("invalid_line.xml"))
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("Expected an integer instead of \"foo\" for the attribute \"Line\""));
    assert!(message.contains("invalid_line.xml at line 3"), "{message}");
}

#[test]
fn invalid_line_fails_even_without_violations() {
    let mut parser = ReportParser::new(Vec::new());
    let err = parser.parse_str(r#"<Type Name="T" Line="1.5"/>"#).unwrap_err();
    assert!(matches!(err, NdependError::Parse(_)));
}

#[test]
fn missing_key_is_ignored_where_no_issue_would_be_emitted() {
    let issues = parse_str(r#"<Type Name="T"><RuleViolated /></Type>"#);
    assert!(issues.is_empty());
}

#[test]
fn non_existing_report_names_the_file() {
    let err = ReportParser::new(Vec::new())
        .parse(&fixture("non_existing.xml"))
        .unwrap_err();

    assert!(matches!(err, NdependError::FileRead { .. }));
    assert!(err.to_string().contains("non_existing.xml"));
}

#[test]
fn malformed_report_is_an_xml_error() {
    let err = ReportParser::new(Vec::new())
        .parse(&fixture("malformed.xml"))
        .unwrap_err();

    assert!(matches!(err, NdependError::MalformedXml { line: 5, .. }));
    assert!(err.to_string().contains("malformed.xml"));
}

#[test]
fn truncated_report_fails_after_delivering_earlier_issues() {
    let mut issues = Vec::new();
    let err = ReportParser::new(&mut issues)
        .parse_str("<Root>\n<Type Name=\"T\" File=\"a.cs\" Line=\"3\">\n<RuleViolated Key=\"K\"/>\n")
        .unwrap_err();

    assert!(matches!(err, NdependError::MalformedXml { .. }));
    assert!(err.to_string().contains("Type"), "{err}");
    assert_eq!(issues, vec![issue("K", "a.cs", 3)]);
}

#[test]
fn report_with_two_roots_is_malformed() {
    let mut parser = ReportParser::new(Vec::new());
    let err = parser
        .parse_str(
            r#"<Report><Type Name="T" File="a.cs" Line="1"><RuleViolated Key="K"/></Type></Report>
<Report/>"#,
        )
        .unwrap_err();

    assert!(matches!(err, NdependError::MalformedXml { line: 2, .. }));
}
