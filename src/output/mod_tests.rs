use super::*;

fn finding(path: &str, line: u32) -> Finding {
    Finding {
        rule_key: "Key1".to_string(),
        message: "Rule one".to_string(),
        severity: Some("MAJOR".to_string()),
        path: path.to_string(),
        line,
    }
}

#[test]
fn output_format_from_str() {
    assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
    assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert_eq!(
        "sarif".parse::<OutputFormat>().unwrap(),
        OutputFormat::Sarif
    );
}

#[test]
fn output_format_from_str_case_insensitive() {
    assert_eq!("TEXT".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
    assert_eq!("Json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
}

#[test]
fn output_format_from_str_invalid() {
    let err = "markdown".parse::<OutputFormat>().unwrap_err();
    assert_eq!(err, "Unknown output format: markdown");
}

#[test]
fn output_format_default_is_text() {
    assert_eq!(OutputFormat::default(), OutputFormat::Text);
}

#[test]
fn distinct_files_counts_each_path_once() {
    let findings = vec![
        finding("b.cs", 1),
        finding("a.cs", 2),
        finding("b.cs", 3),
    ];
    assert_eq!(distinct_files(&findings), 2);
    assert_eq!(distinct_files(&[]), 0);
}
