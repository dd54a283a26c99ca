//! Plain-text grammar export.

use ludeme::grammar::GrammarRule;
use ludeme::{ExportError, Grammar, GrammarFormatter};

use crate::helpers::grammar_assertions::derive_fixture;

fn rule_line<'a>(text: &'a str, lhs: &str) -> &'a str {
    let prefix = format!("{lhs} ::= ");
    text.lines()
        .find(|line| line.starts_with(&prefix))
        .unwrap_or_else(|| panic!("Expected a line for {}", lhs))
}

#[test]
fn test_constructor_line() {
    let text = derive_fixture().to_text();
    assert_eq!(
        rule_line(&text, "<step>"),
        "<step> ::= (step <from> [<direction>] to:<region>)"
    );
}

#[test]
fn test_hidden_constructor_left_out() {
    let text = derive_fixture().to_text();
    assert_eq!(
        rule_line(&text, "<board>"),
        "<board> ::= (board <graphFunction> [use:<siteType>])"
    );
}

#[test]
fn test_folded_region_alternative_written_with_sites() {
    let text = derive_fixture().to_text();
    assert_eq!(
        rule_line(&text, "<sites>"),
        "<sites> ::= (sites [type:<siteType>]) | (sitesRegion of:<roleType>)"
    );
}

#[test]
fn test_unused_wrappers_not_written() {
    let text = derive_fixture().to_text();
    assert!(!text.lines().any(|line| line.starts_with("<region> ::=")));
    assert!(text.lines().any(|line| line.starts_with("<int> ::=")));
}

#[test]
fn test_package_headings_follow_computed_order() {
    let grammar = derive_fixture();
    let text = grammar.to_text();
    let headings: Vec<&str> = text
        .lines()
        .filter_map(|line| line.strip_prefix("// "))
        .collect();
    let ordered: Vec<String> = grammar
        .package_order()
        .map(|p| p.path().to_string())
        .filter(|path| headings.contains(&path.as_str()))
        .collect();
    assert_eq!(headings, ordered);
    assert_eq!(headings.first(), Some(&"game"));
}

/// Writes only rule heads, one per line.
struct HeadsOnly;

impl GrammarFormatter for HeadsOnly {
    fn format_rule(&self, grammar: &Grammar, rule: &GrammarRule) -> String {
        grammar.symbol(rule.lhs()).grammar_label().to_string()
    }
}

#[test]
fn test_custom_formatter() {
    let grammar = derive_fixture();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("heads.txt");
    grammar.export_with(&path, &HeadsOnly).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.lines().any(|line| line == "game"));
    assert!(!text.contains("::="));
    assert!(!text.contains("//"));
}

#[test]
fn test_unwritable_path_reports_io_error() {
    let grammar = derive_fixture();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("grammar.txt");
    let err = grammar.export(&path).unwrap_err();
    assert!(matches!(err, ExportError::Io { path: ref p, .. } if *p == path));
}
