//! Class paths for the token under an editor cursor.

use rstest::rstest;

use crate::helpers::grammar_assertions::derive_fixture;

/// Offset of the first character of the last occurrence of `token`, plus one.
fn inside_last(text: &str, token: &str) -> usize {
    text.rfind(token).expect("token in text") + 1
}

fn inside_first(text: &str, token: &str) -> usize {
    text.find(token).expect("token in text") + 1
}

#[test]
fn test_rule_reference_never_offers_enum_constants() {
    let grammar = derive_fixture();
    let text = r#"(piece "Pawn" (from <in|from>) )"#;
    let paths = grammar.class_paths(text, inside_last(text, "from"), false);
    assert_eq!(paths, vec!["game.util.moves.From"]);
}

#[test]
fn test_constructor_position() {
    let grammar = derive_fixture();
    let text = r#"(piece "Pawn" (from <in|from>) )"#;
    let paths = grammar.class_paths(text, inside_first(text, "from"), false);
    assert_eq!(paths, vec!["game.util.moves.From"]);
}

#[test]
fn test_terminal_after_parameter_name() {
    let grammar = derive_fixture();
    let text = "(board (square 8) use:Cell)";
    let paths = grammar.class_paths(text, inside_first(text, "Cell"), false);
    assert_eq!(paths, vec!["game.types.board.SiteType.Cell"]);
}

#[test]
fn test_parameter_name_has_no_paths() {
    let grammar = derive_fixture();
    let text = "(board (square 8) use:Cell)";
    assert!(grammar.class_paths(text, inside_first(text, "use"), false).is_empty());
}

#[test]
fn test_metadata_block_filters_paths() {
    let grammar = derive_fixture();
    let text = "(best 1) (metadata (ai (best)))";
    assert_eq!(
        grammar.class_paths(text, inside_first(text, "best"), false),
        vec!["game.functions.ints.best.Best"]
    );
    assert_eq!(
        grammar.class_paths(text, inside_last(text, "best"), false),
        vec!["metadata.ai.Best"]
    );
}

#[test]
fn test_partial_constructor() {
    let grammar = derive_fixture();
    let text = "(squ)";
    assert_eq!(
        grammar.class_paths(text, 2, true),
        vec!["game.functions.graph.generators.basis.square.Square"]
    );
    assert!(grammar.class_paths(text, 2, false).is_empty());
}

#[test]
fn test_partial_matches_are_unique() {
    let grammar = derive_fixture();
    let text = "(co)";
    let mut paths = grammar.class_paths(text, 2, true);
    let total = paths.len();
    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), total);
    assert!(paths.contains(&"game.functions.ints.count.Count".to_string()));
    assert!(paths.contains(&"game.rules.play.moves.count.Count".to_string()));
}

#[rstest]
#[case("(board Cell)", 0)]
#[case("(board Cell)", 12)]
#[case("(board  Cell)", 7)]
#[case("(board \"Cell\")", 8)]
#[case("game (x)", 2)]
fn test_no_context_gives_no_paths(#[case] text: &str, #[case] offset: usize) {
    let grammar = derive_fixture();
    assert!(grammar.class_paths(text, offset, false).is_empty());
}
