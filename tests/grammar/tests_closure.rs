//! Reachability, depth, package order and ancestor closure.

use ludeme::{Grammar, GrammarRule, LudemeType, Symbol};
use rstest::rstest;

use crate::helpers::grammar_assertions::*;
use crate::helpers::schema_fixtures::*;

// ============================================================================
// DEPTH
// ============================================================================

#[rstest]
#[case("game.Game", 0)]
#[case("game.players.Players", 1)]
#[case("game.rules.Rules", 1)]
#[case("game.rules.play.Play", 2)]
#[case("game.rules.play.moves.Moves", 3)]
fn test_depth_from_game_root(#[case] path: &str, #[case] depth: usize) {
    let grammar = derive_fixture();
    assert_eq!(get_symbol(&grammar, path).depth(), Some(depth), "{}", path);
}

#[test]
fn test_abstract_symbols_add_no_depth() {
    let grammar = derive_fixture();
    let moves = get_symbol(&grammar, "game.rules.play.moves.Moves").depth();
    let step = get_symbol(&grammar, "game.rules.play.moves.Step").depth();
    assert_eq!(moves, step);

    let item = get_symbol(&grammar, "game.equipment.Item").depth();
    let piece = get_symbol(&grammar, "game.equipment.component.Piece").depth();
    assert_eq!(item, piece);
}

// ============================================================================
// USAGE FLAGS
// ============================================================================

#[test]
fn test_reachable_symbols_used_in_grammar() {
    let grammar = derive_fixture();
    for path in [
        "game.equipment.component.Piece",
        "game.rules.play.moves.Step",
        "game.util.moves.From",
        "game.functions.region.sites.Sites",
        "game.functions.ints.math.Add",
        "game.functions.graph.generators.basis.square.Square",
        "game.functions.dim.DimConstant",
    ] {
        assert!(get_symbol(&grammar, path).used_in_grammar(), "{}", path);
    }
}

#[test]
fn test_metadata_only_symbols_not_used_in_grammar() {
    let grammar = derive_fixture();
    let ai = get_symbol(&grammar, "metadata.ai.Ai");
    assert!(ai.used_in_metadata());
    assert!(!ai.used_in_grammar());
    let best = get_symbol(&grammar, "metadata.ai.Best");
    assert!(best.used_in_metadata());
}

#[test]
fn test_described_symbols_are_used() {
    let grammar = derive_fixture();
    for symbol in grammar.symbols() {
        // Boxed types lose their usage once arguments are unboxed.
        if symbol.used_in_description() && symbol.ludeme_type() != LudemeType::Predefined {
            assert!(symbol.used_in_grammar(), "{}", symbol.path());
        }
    }
    assert!(!get_symbol(&grammar, "java.lang.Integer").used_in_grammar());
}

#[test]
fn test_used_rules_only_reference_used_symbols() {
    let grammar = derive_fixture();
    for rule in grammar.rules() {
        let lhs = grammar.symbol(rule.lhs());
        if !lhs.used_in_grammar() {
            continue;
        }
        for clause in rule.rhs() {
            let target = grammar.symbol(clause.symbol());
            assert!(target.used_in_grammar(), "{} -> {}", lhs.path(), target.path());
        }
    }
}

// ============================================================================
// PACKAGE ORDER
// ============================================================================

fn package_paths(grammar: &Grammar) -> Vec<String> {
    grammar.package_order().map(|p| p.path().to_string()).collect()
}

#[test]
fn test_game_package_comes_first() {
    let grammar = derive_fixture();
    assert_eq!(package_paths(&grammar).first().map(String::as_str), Some("game"));
}

#[test]
fn test_infrastructure_groups_trail_in_fixed_order() {
    let grammar = derive_fixture();
    let paths = package_paths(&grammar);
    let group = |path: &str| {
        ["game.functions", "game.util", "game.types"]
            .iter()
            .position(|g| path == *g || path.starts_with(&format!("{g}.")))
    };

    let first_trailing = paths
        .iter()
        .position(|p| group(p).is_some())
        .expect("trailing packages present");
    assert!(paths[first_trailing..].iter().all(|p| group(p).is_some()), "{:?}", paths);

    let groups: Vec<usize> = paths[first_trailing..].iter().filter_map(|p| group(p)).collect();
    let mut sorted = groups.clone();
    sorted.sort();
    assert_eq!(groups, sorted, "{:?}", paths);
}

#[test]
fn test_every_package_rule_is_live_and_local() {
    let grammar = derive_fixture();
    for package in grammar.package_order() {
        for id in package.rules() {
            let rule: &GrammarRule = grammar.rule(*id);
            assert!(!rule.is_retired());
            let lhs: &Symbol = grammar.symbol(rule.lhs());
            assert_eq!(lhs.package(), Some(package.id()), "{}", lhs.path());
        }
    }
}

#[test]
fn test_no_rule_listed_twice() {
    let grammar = derive_fixture();
    let mut seen = std::collections::HashSet::new();
    for package in grammar.package_order() {
        for id in package.rules() {
            assert!(seen.insert(*id), "{:?} listed twice", id);
        }
    }
}

// ============================================================================
// ANCESTORS
// ============================================================================

#[test]
fn test_superclass_chain_in_ancestors() {
    let grammar = derive_fixture();
    let piece = get_symbol(&grammar, "game.equipment.component.Piece");
    assert!(piece.ancestors().contains(&symbol_id(&grammar, "game.equipment.Item")));
}

#[test]
fn test_sub_ludeme_inherits_parent_ancestors() {
    let grammar = derive_fixture();
    let line = get_symbol(&grammar, "game.functions.booleans.is.line.IsLine");
    for path in [
        "game.functions.booleans.is.Is",
        "game.functions.booleans.BooleanFunction",
        "boolean",
    ] {
        assert!(line.ancestors().contains(&symbol_id(&grammar, path)), "{}", path);
    }
}

#[test]
fn test_evaluator_ancestors_include_interface_and_value_type() {
    let grammar = derive_fixture();
    let add = get_symbol(&grammar, "game.functions.ints.math.Add");
    assert!(add.ancestors().contains(&symbol_id(&grammar, INT_FUNCTION)));
    assert!(add.ancestors().contains(&symbol_id(&grammar, "int")));
}

#[test]
fn test_return_type_ancestors_are_inherited() {
    let grammar = derive_fixture();
    for symbol in grammar.symbols() {
        if symbol.returns_self() {
            continue;
        }
        let target = grammar.symbol(symbol.return_type());
        assert!(symbol.ancestors().contains(&target.id()), "{}", symbol.path());
        assert!(
            target.ancestors().is_subset(symbol.ancestors()),
            "{} misses ancestors of {}",
            symbol.path(),
            target.path()
        );
    }
}

#[test]
fn test_derivation_is_repeatable() {
    let a = derive_fixture();
    let b = derive_fixture();
    assert_eq!(package_paths(&a), package_paths(&b));
    let rules_a: Vec<GrammarRule> = a.rules().cloned().collect();
    let rules_b: Vec<GrammarRule> = b.rules().cloned().collect();
    assert_eq!(rules_a, rules_b);
}
