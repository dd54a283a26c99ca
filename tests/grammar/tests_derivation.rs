//! Symbol table, rule creation and linker behaviour on the fixture game model.

use ludeme::{Clause, GrammarError, LudemeType};
use rstest::rstest;

use crate::helpers::grammar_assertions::*;
use crate::helpers::schema_fixtures::*;

#[test]
fn test_fixture_derives_without_warnings() {
    let grammar = derive_fixture();
    assert_no_warnings(&grammar);
    assert!(grammar.game_root().is_some());
    assert!(grammar.metadata_root().is_some());
}

#[rstest]
#[case("game.Game$Inner")]
#[case("game.package-info")]
fn test_inner_and_placeholder_classes_left_out(#[case] path: &str) {
    let grammar = derive_fixture();
    assert!(grammar.find_symbol(path, 0).is_none());
}

#[rstest]
#[case("int", LudemeType::Primitive)]
#[case("java.lang.String", LudemeType::Predefined)]
#[case("main.Constants.Infinity", LudemeType::Constant)]
#[case("game.types.board.SiteType.Cell", LudemeType::Constant)]
#[case("game.types.board.SiteType", LudemeType::Structural)]
#[case("game.players.Players", LudemeType::Ludeme)]
#[case("game.functions.booleans.is.Is", LudemeType::SuperLudeme)]
#[case("game.functions.booleans.is.line.IsLine", LudemeType::SubLudeme)]
#[case("game.functions.region.sites.Sites", LudemeType::SuperLudeme)]
#[case("game.functions.region.sites.index.SitesIndex", LudemeType::SubLudeme)]
fn test_ludeme_types(#[case] path: &str, #[case] expected: LudemeType) {
    let grammar = derive_fixture();
    assert_eq!(get_symbol(&grammar, path).ludeme_type(), expected, "{}", path);
}

#[test]
fn test_sub_ludeme_points_at_parent() {
    let grammar = derive_fixture();
    let is = symbol_id(&grammar, "game.functions.booleans.is.Is");
    let line = get_symbol(&grammar, "game.functions.booleans.is.line.IsLine");
    assert_eq!(line.sub_ludeme_of(), Some(is));
}

#[rstest]
#[case("game.equipment.container.board.Board", "board")]
#[case("game.functions.graph.generators.basis.square.Square", "square")]
#[case("game.util.moves.From", "from")]
#[case("game.functions.booleans.is.Is", "is")]
fn test_tokens_are_lower_camel_names(#[case] path: &str, #[case] token: &str) {
    let grammar = derive_fixture();
    assert_eq!(get_symbol(&grammar, path).token(), token);
}

#[test]
fn test_colliding_metadata_name_disambiguated() {
    let grammar = derive_fixture();
    let game = get_symbol(&grammar, "game.functions.ints.best.Best");
    let meta = get_symbol(&grammar, "metadata.ai.Best");
    assert_eq!(game.token(), meta.token());
    assert_ne!(game.grammar_label(), meta.grammar_label());
    assert_ne!(game.grammar_label(), "best");
    assert_ne!(meta.grammar_label(), "best");
}

#[test]
fn test_collection_return_type_uses_nested_variant() {
    let grammar = derive_fixture();
    let values = get_symbol(&grammar, "game.functions.intArray.values.Values");
    let target = grammar.symbol(values.return_type());
    assert_eq!(target.path(), "int");
    assert_eq!(target.nesting(), 1);
    // The shared scalar int is unchanged.
    assert!(get_symbol(&grammar, "int").returns_self());
}

#[rstest]
#[case(ROLE_TYPE)]
#[case("game.functions.booleans.is.IsLineType")]
fn test_enum_collection_return_type_keeps_evaluator(#[case] enum_path: &str) {
    let evaluator = "game.functions.roles.Roles";
    let mut schema = fixture_schema();
    schema.push(
        ludeme::ClassDescriptor::class(evaluator)
            .returns(format!("{enum_path}[]"))
            .constructor(ludeme::schema::ConstructorDescriptor::new(vec![
                ludeme::schema::ParamDescriptor::new(REGION_FUNCTION),
            ])),
    );
    let grammar = ludeme::Grammar::derive_default(&schema).unwrap();

    let target = grammar.symbol(get_symbol(&grammar, evaluator).return_type());
    assert_eq!(target.path(), enum_path);
    assert_eq!(target.nesting(), 1);
    let rule = grammar
        .rule_of(target.id())
        .unwrap_or_else(|| panic!("Expected a rule for {}[]", enum_path));
    assert_eq!(clause_paths(&grammar, rule), vec![evaluator.to_string()]);
}

#[test]
fn test_hidden_class_gets_no_rule() {
    let grammar = derive_fixture();
    assert!(get_symbol(&grammar, "game.util.Hidden").is_hidden());
    assert!(grammar.rule_by_path("game.util.Hidden").is_none());
    let item = get_rule(&grammar, "game.equipment.Item");
    assert!(!clause_paths(&grammar, item).contains(&"game.util.Hidden".to_string()));
}

#[test]
fn test_abstract_class_offers_subclasses() {
    let grammar = derive_fixture();
    assert_rule_offers(&grammar, "game.equipment.Item", "game.equipment.component.Piece");
    assert_rule_offers(
        &grammar,
        "game.equipment.Item",
        "game.equipment.container.board.Board",
    );
    assert_rule_offers(&grammar, "game.rules.play.moves.Moves", "game.rules.play.moves.Step");
}

#[test]
fn test_hidden_constructor_kept_but_marked() {
    let grammar = derive_fixture();
    let board = get_rule(&grammar, "game.equipment.container.board.Board");
    let ctors = constructors(board);
    assert_eq!(ctors.len(), 2);
    assert_eq!(ctors.iter().filter(|clause| clause.is_hidden()).count(), 1);
}

#[test]
fn test_every_constructor_becomes_a_clause() {
    let grammar = derive_fixture();
    let add = get_rule(&grammar, "game.functions.ints.math.Add");
    assert_eq!(constructors(add).len(), 2);
    let is = get_rule(&grammar, "game.functions.booleans.is.Is");
    assert_eq!(constructors(is).len(), 2);
}

#[test]
fn test_named_argument_carries_label() {
    let grammar = derive_fixture();
    let step = get_rule(&grammar, "game.rules.play.moves.Step");
    let args = constructors(step)[0].args().unwrap();
    assert_eq!(args.len(), 3);
    assert_eq!(args[0].label(), None);
    assert!(args[1].is_optional());
    assert_eq!(args[2].label(), Some("to"));
}

#[test]
fn test_or_arguments_share_a_group() {
    let grammar = derive_fixture();
    let count = get_rule(&grammar, "game.functions.ints.count.Count");
    let args = constructors(count)[0].args().unwrap();
    assert_ne!(args[0].or_group(), 0);
    assert_eq!(args[0].or_group(), args[1].or_group());
}

#[test]
fn test_and_arguments_share_a_group() {
    let grammar = derive_fixture();
    let is = get_rule(&grammar, "game.functions.booleans.is.Is");
    let connect = constructors(is)
        .into_iter()
        .find(|clause| clause.args().is_some_and(|args| args.len() == 3))
        .expect("connect constructor");
    let args = connect.args().unwrap();
    assert_eq!(args[0].and_group(), 0);
    assert_ne!(args[1].and_group(), 0);
    assert_eq!(args[1].and_group(), args[2].and_group());
}

#[test]
fn test_evaluators_offered_by_return_type() {
    let grammar = derive_fixture();
    assert_rule_offers(&grammar, "int", "game.functions.ints.count.Count");
    assert_rule_offers(&grammar, "int", "game.functions.ints.math.Add");
    assert_rule_offers(&grammar, "boolean", "game.functions.booleans.is.Is");
}

#[test]
fn test_application_constants_offered_as_int() {
    let grammar = derive_fixture();
    assert_rule_offers(&grammar, "int", "main.Constants.Infinity");
    assert_rule_offers(&grammar, "int", "main.Constants.Off");
}

#[test]
fn test_directions_linked() {
    let grammar = derive_fixture();
    for member in [
        "game.util.directions.AbsoluteDirection",
        "game.util.directions.RelativeDirection",
        "game.functions.directions.Directions",
    ] {
        assert_rule_offers(&grammar, "game.util.directions.Direction", member);
    }
}

#[test]
fn test_region_rule_folded_into_sites() {
    let grammar = derive_fixture();
    assert!(
        grammar
            .rule_by_path("game.functions.region.sites.region.SitesRegion")
            .is_none()
    );
    assert_rule_offers(
        &grammar,
        "game.functions.region.sites.Sites",
        "game.functions.region.sites.region.SitesRegion",
    );
    let sites = get_rule(&grammar, "game.functions.region.sites.Sites");
    assert_eq!(constructors(sites).len(), 2);
}

#[test]
fn test_dimension_accepts_plain_int() {
    let grammar = derive_fixture();
    let int = symbol_id(&grammar, "int");
    let dim = get_rule(&grammar, "game.functions.dim.DimFunction");
    assert!(dim.contains(&Clause::reference(int)));
}

#[rstest]
#[case("game.functions.range.RangeFunction")]
#[case("game.functions.graph.GraphFunction")]
fn test_forced_visible_functions(#[case] path: &str) {
    let grammar = derive_fixture();
    let symbol = get_symbol(&grammar, path);
    assert!(symbol.used_in_grammar(), "{}", path);
    assert!(symbol.used_in_description(), "{}", path);
}

#[test]
fn test_single_value_enums_inlined_into_factories() {
    let grammar = derive_fixture();
    assert!(grammar.rule_by_path("game.functions.booleans.is.IsLineType").is_none());
    assert!(grammar.rule_by_path("game.functions.booleans.is.IsConnectType").is_none());

    let line = symbol_id(&grammar, "game.functions.booleans.is.IsLineType.Line");
    let connected = symbol_id(&grammar, "game.functions.booleans.is.IsConnectType.Connected");
    let is = get_rule(&grammar, "game.functions.booleans.is.Is");
    let leading: Vec<_> = constructors(is)
        .iter()
        .map(|clause| clause.args().unwrap()[0].symbol())
        .collect();
    assert!(leading.contains(&line));
    assert!(leading.contains(&connected));
    assert!(grammar.symbol(line).used_in_grammar());
}

#[test]
fn test_multi_value_enum_keeps_its_rule() {
    let grammar = derive_fixture();
    let rule = get_rule(&grammar, SITE_TYPE);
    assert_eq!(rule.rhs().len(), 3);
    assert!(
        rule.rhs()
            .iter()
            .all(|clause| grammar.symbol(clause.symbol()).is_enum_constant())
    );
}

#[test]
fn test_region_wrapper_relabelled_and_unused() {
    let grammar = derive_fixture();
    let region = get_symbol(&grammar, REGION_FUNCTION);
    assert_eq!(region.grammar_label(), "region");
    assert!(!region.used_in_grammar());
    // Arguments still point at the wrapper and print with its new label.
    let step = get_rule(&grammar, "game.rules.play.moves.Step");
    let to = &constructors(step)[0].args().unwrap()[2];
    assert_eq!(to.symbol(), region.id());
}

#[test]
fn test_clauses_sorted_by_label() {
    let grammar = derive_fixture();
    for rule in grammar.rules() {
        let labels: Vec<&str> = rule
            .rhs()
            .iter()
            .map(|clause| grammar.symbol(clause.symbol()).grammar_label())
            .collect();
        let mut sorted = labels.clone();
        sorted.sort();
        assert_eq!(labels, sorted, "{}", grammar.symbol(rule.lhs()).path());
    }
}

#[test]
fn test_missing_game_root_is_fatal() {
    let mut schema = fixture_schema();
    schema.classes.retain(|class| class.qualified_name != "game.Game");
    let err = ludeme::Grammar::derive_default(&schema).unwrap_err();
    assert!(matches!(err, GrammarError::MissingRoot(ref path) if path == "game.Game"));
}

#[test]
fn test_missing_link_targets_are_informational() {
    let mut schema = fixture_schema();
    schema
        .classes
        .retain(|class| class.qualified_name != "game.functions.directions.Directions");
    let grammar = ludeme::Grammar::derive_default(&schema).unwrap();
    assert_no_warnings(&grammar);
    let missing: Vec<_> = grammar
        .diagnostics()
        .with_code(ludeme::grammar::codes::MISSING_LINK_TARGET)
        .map(|diag| diag.subject.to_string())
        .collect();
    assert_eq!(missing, vec!["game.functions.directions.Directions"]);
}
