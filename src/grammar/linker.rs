//! Hand-placed links the class graph does not express.
//!
//! Every edit is addressed by exact qualified path and is idempotent, so
//! running [`link`] twice leaves the grammar unchanged. Targets absent from
//! the class graph are reported and skipped; only the `int` rule is required.

use super::diagnostics::codes;
use super::error::GrammarError;
use super::ids::RuleId;
use super::model::Grammar;
use crate::base::constants::{
    DIM_FUNCTION, DIRECTION_MEMBERS, DIRECTION_RULE, FORCED_VISIBLE, INT_PRIMITIVE, REGION_RULE,
    SITES_RULE,
};

pub(crate) fn link(grammar: &mut Grammar) -> Result<(), GrammarError> {
    let int_rule = grammar
        .find_symbol(INT_PRIMITIVE, 0)
        .and_then(|int| grammar.rule_id_of(int))
        .ok_or_else(|| GrammarError::MissingRule(INT_PRIMITIVE.to_string()))?;

    link_directions(grammar);
    fold_region_into_sites(grammar);
    link_dim_function(grammar, int_rule);
    force_visible(grammar);
    Ok(())
}

fn required_rule(grammar: &mut Grammar, path: &str) -> Option<RuleId> {
    let rule = grammar
        .find_symbol(path, 0)
        .and_then(|id| grammar.rule_id_of(id));
    if rule.is_none() {
        grammar
            .diagnostics
            .info(codes::MISSING_LINK_TARGET, path, "no rule to link");
    }
    rule
}

/// `<direction> ::= <absoluteDirection> | <relativeDirection> | <directions>`
fn link_directions(grammar: &mut Grammar) {
    let Some(rule) = required_rule(grammar, DIRECTION_RULE) else {
        return;
    };
    for member in DIRECTION_MEMBERS {
        match grammar.find_symbol(member, 0) {
            Some(id) => {
                grammar.add_reference(rule, id);
            }
            None => grammar
                .diagnostics
                .info(codes::MISSING_LINK_TARGET, member, "direction member absent"),
        }
    }
}

/// Region alternatives become sites alternatives; the region rule goes away.
fn fold_region_into_sites(grammar: &mut Grammar) {
    let Some(region) = grammar
        .find_symbol(REGION_RULE, 0)
        .and_then(|id| grammar.rule_id_of(id))
    else {
        // Already folded, or never present.
        return;
    };
    let Some(sites) = required_rule(grammar, SITES_RULE) else {
        return;
    };

    let moved = grammar.rule(region).rhs.clone();
    tracing::debug!("Folding {} region clauses into sites", moved.len());
    for clause in moved {
        grammar.rule_mut(sites).add_unique(clause);
    }
    grammar.retire_rule(region);
}

/// Plain integers are accepted wherever a dimension function is.
fn link_dim_function(grammar: &mut Grammar, int_rule: RuleId) {
    let Some(rule) = required_rule(grammar, DIM_FUNCTION) else {
        return;
    };
    let int = grammar.rule(int_rule).lhs;
    grammar.add_reference(rule, int);
}

fn force_visible(grammar: &mut Grammar) {
    for path in FORCED_VISIBLE {
        match grammar.find_symbol(path, 0) {
            Some(id) => {
                let symbol = grammar.symbol_mut(id);
                symbol.used_in_grammar = true;
                symbol.used_in_description = true;
            }
            None => grammar
                .diagnostics
                .info(codes::MISSING_LINK_TARGET, path, "cannot force visibility"),
        }
    }
}
