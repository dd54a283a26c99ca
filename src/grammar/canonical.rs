//! Canonical form: clause cleanup, inlining and label tidy-up.

use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use super::ids::{RuleId, SymbolId};
use super::model::Grammar;
use super::symbol::LudemeType;
use crate::base::constants::{FUNCTION_WRAPPERS, unboxed_primitive};
use crate::base::naming::lower_camel;

/// Drop the generic function-wrapper types from the visible grammar.
pub(crate) fn remove_redundant_function_names(grammar: &mut Grammar) {
    let wrappers: Vec<String> = FUNCTION_WRAPPERS
        .iter()
        .map(|(name, _)| lower_camel(name))
        .collect();
    let is_wrapper = |label: &str| wrappers.iter().any(|w| w == label);

    let mut removed = 0usize;
    for id in grammar.live_rule_ids() {
        let lhs = grammar.rule(id).lhs;
        if is_wrapper(grammar.label(lhs)) {
            grammar.symbol_mut(lhs).clear_usage();
        }

        let before = grammar.rule(id).rhs.len();
        let symbols = &grammar.symbols;
        grammar.rules[id.index()]
            .rhs
            .retain(|clause| !is_wrapper(&symbols[clause.symbol.index()].grammar_label));
        removed += before - grammar.rule(id).rhs.len();
    }
    tracing::debug!("Removed {} function-wrapper clauses", removed);
}

/// Stable-sort every rule's clauses by label.
pub(crate) fn alphabetise_rule_clauses(grammar: &mut Grammar) {
    let symbols = &grammar.symbols;
    for rule in grammar.rules.iter_mut().filter(|rule| !rule.retired) {
        rule.rhs.sort_by(|a, b| {
            symbols[a.symbol.index()]
                .grammar_label
                .cmp(&symbols[b.symbol.index()].grammar_label)
        });
    }
}

/// Remove repeated non-constructor clauses, keeping the first occurrence.
pub(crate) fn remove_duplicate_clauses(grammar: &mut Grammar) {
    let mut removed = 0usize;
    for rule in grammar.rules.iter_mut().filter(|rule| !rule.retired) {
        for n in (1..rule.rhs.len()).rev() {
            let clause = &rule.rhs[n];
            if !clause.is_constructor() && rule.rhs[..n].contains(clause) {
                rule.rhs.remove(n);
                removed += 1;
            }
        }
    }
    tracing::debug!("Removed {} duplicate clauses", removed);
}

/// Hide boxed-primitive rules and point arguments at the unboxed primitive.
pub(crate) fn filter_out_primitive_wrappers(grammar: &mut Grammar) {
    for id in grammar.live_rule_ids() {
        let rule = grammar.rule(id);
        let lhs = grammar.symbol(rule.lhs);
        if lhs.ludeme_type != LudemeType::Predefined {
            continue;
        }
        let forwards_to_self = matches!(
            rule.rhs.as_slice(),
            [only] if grammar.label(only.symbol) == lhs.grammar_label.as_str()
        );
        if forwards_to_self {
            let lhs = rule.lhs;
            let symbol = grammar.symbol_mut(lhs);
            symbol.used_in_grammar = false;
            symbol.used_in_metadata = false;
        }
    }

    let mut unboxed: FxHashMap<SymbolId, SymbolId> = FxHashMap::default();
    for symbol in grammar.symbols() {
        if symbol.ludeme_type != LudemeType::Predefined || symbol.nesting != 0 {
            continue;
        }
        if let Some(primitive) =
            unboxed_primitive(&symbol.path).and_then(|path| grammar.find_symbol(path, 0))
        {
            unboxed.insert(symbol.id, primitive);
        }
    }
    let targets = replace_arg_symbols(grammar, &unboxed);
    tracing::debug!("Unboxed arguments to {} primitives", targets.len());
}

/// Inline enums with a single value and drop their rules.
///
/// Only scalar enum rules whose one clause is a constant qualify; a
/// collection variant forwarding to an evaluator keeps its rule.
pub(crate) fn instantiate_single_enums(grammar: &mut Grammar) {
    let singles: FxHashMap<SymbolId, SymbolId> = grammar
        .rules()
        .filter(|rule| {
            let lhs = grammar.symbol(rule.lhs);
            lhs.is_enum_type()
                && lhs.nesting == 0
                && matches!(rule.rhs.as_slice(), [only] if grammar.symbol(only.symbol).is_enum_constant())
        })
        .map(|rule| (rule.lhs, rule.rhs[0].symbol))
        .collect();
    if singles.is_empty() {
        return;
    }

    let mut inlined = replace_arg_symbols(grammar, &singles);
    for rule in grammar.rules.iter_mut().filter(|rule| !rule.retired) {
        for clause in &mut rule.rhs {
            if clause.symbol != rule.lhs {
                if let Some(&value) = singles.get(&clause.symbol) {
                    clause.symbol = value;
                    inlined.insert(value);
                }
            }
        }
    }
    for value in inlined {
        grammar.symbol_mut(value).used_in_grammar = true;
    }

    let retired: Vec<RuleId> = singles
        .keys()
        .filter_map(|lhs| grammar.rule_id_of(*lhs))
        .collect();
    for id in retired {
        tracing::trace!("Inlined single-value enum {}", grammar.symbol(grammar.rule(id).lhs).path);
        grammar.retire_rule(id);
    }
    tracing::debug!("Inlined {} single-value enums", singles.len());
}

/// Point constructor arguments at replacement symbols; returns the
/// replacements that were actually written.
fn replace_arg_symbols(
    grammar: &mut Grammar,
    replacements: &FxHashMap<SymbolId, SymbolId>,
) -> FxHashSet<SymbolId> {
    let mut written = FxHashSet::default();
    for rule in grammar.rules.iter_mut().filter(|rule| !rule.retired) {
        for clause in &mut rule.rhs {
            for arg in clause.args.iter_mut().flatten() {
                if let Some(&replacement) = replacements.get(&arg.symbol) {
                    arg.symbol = replacement;
                    written.insert(replacement);
                }
            }
        }
    }
    written
}

/// Relabel rules still named after a function wrapper with the wrapper's effect.
pub(crate) fn tidy_up_format(grammar: &mut Grammar) {
    let wrappers: Vec<(String, SmolStr)> = FUNCTION_WRAPPERS
        .iter()
        .map(|(name, effect)| (lower_camel(name), SmolStr::from(lower_camel(effect))))
        .collect();

    for id in grammar.live_rule_ids() {
        let lhs = grammar.rule(id).lhs;
        let label = grammar.label(lhs);
        if let Some((_, effect)) = wrappers.iter().find(|(name, _)| label.contains(name.as_str())) {
            grammar.symbol_mut(lhs).grammar_label = effect.clone();
        }
    }
}
