//! Rule derivation.
//!
//! One rule per left-hand-side symbol, built in three passes:
//!
//! ```text
//! create_rules                 ← constants, constructors, forwarding clauses
//!     │
//!     ▼
//! cross_reference_subclasses   ← <base> ::= <sub1> | <sub2> | ...
//!     │
//!     ▼
//! add_return_type_clauses      ← <returned type> ::= ... | <evaluator>
//! ```

use smol_str::SmolStr;

use super::diagnostics::codes;
use super::ids::{RuleId, SymbolId};
use super::model::Grammar;
use super::rule::{Clause, ClauseArg};
use super::symbol::LudemeType;
use super::symbol_table::in_root_namespace;
use crate::base::naming::parse_type_name;
use crate::schema::{ConstructorDescriptor, ParamAttributes};

/// Derive the initial rule set from all non-hidden symbols.
pub(crate) fn create_rules(grammar: &mut Grammar) {
    for id in grammar.symbol_ids() {
        let symbol = grammar.symbol(id);
        if symbol.hidden {
            continue;
        }

        if symbol.ludeme_type == LudemeType::Constant {
            let target = symbol.return_type();
            let rule = grammar.get_rule(target);
            grammar.rule_mut(rule).rhs.push(Clause::reference(id));
        } else if symbol.is_class()
            && symbol.ludeme_type.is_ludeme()
            && !symbol.is_abstract
            && symbol.nesting == 0
        {
            let rule = grammar.get_rule(id);
            expand_constructors(grammar, rule, id);
        } else if symbol.is_enum_type() {
            // Alternatives come from the enum's constants.
            grammar.get_rule(id);
        } else {
            let is_collection = symbol.nesting > 0;
            let rule = grammar.get_rule(id);
            // A collection never forwards to itself: no <list-of-X> ::= <list-of-X>.
            if !is_collection {
                grammar.rule_mut(rule).rhs.push(Clause::reference(id));
            }
        }
    }
    tracing::debug!("Created {} rules", grammar.rules.len());
}

/// Or/and grouping state while walking one parameter list.
#[derive(Default)]
struct GroupTracker {
    or_group: u32,
    and_group: u32,
    prev_or: u8,
    prev_and: u8,
}

impl GroupTracker {
    /// Group ids `(or, and)` for the next parameter.
    ///
    /// A run of parameters with the same annotation kind shares one id; the
    /// next annotated parameter after any change of kind opens a new one.
    fn next(&mut self, attrs: &ParamAttributes) -> (u32, u32) {
        let or_kind = if attrs.or {
            1
        } else if attrs.or2 {
            2
        } else {
            0
        };
        let and_kind = if attrs.and {
            1
        } else if attrs.and2 {
            2
        } else {
            0
        };

        if or_kind != 0 && or_kind != self.prev_or {
            self.or_group += 1;
        }
        if and_kind != 0 && and_kind != self.prev_and {
            self.and_group += 1;
        }
        self.prev_or = or_kind;
        self.prev_and = and_kind;

        (
            if or_kind != 0 { self.or_group } else { 0 },
            if and_kind != 0 { self.and_group } else { 0 },
        )
    }
}

/// Add one constructor clause per public constructor and `construct` factory.
///
/// Constructor clauses are appended unconditionally; two constructors that
/// happen to look alike both stay.
fn expand_constructors(grammar: &mut Grammar, rule: RuleId, id: SymbolId) {
    let Some(class) = grammar.class_of(id) else {
        return;
    };
    let constructors: Vec<ConstructorDescriptor> = class
        .constructors
        .iter()
        .filter(|ctor| ctor.is_grammar_constructor())
        .cloned()
        .collect();
    let owner = grammar.symbol(id).path.clone();

    for ctor in constructors {
        let mut groups = GroupTracker::default();
        let mut args = Vec::with_capacity(ctor.params.len());

        for param in &ctor.params {
            let (base_path, nesting) = parse_type_name(&param.type_name);
            let Some(base) = grammar.find_symbol(base_path, 0) else {
                grammar.diagnostics.warning(
                    codes::UNRESOLVED_PARAM_TYPE,
                    &owner,
                    format!("parameter type '{}' not found; skipped", param.type_name),
                );
                continue;
            };

            let attrs = &param.attributes;
            if attrs.or && attrs.or2 {
                grammar.diagnostics.warning(
                    codes::CONFLICTING_OR,
                    &owner,
                    format!("parameter '{}' is marked both or and or2", display_name(param.name.as_deref())),
                );
            }
            if attrs.and && attrs.and2 {
                grammar.diagnostics.warning(
                    codes::CONFLICTING_AND,
                    &owner,
                    format!("parameter '{}' is marked both and and and2", display_name(param.name.as_deref())),
                );
            }

            let (or_group, and_group) = groups.next(attrs);
            let name = param.name.as_deref().map(SmolStr::new);
            args.push(ClauseArg {
                symbol: base,
                label: if attrs.named { name.clone() } else { None },
                name,
                optional: attrs.optional,
                or_group,
                and_group,
                nesting,
            });
        }

        grammar
            .rule_mut(rule)
            .rhs
            .push(Clause::constructor(id, args, ctor.hidden));
    }
}

fn display_name(name: Option<&str>) -> &str {
    name.unwrap_or("<unnamed>")
}

/// Link every class into the rule of its superclass.
pub(crate) fn cross_reference_subclasses(grammar: &mut Grammar) {
    let mut added = 0usize;
    for id in grammar.symbol_ids() {
        let symbol = grammar.symbol(id);
        if symbol.hidden || !symbol.is_class() || symbol.nesting != 0 {
            continue;
        }
        let Some(super_path) = grammar.class_of(id).and_then(|c| c.superclass.clone()) else {
            continue;
        };

        let Some(parent) = grammar.find_symbol(&super_path, 0) else {
            if in_root_namespace(grammar, &super_path) {
                let path = grammar.symbol(id).path.clone();
                grammar.diagnostics.warning(
                    codes::UNRESOLVED_SUPERCLASS,
                    &path,
                    format!("superclass '{super_path}' not found"),
                );
            }
            continue;
        };

        if let Some(rule) = grammar.rule_id_of(parent) {
            if grammar.add_reference(rule, id) {
                added += 1;
            }
        }
    }
    tracing::debug!("Cross-referenced {} subclasses", added);
}

/// Let evaluators appear wherever their return type is expected.
pub(crate) fn add_return_type_clauses(grammar: &mut Grammar) {
    let mut added = 0usize;
    for id in grammar.symbol_ids() {
        let symbol = grammar.symbol(id);
        if symbol.hidden || !symbol.is_class() || symbol.nesting != 0 || symbol.returns_self() {
            continue;
        }
        let target = symbol.return_type();
        let rule = grammar.get_rule(target);
        if grammar.add_reference(rule, id) {
            added += 1;
        }
    }
    tracing::debug!("Added {} return-type clauses", added);
}
