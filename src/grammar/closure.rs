//! Closure engine — reachability, package order, ancestors.
//!
//! All traversals run over visited-marked finite graphs with an explicit
//! stack, so arbitrarily deep class hierarchies cannot overflow the call
//! stack. Children are pushed in reverse so nodes are popped in the same
//! preorder a recursive walk would produce.

use indexmap::IndexSet;
use rustc_hash::FxHashMap;

use super::ids::{PackageId, SymbolId};
use super::model::Grammar;
use super::rule::Clause;
use super::symbol::LudemeType;
use crate::base::constants::TRAILING_PACKAGE_GROUPS;
use crate::base::naming::is_within;

/// Which root a traversal starts from, and so which usage flag it sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RootKind {
    Game,
    Metadata,
}

// ============================================================================
// ROOT TRAVERSAL
// ============================================================================

/// Walk everything reachable from one root, flagging usage and depth.
pub(crate) fn visit_symbols(grammar: &mut Grammar, root: RootKind) {
    let start = match root {
        RootKind::Game => grammar.game_root,
        RootKind::Metadata => grammar.metadata_root,
    };
    let Some(start) = start else {
        return;
    };

    for symbol in &mut grammar.symbols {
        symbol.visited = false;
    }
    let returners = returners_by_type(grammar);

    let mut stack = vec![(start, 0usize)];
    let mut count = 0usize;
    while let Some((id, depth)) = stack.pop() {
        let symbol = grammar.symbol_mut(id);
        if symbol.depth.is_none_or(|d| d > depth) {
            symbol.depth = Some(depth);
        }
        if symbol.visited {
            continue;
        }
        symbol.visited = true;
        count += 1;
        match root {
            RootKind::Game => symbol.used_in_grammar = true,
            RootKind::Metadata => symbol.used_in_metadata = true,
        }

        if symbol.ludeme_type == LudemeType::Constant {
            continue;
        }
        // Abstract and hidden symbols are passed through without adding depth.
        let next = if symbol.is_abstract || symbol.hidden {
            depth
        } else {
            depth + 1
        };
        let Some(rule) = grammar.rule_of(id) else {
            continue;
        };

        let mut children = Vec::new();
        for clause in &rule.rhs {
            children.push(clause.symbol);
            children.extend(returners.get(&clause.symbol).into_iter().flatten());
            for arg in clause.args.iter().flatten() {
                children.push(arg.symbol);
                let returned = grammar
                    .find_symbol(&grammar.symbol(arg.symbol).path, arg.nesting)
                    .unwrap_or(arg.symbol);
                children.extend(returners.get(&returned).into_iter().flatten());
            }
        }
        stack.extend(children.into_iter().rev().map(|child| (child, next)));
    }
    tracing::debug!("Visited {} symbols from {:?} root", count, root);
}

/// Rule LHS symbols grouped by the type they return, when not themselves.
fn returners_by_type(grammar: &Grammar) -> FxHashMap<SymbolId, Vec<SymbolId>> {
    let mut returners: FxHashMap<SymbolId, Vec<SymbolId>> = FxHashMap::default();
    for rule in grammar.rules() {
        let lhs = grammar.symbol(rule.lhs);
        if !lhs.returns_self() {
            returners.entry(lhs.return_type()).or_default().push(rule.lhs);
        }
    }
    returners
}

// ============================================================================
// PACKAGE ORDER
// ============================================================================

/// Order packages, and the rules inside them, by first visit from the game root.
///
/// Rules only reachable from elsewhere (the metadata tree) follow in creation
/// order. Infrastructure package groups are then moved to the end.
pub(crate) fn set_package_order(grammar: &mut Grammar) {
    for symbol in &mut grammar.symbols {
        symbol.visited = false;
    }
    for package in &mut grammar.packages {
        package.rules.clear();
    }
    grammar.package_order.clear();

    if let Some(root) = grammar.game_root {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if grammar.symbol(id).visited {
                continue;
            }
            grammar.symbol_mut(id).visited = true;
            place_rule(grammar, id);

            let Some(rule) = grammar.rule_of(id) else {
                continue;
            };
            let children: Vec<SymbolId> = rule.rhs.iter().flat_map(clause_symbols).collect();
            stack.extend(children.into_iter().rev());
        }
    }

    for id in grammar.live_rule_ids() {
        let lhs = grammar.rule(id).lhs;
        let symbol = grammar.symbol(lhs);
        if symbol.used_in_grammar || symbol.used_in_metadata {
            place_rule(grammar, lhs);
        }
    }

    let (mut order, mut trailing): (Vec<PackageId>, Vec<PackageId>) = grammar
        .package_order
        .iter()
        .partition(|id| trailing_group(grammar.package(**id).path()).is_none());
    trailing.sort_by_key(|id| trailing_group(grammar.package(*id).path()));
    order.extend(trailing);
    grammar.package_order = order;

    tracing::debug!("Package order: {} packages", grammar.package_order.len());
}

fn clause_symbols(clause: &Clause) -> impl Iterator<Item = SymbolId> + '_ {
    std::iter::once(clause.symbol).chain(clause.args.iter().flatten().map(|arg| arg.symbol))
}

/// Append the rule of `lhs` to its package, registering the package on first sight.
fn place_rule(grammar: &mut Grammar, lhs: SymbolId) {
    let Some(rule) = grammar.rule_id_of(lhs) else {
        return;
    };
    let Some(pack) = grammar.symbol(lhs).pack else {
        return;
    };
    if !grammar.package_order.contains(&pack) {
        grammar.package_order.push(pack);
    }
    let rules = &mut grammar.packages[pack.index()].rules;
    if !rules.contains(&rule) {
        rules.push(rule);
    }
}

fn trailing_group(path: &str) -> Option<usize> {
    TRAILING_PACKAGE_GROUPS
        .iter()
        .position(|group| is_within(path, group))
}

// ============================================================================
// USAGE FLAGS
// ============================================================================

/// Flag clause symbols that appear literally in descriptions.
pub(crate) fn set_used_in_description(grammar: &mut Grammar) {
    let mut described = Vec::new();
    for rule in grammar.rules() {
        if !grammar.symbol(rule.lhs).used_in_grammar {
            continue;
        }
        for clause in &rule.rhs {
            if clause.is_constructor() || grammar.symbol(clause.symbol).is_terminal() {
                described.push(clause.symbol);
            }
            for arg in clause.args.iter().flatten() {
                if grammar.symbol(arg.symbol).is_terminal() {
                    described.push(arg.symbol);
                }
            }
        }
    }
    for id in described {
        grammar.symbol_mut(id).used_in_description = true;
    }
}

/// Close `used_in_grammar` over the rule graph.
///
/// Seeds from every described symbol, then follows clause references from
/// each newly flagged symbol exactly once.
pub(crate) fn set_used_in_grammar(grammar: &mut Grammar) {
    let mut worklist = Vec::new();
    for symbol in &mut grammar.symbols {
        if symbol.used_in_description {
            symbol.used_in_grammar = true;
        }
        if symbol.used_in_grammar {
            worklist.push(symbol.id);
        }
    }

    let mut flagged = 0usize;
    while let Some(id) = worklist.pop() {
        let Some(rule) = grammar.rule_of(id) else {
            continue;
        };
        let targets: Vec<SymbolId> = rule
            .rhs
            .iter()
            .map(|clause| clause.symbol)
            .filter(|target| !grammar.symbol(*target).used_in_grammar)
            .collect();
        for target in targets {
            let symbol = grammar.symbol_mut(target);
            if !symbol.used_in_grammar {
                symbol.used_in_grammar = true;
                flagged += 1;
                worklist.push(target);
            }
        }
    }
    tracing::debug!("Reachability closure flagged {} more symbols", flagged);
}

// ============================================================================
// ANCESTORS
// ============================================================================

/// Close every symbol's ancestor set over superclass, return-type and
/// sub-ludeme links.
pub(crate) fn find_ancestors(grammar: &mut Grammar) {
    for id in grammar.symbol_ids() {
        let chain = superclass_chain(grammar, id);
        grammar.symbol_mut(id).ancestors.extend(chain);
    }

    for id in grammar.symbol_ids() {
        let symbol = grammar.symbol(id);
        if symbol.returns_self() {
            continue;
        }
        let target = symbol.return_type();
        let inherited = grammar.symbol(target).ancestors.clone();
        let ancestors = &mut grammar.symbol_mut(id).ancestors;
        ancestors.insert(target);
        ancestors.extend(inherited);
    }

    for id in grammar.symbol_ids() {
        let Some(parent) = grammar.symbol(id).sub_ludeme_of else {
            continue;
        };
        let inherited = grammar.symbol(parent).ancestors.clone();
        let ancestors = &mut grammar.symbol_mut(id).ancestors;
        ancestors.insert(parent);
        ancestors.extend(inherited);
    }

    // Links resolved above may expose more ancestors; repeat until nothing grows.
    let mut rounds = 0usize;
    loop {
        rounds += 1;
        let mut changed = false;
        for id in grammar.symbol_ids() {
            let inherited = inherited_ancestors(grammar, id);
            let ancestors = &mut grammar.symbol_mut(id).ancestors;
            let before = ancestors.len();
            ancestors.extend(inherited);
            changed |= ancestors.len() != before;
        }
        if !changed {
            break;
        }
    }
    tracing::debug!("Ancestor closure stable after {} rounds", rounds);
}

fn superclass_chain(grammar: &Grammar, id: SymbolId) -> IndexSet<SymbolId> {
    let mut chain = IndexSet::new();
    let mut current = id;
    while let Some(super_path) = grammar
        .class_of(current)
        .and_then(|class| class.superclass.as_deref())
    {
        let Some(parent) = grammar.find_symbol(super_path, 0) else {
            break;
        };
        if parent == id || !chain.insert(parent) {
            break;
        }
        current = parent;
    }
    chain
}

fn inherited_ancestors(grammar: &Grammar, id: SymbolId) -> Vec<SymbolId> {
    let symbol = grammar.symbol(id);
    let mut inherited = Vec::new();
    if !symbol.returns_self() {
        let target = symbol.return_type();
        inherited.push(target);
        inherited.extend(grammar.symbol(target).ancestors.iter().copied());
        if let Some(scalar) = grammar.find_symbol(&grammar.symbol(target).path, 0) {
            if scalar != id {
                inherited.push(scalar);
                inherited.extend(grammar.symbol(scalar).ancestors.iter().copied());
            }
        }
    }
    if let Some(parent) = symbol.sub_ludeme_of {
        inherited.push(parent);
        inherited.extend(grammar.symbol(parent).ancestors.iter().copied());
    }
    inherited
}
