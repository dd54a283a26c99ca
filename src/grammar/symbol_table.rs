//! Symbol table construction.
//!
//! Seeds the arena with the fixed tables, adds one symbol per class of the
//! two root namespaces, then refines those symbols in a fixed order:
//! hidden flags, abstract flags, enums, ludeme classification, return-type
//! redirection, root lookup. Name collisions are resolved afterwards by
//! [`disambiguate_symbols`].

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::diagnostics::codes;
use super::error::GrammarError;
use super::ids::SymbolId;
use super::model::Grammar;
use super::symbol::{LudemeType, Symbol};
use crate::base::constants::{
    APPLICATION_CONSTANTS, CONSTANTS_NAMESPACE, INT_PRIMITIVE, PREDEFINED, PRIMITIVES,
};
use crate::base::naming::{is_within, lower_camel, parse_type_name};
use crate::schema::{ClassDescriptor, TypeProvider};

/// Build every symbol of the grammar and locate the two roots.
pub(crate) fn build_symbol_table<P: TypeProvider + ?Sized>(
    grammar: &mut Grammar,
    provider: &P,
) -> Result<(), GrammarError> {
    add_primitives(grammar);
    add_predefined(grammar);
    add_application_constants(grammar);

    let namespaces: Vec<String> = grammar
        .config
        .namespaces()
        .iter()
        .map(|ns| ns.to_string())
        .collect();
    for namespace in &namespaces {
        let classes = provider.list_classes(namespace)?;
        tracing::debug!("Namespace '{}': {} classes", namespace, classes.len());
        for class in classes {
            add_class_symbol(grammar, class);
        }
    }

    mark_hidden(grammar);
    mark_abstract(grammar);
    handle_enums(grammar);
    classify_ludemes(grammar);
    override_return_types(grammar);
    locate_roots(grammar)?;

    tracing::debug!("Symbol table built: {} symbols", grammar.symbols.len());
    Ok(())
}

// ============================================================================
// SEED TABLES
// ============================================================================

fn add_primitives(grammar: &mut Grammar) {
    for (path, label) in PRIMITIVES {
        grammar.find_or_add_symbol(Symbol::new(LudemeType::Primitive, *path, *path, *label));
    }
}

fn add_predefined(grammar: &mut Grammar) {
    for (path, name, label) in PREDEFINED {
        grammar.find_or_add_symbol(Symbol::new(LudemeType::Predefined, *path, *name, *label));
    }
}

/// Sentinels are integers: they return the `int` primitive.
fn add_application_constants(grammar: &mut Grammar) {
    let int = grammar.find_symbol(INT_PRIMITIVE, 0);
    for (name, _value) in APPLICATION_CONSTANTS {
        let path = format!("{CONSTANTS_NAMESPACE}.{name}");
        let mut symbol = Symbol::new(LudemeType::Constant, path, *name, *name);
        symbol.return_type = int;
        grammar.find_or_add_symbol(symbol);
    }
}

// ============================================================================
// CLASS SYMBOLS
// ============================================================================

fn add_class_symbol(grammar: &mut Grammar, class: ClassDescriptor) {
    if grammar.find_symbol(&class.qualified_name, 0).is_some() {
        grammar.diagnostics.warning(
            codes::DUPLICATE_CLASS,
            &class.qualified_name,
            "class listed more than once; keeping the first entry",
        );
        return;
    }

    let name = class.simple_name().to_string();
    let alias = class.attributes.alias.clone();
    let token = alias.clone().unwrap_or_else(|| lower_camel(&name));
    let package = grammar.find_or_add_package(class.package());

    let mut symbol = Symbol::new(
        LudemeType::Ludeme,
        class.qualified_name.as_str(),
        name,
        token,
    );
    symbol.alias = alias.map(SmolStr::from);
    symbol.pack = Some(package);
    symbol.class = Some(grammar.add_class(class));

    let id = grammar.find_or_add_symbol(symbol);
    tracing::trace!("Class symbol {:?}: {}", id, grammar.symbol(id).path());
}

fn class_symbols(grammar: &Grammar) -> Vec<SymbolId> {
    grammar
        .symbol_ids()
        .into_iter()
        .filter(|id| grammar.symbol(*id).is_class())
        .collect()
}

fn mark_hidden(grammar: &mut Grammar) {
    for id in class_symbols(grammar) {
        let hidden = grammar.class_of(id).is_some_and(|c| c.attributes.hidden);
        grammar.symbol_mut(id).hidden = hidden;
    }
}

fn mark_abstract(grammar: &mut Grammar) {
    for id in class_symbols(grammar) {
        let is_abstract = grammar
            .class_of(id)
            .is_some_and(|c| c.is_abstract || c.is_interface());
        grammar.symbol_mut(id).is_abstract = is_abstract;
    }
}

// ============================================================================
// ENUMS
// ============================================================================

/// Enum classes become structural symbols with one constant per value.
///
/// Enums nested inside a class get a structural symbol of their own at
/// `Outer.Inner`.
fn handle_enums(grammar: &mut Grammar) {
    for id in class_symbols(grammar) {
        let Some(class) = grammar.class_of(id).cloned() else {
            continue;
        };

        if class.is_enum() {
            let symbol = grammar.symbol_mut(id);
            symbol.ludeme_type = LudemeType::Structural;
            symbol.is_enum = true;
            add_enum_constants(grammar, id, &class.enum_constants);
        }

        for nested in &class.nested_enums {
            let outer = grammar.symbol(id);
            let path = format!("{}.{}", outer.path, nested.name);
            let mut symbol = Symbol::new(
                LudemeType::Structural,
                path,
                nested.name.as_str(),
                lower_camel(&nested.name),
            );
            symbol.is_enum = true;
            symbol.hidden = outer.hidden;
            symbol.pack = outer.pack;
            let enum_id = grammar.find_or_add_symbol(symbol);
            add_enum_constants(grammar, enum_id, &nested.constants);
        }
    }
}

fn add_enum_constants(grammar: &mut Grammar, enum_id: SymbolId, values: &[String]) {
    let owner = grammar.symbol(enum_id);
    let (owner_path, hidden, pack) = (owner.path.clone(), owner.hidden, owner.pack);

    for value in values {
        let mut symbol = Symbol::new(
            LudemeType::Constant,
            format!("{owner_path}.{value}"),
            value.as_str(),
            value.as_str(),
        );
        symbol.return_type = Some(enum_id);
        symbol.is_enum = true;
        symbol.hidden = hidden;
        symbol.pack = pack;
        grammar.find_or_add_symbol(symbol);
    }
}

// ============================================================================
// CLASSIFICATION AND RETURN TYPES
// ============================================================================

/// Factory-dispatching classes are super ludemes; parts of one are sub ludemes.
fn classify_ludemes(grammar: &mut Grammar) {
    for id in class_symbols(grammar) {
        if grammar.symbol(id).is_enum {
            continue;
        }
        let Some(class) = grammar.class_of(id) else {
            continue;
        };
        let has_factories = class.has_factories();
        let parent_path = class.sub_ludeme_of.clone();

        if has_factories {
            grammar.symbol_mut(id).ludeme_type = LudemeType::SuperLudeme;
        }

        if let Some(parent_path) = parent_path {
            match grammar.find_symbol(&parent_path, 0) {
                Some(parent) if parent != id => {
                    let symbol = grammar.symbol_mut(id);
                    symbol.ludeme_type = LudemeType::SubLudeme;
                    symbol.sub_ludeme_of = Some(parent);
                }
                _ => {
                    let path = grammar.symbol(id).path.clone();
                    grammar.diagnostics.warning(
                        codes::UNRESOLVED_SUB_LUDEME_PARENT,
                        &path,
                        format!("unknown sub-ludeme parent '{parent_path}'"),
                    );
                }
            }
        }
    }
}

/// Point each evaluating class at the symbol its value has.
///
/// When the declared return type is a collection, the matching nested
/// variant of the return symbol is created on demand; the shared scalar
/// symbol is never changed.
fn override_return_types(grammar: &mut Grammar) {
    for id in class_symbols(grammar) {
        let symbol = grammar.symbol(id);
        if symbol.is_abstract || symbol.is_enum {
            continue;
        }
        let Some(declared) = grammar.class_of(id).and_then(|c| c.eval_return.clone()) else {
            continue;
        };

        let (base_path, nesting) = parse_type_name(&declared);
        let Some(base) = grammar.find_symbol(base_path, 0) else {
            let path = grammar.symbol(id).path.clone();
            grammar.diagnostics.warning(
                codes::UNRESOLVED_RETURN_TYPE,
                &path,
                format!("unknown return type '{declared}'"),
            );
            continue;
        };

        let target = if grammar.symbol(base).nesting != nesting {
            let variant = grammar.symbol(base).nested_variant(nesting);
            grammar.find_or_add_symbol(variant)
        } else {
            base
        };

        if target != id {
            grammar.symbol_mut(id).return_type = Some(target);
            tracing::trace!(
                "Return type of {} redirected to {}[{}]",
                grammar.symbol(id).path,
                grammar.symbol(target).path,
                nesting
            );
        }
    }
}

fn locate_roots(grammar: &mut Grammar) -> Result<(), GrammarError> {
    let game = grammar
        .find_symbol(&grammar.config.game_root, 0)
        .ok_or_else(|| GrammarError::MissingRoot(grammar.config.game_root.clone()))?;
    let metadata = grammar
        .find_symbol(&grammar.config.metadata_root, 0)
        .ok_or_else(|| GrammarError::MissingRoot(grammar.config.metadata_root.clone()))?;
    grammar.game_root = Some(game);
    grammar.metadata_root = Some(metadata);
    Ok(())
}

// ============================================================================
// DISAMBIGUATION
// ============================================================================

/// Give colliding class symbols distinct labels.
///
/// Each symbol sharing its simple name with another is labelled against
/// every peer; the longest label found wins, so the result differs from all
/// peers and not just one. Nested variants take the label of their scalar
/// symbol.
pub(crate) fn disambiguate_symbols(grammar: &mut Grammar) {
    let mut by_name: FxHashMap<SmolStr, Vec<SymbolId>> = FxHashMap::default();
    for symbol in &grammar.symbols {
        if symbol.nesting == 0 && is_class_backed(symbol) {
            by_name.entry(symbol.name.clone()).or_default().push(symbol.id);
        }
    }

    let mut relabels = Vec::new();
    for peers in by_name.values().filter(|peers| peers.len() > 1) {
        for &a in peers {
            let mut best = String::new();
            for &b in peers {
                if a == b {
                    continue;
                }
                if let Some(label) = disambiguation(grammar.symbol(a), grammar.symbol(b)) {
                    if label.len() > best.len() {
                        best = label;
                    }
                }
            }
            if !best.is_empty() {
                relabels.push((a, best));
            }
        }
    }

    for (id, label) in relabels {
        tracing::trace!("Disambiguated {} as '{}'", grammar.symbol(id).path, label);
        grammar.symbol_mut(id).grammar_label = SmolStr::from(label);
    }

    for id in grammar.symbol_ids() {
        let symbol = grammar.symbol(id);
        if symbol.nesting == 0 {
            continue;
        }
        if let Some(base) = grammar.find_symbol(&symbol.path, 0) {
            let label = grammar.symbol(base).grammar_label.clone();
            grammar.symbol_mut(id).grammar_label = label;
        }
    }
}

fn is_class_backed(symbol: &Symbol) -> bool {
    symbol.ludeme_type.is_ludeme() || symbol.ludeme_type == LudemeType::Structural
}

/// Shortest package suffix of `a` that tells it apart from `b`, plus a's token.
///
/// Package segments are compared right to left. `game.functions.ints.count.Count`
/// against `game.rules.play.moves.count.Count` gives `ints.count.count`.
/// Returns `None` for symbols that cannot collide.
pub(crate) fn disambiguation(a: &Symbol, b: &Symbol) -> Option<String> {
    if a.name != b.name || a.path == b.path {
        return None;
    }

    let package_a: Vec<&str> = a.path.split('.').collect();
    let package_b: Vec<&str> = b.path.split('.').collect();
    let package_a = &package_a[..package_a.len() - 1];
    let package_b = &package_b[..package_b.len() - 1];

    let mut level = 1;
    while level <= package_a.len() {
        let segment = package_a[package_a.len() - level];
        let other = package_b
            .len()
            .checked_sub(level)
            .map(|idx| package_b[idx]);
        if other != Some(segment) {
            break;
        }
        level += 1;
    }
    let level = level.min(package_a.len());

    let mut label = package_a[package_a.len() - level..].join(".");
    if !label.is_empty() {
        label.push('.');
    }
    label.push_str(&a.token);
    Some(label)
}

/// Whether `path` belongs to one of the grammar's root namespaces.
pub(crate) fn in_root_namespace(grammar: &Grammar, path: &str) -> bool {
    grammar
        .config
        .namespaces()
        .iter()
        .any(|ns| is_within(path, ns))
}
