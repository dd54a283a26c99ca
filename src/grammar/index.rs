//! Lookup maps built once derivation is complete.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::ids::SymbolId;
use super::symbol::Symbol;

/// Name, keyword and prefix maps over a finished symbol table.
///
/// Every list keeps symbol creation order, so lookups are deterministic.
#[derive(Debug, Clone, Default)]
pub(crate) struct SymbolLookup {
    /// Simple name → symbols.
    names: FxHashMap<SmolStr, Vec<SymbolId>>,
    /// Simple name, alias or token → symbols.
    class_names: FxHashMap<SmolStr, Vec<SymbolId>>,
    /// Token or grammar label → symbols.
    keywords: FxHashMap<SmolStr, Vec<SymbolId>>,
    /// Every non-empty prefix of a token → symbols.
    prefixes: FxHashMap<SmolStr, Vec<SymbolId>>,
}

impl SymbolLookup {
    pub(crate) fn build(symbols: &[Symbol]) -> Self {
        let mut lookup = Self::default();
        for symbol in symbols {
            let id = symbol.id;
            push_unique(&mut lookup.names, &symbol.name, id);

            push_unique(&mut lookup.class_names, &symbol.name, id);
            push_unique(&mut lookup.class_names, &symbol.token, id);
            if let Some(alias) = &symbol.alias {
                push_unique(&mut lookup.class_names, alias, id);
            }

            push_unique(&mut lookup.keywords, &symbol.token, id);
            push_unique(&mut lookup.keywords, &symbol.grammar_label, id);

            for (end, c) in symbol.token.char_indices() {
                let prefix = &symbol.token[..end + c.len_utf8()];
                push_unique(&mut lookup.prefixes, prefix, id);
            }
        }
        tracing::debug!(
            "Lookup index: {} names, {} prefixes",
            lookup.names.len(),
            lookup.prefixes.len()
        );
        lookup
    }

    pub(crate) fn by_name(&self, name: &str) -> &[SymbolId] {
        get(&self.names, name)
    }

    pub(crate) fn by_class_name(&self, name: &str) -> &[SymbolId] {
        get(&self.class_names, name)
    }

    pub(crate) fn by_keyword(&self, keyword: &str) -> &[SymbolId] {
        get(&self.keywords, keyword)
    }

    pub(crate) fn by_prefix(&self, prefix: &str) -> &[SymbolId] {
        get(&self.prefixes, prefix)
    }
}

fn get<'a>(map: &'a FxHashMap<SmolStr, Vec<SymbolId>>, key: &str) -> &'a [SymbolId] {
    map.get(key).map(Vec::as_slice).unwrap_or_default()
}

fn push_unique(map: &mut FxHashMap<SmolStr, Vec<SymbolId>>, key: &str, id: SymbolId) {
    if key.is_empty() {
        return;
    }
    let ids = map.entry(SmolStr::new(key)).or_default();
    if !ids.contains(&id) {
        ids.push(id);
    }
}
