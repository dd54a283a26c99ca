//! Name, keyword and prefix lookups.
//!
//! None of these fail: an unknown name gives an empty list.

use crate::grammar::{Grammar, Symbol, SymbolId};

impl Grammar {
    /// Symbols whose simple name is `name`.
    pub fn symbols_by_name(&self, name: &str) -> Vec<&Symbol> {
        self.resolve(self.lookup.by_name(name))
    }

    /// Symbols whose simple name, alias or token is `name`.
    pub fn symbol_list_from_class_name(&self, name: &str) -> Vec<&Symbol> {
        self.resolve(self.lookup.by_class_name(name))
    }

    /// Symbols whose token or grammar label is `keyword`.
    pub fn symbols_with_keyword(&self, keyword: &str) -> Vec<&Symbol> {
        self.resolve(self.lookup.by_keyword(keyword))
    }

    /// Symbols whose token starts with `prefix`.
    pub fn symbols_with_partial_keyword(&self, prefix: &str) -> Vec<&Symbol> {
        self.resolve(self.lookup.by_prefix(prefix))
    }

    fn resolve(&self, ids: &[SymbolId]) -> Vec<&Symbol> {
        ids.iter().map(|id| self.symbol(*id)).collect()
    }
}
