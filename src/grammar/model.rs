//! The grammar aggregate — arenas plus structural indexes.
//!
//! Symbols, rules and packages live in flat append-only vectors and refer to
//! each other by id. Two indexes keyed by `(path, nesting)` give the
//! structural "find" every pass relies on: one for symbols, one for rules.

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::config::GrammarConfig;
use super::diagnostics::DiagnosticCollector;
use super::ids::{ClassIdx, PackageId, RuleId, SymbolId};
use super::index::SymbolLookup;
use super::rule::{Clause, GrammarRule, PackageInfo};
use super::symbol::{Symbol, SymbolKey};
use crate::schema::ClassDescriptor;

/// A derived grammar.
///
/// Built once by [`Grammar::derive`](Self::derive) and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Grammar {
    pub(crate) config: GrammarConfig,
    /// Class facts, indexed by [`Symbol::class`].
    pub(crate) classes: Vec<ClassDescriptor>,

    pub(crate) symbols: Vec<Symbol>,
    pub(crate) symbols_by_key: FxHashMap<SymbolKey, SymbolId>,

    pub(crate) rules: Vec<GrammarRule>,
    pub(crate) rules_by_key: FxHashMap<SymbolKey, RuleId>,

    pub(crate) packages: Vec<PackageInfo>,
    /// Package path → id, in order of first sight.
    pub(crate) packages_by_path: IndexMap<SmolStr, PackageId>,
    /// Canonical package order, set by the closure engine.
    pub(crate) package_order: Vec<PackageId>,

    pub(crate) game_root: Option<SymbolId>,
    pub(crate) metadata_root: Option<SymbolId>,

    pub(crate) diagnostics: DiagnosticCollector,
    pub(crate) lookup: SymbolLookup,
}

impl Grammar {
    pub(crate) fn new(config: GrammarConfig) -> Self {
        Self {
            config,
            classes: Vec::new(),
            symbols: Vec::new(),
            symbols_by_key: FxHashMap::default(),
            rules: Vec::new(),
            rules_by_key: FxHashMap::default(),
            packages: Vec::new(),
            packages_by_path: IndexMap::new(),
            package_order: Vec::new(),
            game_root: None,
            metadata_root: None,
            diagnostics: DiagnosticCollector::new(),
            lookup: SymbolLookup::default(),
        }
    }

    pub fn config(&self) -> &GrammarConfig {
        &self.config
    }

    // ============================================================
    // Symbols
    // ============================================================

    /// Register `symbol` unless a structurally equal one exists.
    ///
    /// Returns the id of whichever symbol ends up registered.
    pub(crate) fn find_or_add_symbol(&mut self, mut symbol: Symbol) -> SymbolId {
        let key = symbol.key();
        if let Some(&existing) = self.symbols_by_key.get(&key) {
            return existing;
        }
        let id = SymbolId::new(self.symbols.len());
        symbol.id = id;
        self.symbols.push(symbol);
        self.symbols_by_key.insert(key, id);
        id
    }

    /// Get a symbol by id.
    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    pub(crate) fn symbol_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.index()]
    }

    /// Find the symbol with this path at this collection depth.
    pub fn find_symbol(&self, path: &str, nesting: usize) -> Option<SymbolId> {
        self.symbols_by_key
            .get(&(SmolStr::new(path), nesting))
            .copied()
    }

    /// All symbols in creation order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Snapshot of the current ids, so passes can add symbols while iterating.
    pub(crate) fn symbol_ids(&self) -> Vec<SymbolId> {
        (0..self.symbols.len()).map(SymbolId::new).collect()
    }

    /// Class descriptor behind a class-backed symbol.
    pub fn class_of(&self, id: SymbolId) -> Option<&ClassDescriptor> {
        self.symbol(id).class.map(|idx| &self.classes[idx])
    }

    pub(crate) fn add_class(&mut self, class: ClassDescriptor) -> ClassIdx {
        self.classes.push(class);
        self.classes.len() - 1
    }

    /// Game-model anchor symbol.
    pub fn game_root(&self) -> Option<SymbolId> {
        self.game_root
    }

    /// Metadata anchor symbol.
    pub fn metadata_root(&self) -> Option<SymbolId> {
        self.metadata_root
    }

    // ============================================================
    // Rules
    // ============================================================

    /// Find or create the rule whose left-hand side matches `lhs` structurally.
    pub(crate) fn get_rule(&mut self, lhs: SymbolId) -> RuleId {
        let key = self.symbol(lhs).key();
        if let Some(&id) = self.rules_by_key.get(&key) {
            return id;
        }
        let id = RuleId::new(self.rules.len());
        self.rules.push(GrammarRule::new(id, lhs));
        self.rules_by_key.insert(key, id);
        id
    }

    /// The live rule for `lhs`, if any.
    pub fn rule_of(&self, lhs: SymbolId) -> Option<&GrammarRule> {
        self.rule_id_of(lhs).map(|id| self.rule(id))
    }

    pub fn rule_id_of(&self, lhs: SymbolId) -> Option<RuleId> {
        self.rules_by_key.get(&self.symbol(lhs).key()).copied()
    }

    /// The live rule for the symbol at `path` (nesting 0), if any.
    pub fn rule_by_path(&self, path: &str) -> Option<&GrammarRule> {
        self.find_symbol(path, 0).and_then(|id| self.rule_of(id))
    }

    pub fn rule(&self, id: RuleId) -> &GrammarRule {
        &self.rules[id.index()]
    }

    pub(crate) fn rule_mut(&mut self, id: RuleId) -> &mut GrammarRule {
        &mut self.rules[id.index()]
    }

    /// Live (not retired) rules in creation order.
    pub fn rules(&self) -> impl Iterator<Item = &GrammarRule> {
        self.rules.iter().filter(|rule| !rule.retired)
    }

    pub(crate) fn live_rule_ids(&self) -> Vec<RuleId> {
        self.rules().map(|rule| rule.id).collect()
    }

    pub fn rule_count(&self) -> usize {
        self.rules().count()
    }

    /// Append a bare reference to `target` in `rule` unless already present.
    pub(crate) fn add_reference(&mut self, rule: RuleId, target: SymbolId) -> bool {
        self.rule_mut(rule).add_unique(Clause::reference(target))
    }

    /// Remove a rule from the structural index and empty it.
    pub(crate) fn retire_rule(&mut self, id: RuleId) {
        let key = self.symbol(self.rule(id).lhs).key();
        if self.rules_by_key.get(&key) == Some(&id) {
            self.rules_by_key.remove(&key);
        }
        let rule = self.rule_mut(id);
        rule.retired = true;
        rule.rhs.clear();
        for package in &mut self.packages {
            package.rules.retain(|r| *r != id);
        }
    }

    // ============================================================
    // Packages
    // ============================================================

    pub(crate) fn find_or_add_package(&mut self, path: &str) -> PackageId {
        if let Some(&id) = self.packages_by_path.get(path) {
            return id;
        }
        let id = PackageId::new(self.packages.len());
        self.packages.push(PackageInfo::new(id, path));
        self.packages_by_path.insert(SmolStr::new(path), id);
        id
    }

    pub fn package(&self, id: PackageId) -> &PackageInfo {
        &self.packages[id.index()]
    }

    /// All packages in order of first sight.
    pub fn packages(&self) -> &[PackageInfo] {
        &self.packages
    }

    pub fn find_package(&self, path: &str) -> Option<PackageId> {
        self.packages_by_path.get(path).copied()
    }

    /// Packages in canonical order.
    pub fn package_order(&self) -> impl Iterator<Item = &PackageInfo> {
        self.package_order.iter().map(|id| self.package(*id))
    }

    // ============================================================
    // Diagnostics
    // ============================================================

    /// Non-fatal conditions reported during derivation.
    pub fn diagnostics(&self) -> &DiagnosticCollector {
        &self.diagnostics
    }

    pub(crate) fn label(&self, id: SymbolId) -> &str {
        &self.symbols[id.index()].grammar_label
    }
}
