use super::canonical::{
    alphabetise_rule_clauses, filter_out_primitive_wrappers, instantiate_single_enums,
    remove_duplicate_clauses, remove_redundant_function_names, tidy_up_format,
};
use super::closure::{
    RootKind, find_ancestors, set_package_order, set_used_in_description, set_used_in_grammar,
    visit_symbols,
};
use super::config::GrammarConfig;
use super::error::GrammarError;
use super::index::SymbolLookup;
use super::linker::link;
use super::model::Grammar;
use super::rule_builder::{add_return_type_clauses, create_rules, cross_reference_subclasses};
use super::symbol_table::{build_symbol_table, disambiguate_symbols};
use crate::schema::TypeProvider;

impl Grammar {
    /// Derive the grammar for the class graph `provider` describes.
    ///
    /// Runs every stage to completion on the calling thread. Fails only if a
    /// root class or the `int` rule is missing, or the provider fails;
    /// everything else is recorded in [`diagnostics`](Self::diagnostics).
    pub fn derive<P: TypeProvider + ?Sized>(
        provider: &P,
        config: GrammarConfig,
    ) -> Result<Grammar, GrammarError> {
        let mut grammar = Grammar::new(config);

        build_symbol_table(&mut grammar, provider)?;
        disambiguate_symbols(&mut grammar);

        create_rules(&mut grammar);
        cross_reference_subclasses(&mut grammar);
        add_return_type_clauses(&mut grammar);
        link(&mut grammar)?;

        visit_symbols(&mut grammar, RootKind::Game);
        visit_symbols(&mut grammar, RootKind::Metadata);
        set_package_order(&mut grammar);

        remove_redundant_function_names(&mut grammar);
        alphabetise_rule_clauses(&mut grammar);
        remove_duplicate_clauses(&mut grammar);
        set_used_in_description(&mut grammar);
        set_used_in_grammar(&mut grammar);
        filter_out_primitive_wrappers(&mut grammar);
        instantiate_single_enums(&mut grammar);
        tidy_up_format(&mut grammar);
        find_ancestors(&mut grammar);

        grammar.lookup = SymbolLookup::build(&grammar.symbols);

        tracing::debug!(
            "Derived grammar: {} symbols, {} rules, {} diagnostics",
            grammar.symbols.len(),
            grammar.rule_count(),
            grammar.diagnostics.len()
        );
        Ok(grammar)
    }

    /// Derive with the standard namespaces and roots.
    pub fn derive_default<P: TypeProvider + ?Sized>(provider: &P) -> Result<Grammar, GrammarError> {
        Self::derive(provider, GrammarConfig::default())
    }
}
