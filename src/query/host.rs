//! Build-once grammar host.
//!
//! The grammar is derived on first request and shared afterwards:
//!
//! ```ignore
//! use ludeme::query::GrammarHost;
//!
//! let host = GrammarHost::new(schema);
//! let grammar = host.grammar()?;      // derives (slow)
//! let again = host.grammar()?;        // same Arc (instant)
//! ```

use std::path::Path;
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use super::export::{ExportError, GrammarFormatter, PlainFormatter};
use crate::grammar::{Grammar, GrammarConfig, GrammarError};
use crate::schema::TypeProvider;

/// Owns a class provider and the grammar derived from it.
///
/// Concurrent first callers block while one of them derives; all of them
/// then see the same [`Arc<Grammar>`]. A failed derivation is not cached:
/// the caller that ran it gets the error and the next caller tries again.
pub struct GrammarHost<P> {
    provider: P,
    config: GrammarConfig,
    grammar: OnceLock<Arc<Grammar>>,
    deriving: Mutex<()>,
}

impl<P: TypeProvider> GrammarHost<P> {
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, GrammarConfig::default())
    }

    pub fn with_config(provider: P, config: GrammarConfig) -> Self {
        Self {
            provider,
            config,
            grammar: OnceLock::new(),
            deriving: Mutex::new(()),
        }
    }

    /// The derived grammar, deriving it first if no caller has yet.
    pub fn grammar(&self) -> Result<Arc<Grammar>, GrammarError> {
        if let Some(grammar) = self.grammar.get() {
            return Ok(Arc::clone(grammar));
        }

        let _guard = self.deriving.lock();
        if let Some(grammar) = self.grammar.get() {
            return Ok(Arc::clone(grammar));
        }

        tracing::debug!("Deriving grammar");
        let derived = Arc::new(Grammar::derive(&self.provider, self.config.clone())?);
        Ok(Arc::clone(self.grammar.get_or_init(|| derived)))
    }

    /// The grammar if it has been derived already.
    pub fn get(&self) -> Option<Arc<Grammar>> {
        self.grammar.get().cloned()
    }

    pub fn is_derived(&self) -> bool {
        self.grammar.get().is_some()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &GrammarConfig {
        &self.config
    }

    /// Derive if needed, then write the grammar to `path` in the plain format.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        self.export_with(path, &PlainFormatter)
    }

    pub fn export_with<F: GrammarFormatter + ?Sized>(
        &self,
        path: impl AsRef<Path>,
        formatter: &F,
    ) -> Result<(), ExportError> {
        self.grammar()?.export_with(path, formatter)
    }
}
