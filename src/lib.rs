//! # ludeme-grammar
//!
//! Derives the context-free grammar of a game-description language from the
//! class structure of its game model.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! query     → Lookups, cursor context, build-once host, export
//!   ↓
//! grammar   → Symbol table, rules, linker, closure engine, canonical form
//!   ↓
//! schema    → Class descriptors, TypeProvider, schema files
//!   ↓
//! base      → Seed tables, naming and text helpers
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use ludeme::{Grammar, Schema};
//!
//! let schema = Schema::from_dir("schema/".as_ref())?;
//! let grammar = Grammar::derive_default(&schema)?;
//! let paths = grammar.class_paths("(board (square 8))", 3, false);
//! ```

// ============================================================================
// MODULES (dependency order: base → schema → grammar → query)
// ============================================================================

/// Foundation: seed tables, qualified-path helpers, token boundaries
pub mod base;

/// Class facts the grammar is derived from
pub mod schema;

/// Grammar derivation pipeline and the derived model
pub mod grammar;

/// Read-only services over a derived grammar
pub mod query;

// Re-export the types most callers need
pub use grammar::{
    Clause, ClauseArg, Grammar, GrammarConfig, GrammarDiagnostic, GrammarError, GrammarRule,
    LudemeType, Symbol, SymbolId,
};
pub use query::{CursorContext, ExportError, GrammarFormatter, GrammarHost, PlainFormatter};
pub use schema::{ClassDescriptor, Schema, SchemaError, TypeProvider};
