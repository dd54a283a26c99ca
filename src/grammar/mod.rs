//! Grammar derivation — from class facts to canonical production rules.
//!
//! ## Key Types
//!
//! - [`Grammar`] — The derived grammar: symbol, rule and package arenas
//! - [`Symbol`] — A terminal or nonterminal, identified by `(path, nesting)`
//! - [`GrammarRule`] — All alternatives for one left-hand-side symbol
//! - [`Clause`] / [`ClauseArg`] — One alternative and its constructor arguments
//! - [`DiagnosticCollector`] — Non-fatal conditions met along the way
//!
//! ## Pipeline
//!
//! ```text
//! build_symbol_table        ← primitives, boxed types, sentinels, classes, enums
//!     │
//!     ▼
//! disambiguate_symbols      ← unique labels for colliding names
//!     │
//!     ▼
//! create_rules              ← constructors, subclass links, return types
//!     │
//!     ▼
//! link                      ← hand-placed domain links
//!     │
//!     ▼
//! visit_symbols × 2         ← reachability and depth from game and metadata roots
//!     │
//!     ▼
//! set_package_order         ← package and rule order by first visit
//!     │
//!     ▼
//! canonicalize              ← dedupe, sort, unbox, inline single enums, tidy labels
//!     │
//!     ▼
//! find_ancestors            ← ancestor closure
//! ```

mod canonical;
mod closure;
mod config;
mod diagnostics;
mod error;
mod ids;
mod index;
mod linker;
mod model;
mod pipeline;
mod rule;
mod rule_builder;
mod symbol;
mod symbol_table;


pub use config::GrammarConfig;
pub use diagnostics::{DiagnosticCollector, GrammarDiagnostic, Severity, codes};
pub use error::GrammarError;
pub use ids::{PackageId, RuleId, SymbolId};
pub use model::Grammar;
pub use rule::{Clause, ClauseArg, GrammarRule, PackageInfo};
pub use symbol::{LudemeType, Symbol};
