//! Query layer — read-only services over a derived grammar.
//!
//! - [`lookup`] - symbols by name, class name, keyword and keyword prefix
//! - [`cursor`] - what the token under an editor cursor can be
//! - [`GrammarHost`] - derive once, share everywhere
//! - [`GrammarFormatter`] - text output and [`Grammar::export`](crate::grammar::Grammar::export)

pub mod cursor;
mod export;
mod host;
pub mod lookup;

pub use cursor::{CursorContext, CursorToken, classify_cursor, in_metadata_block};
pub use export::{ExportError, GrammarFormatter, PlainFormatter};
pub use host::GrammarHost;
