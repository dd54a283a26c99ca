//! Foundation for grammar derivation.
//!
//! This module provides:
//! - [`constants`] - Seed tables (primitives, boxed types, sentinels) and
//!   the exact paths the linker and canonicalizer address
//! - [`naming`] - Qualified-path and type-name helpers
//! - [`text`] - Token boundaries inside description text
//!
//! This module has NO dependencies on other ludeme modules.

pub mod constants;
pub mod naming;
pub mod text;

pub use naming::{lower_camel, package_of, parse_type_name, simple_name_of};
pub use text::{is_token_character, token_range_at};

// Re-export text-size types for convenience
pub use text_size::{TextRange, TextSize};
