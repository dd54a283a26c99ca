//! Fatal derivation errors.

use thiserror::Error;

use crate::schema::SchemaError;

/// Errors that halt grammar derivation.
#[derive(Debug, Error)]
pub enum GrammarError {
    /// One of the two anchor symbols is not in the symbol table.
    #[error("Root symbol not found: {0}")]
    MissingRoot(String),

    /// A rule the linker must edit does not exist.
    #[error("Required rule not found: {0}")]
    MissingRule(String),

    /// The class provider failed.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
}
