//! Error types for schema loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating a class schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// IO error during read.
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error.
    #[cfg(feature = "yaml")]
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Schema written for a different table layout.
    #[error("Unsupported schema version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// File extension with no known schema format.
    #[error("Unsupported schema file: {0}")]
    UnsupportedFormat(PathBuf),

    /// Structurally invalid class entry.
    #[error("Invalid class '{class}': {message}")]
    Invalid { class: String, message: String },
}

impl SchemaError {
    /// Create an IO error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid class error.
    pub fn invalid(class: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            class: class.into(),
            message: message.into(),
        }
    }
}
