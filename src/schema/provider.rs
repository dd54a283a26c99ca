//! The class-fact source the grammar is derived from.

use std::path::Path;

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use super::error::SchemaError;
use super::types::ClassDescriptor;
use crate::base::naming::is_within;

/// Layout version of schema tables this crate reads.
pub const SCHEMA_VERSION: u32 = 1;

/// Supplies class facts for a namespace.
///
/// Implementations must leave out inner/anonymous classes and documentation
/// placeholders, and must return every class below `namespace_root`.
pub trait TypeProvider {
    fn list_classes(&self, namespace_root: &str) -> Result<Vec<ClassDescriptor>, SchemaError>;
}

impl<P: TypeProvider + ?Sized> TypeProvider for &P {
    fn list_classes(&self, namespace_root: &str) -> Result<Vec<ClassDescriptor>, SchemaError> {
        (**self).list_classes(namespace_root)
    }
}

/// A versioned table of class facts, generated ahead of time.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default = "current_version")]
    pub version: u32,
    #[serde(default)]
    pub classes: Vec<ClassDescriptor>,
}

fn current_version() -> u32 {
    SCHEMA_VERSION
}

impl Schema {
    pub fn new(classes: Vec<ClassDescriptor>) -> Self {
        Self {
            version: SCHEMA_VERSION,
            classes,
        }
    }

    pub fn push(&mut self, class: ClassDescriptor) {
        self.classes.push(class);
    }

    /// Parse a JSON schema table.
    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        let schema: Schema = serde_json::from_str(text)?;
        schema.validated()
    }

    /// Parse a YAML schema table.
    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(text: &str) -> Result<Self, SchemaError> {
        let schema: Schema = serde_yaml::from_str(text)?;
        schema.validated()
    }

    /// Load a schema file, choosing the format by extension.
    pub fn from_path(path: &Path) -> Result<Self, SchemaError> {
        let text = std::fs::read_to_string(path).map_err(|e| SchemaError::io(path, e))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&text),
            #[cfg(feature = "yaml")]
            Some("yaml" | "yml") => Self::from_yaml_str(&text),
            _ => Err(SchemaError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// Load and merge every schema file below `dir`, in path order.
    pub fn from_dir(dir: &Path) -> Result<Self, SchemaError> {
        let mut merged = Schema::new(Vec::new());
        let mut paths = Vec::new();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                SchemaError::io(path, e.into())
            })?;
            if entry.file_type().is_file() && is_schema_file(entry.path()) {
                paths.push(entry.into_path());
            }
        }

        for path in paths {
            tracing::debug!("Loading schema file {}", path.display());
            merged.classes.extend(Self::from_path(&path)?.classes);
        }
        Ok(merged)
    }

    fn validated(self) -> Result<Self, SchemaError> {
        if self.version != SCHEMA_VERSION {
            return Err(SchemaError::UnsupportedVersion {
                found: self.version,
                expected: SCHEMA_VERSION,
            });
        }
        for class in &self.classes {
            if class.qualified_name.trim().is_empty() {
                return Err(SchemaError::invalid("<unnamed>", "empty qualified name"));
            }
            if !class.enum_constants.is_empty() && !class.is_enum() {
                return Err(SchemaError::invalid(
                    &class.qualified_name,
                    "enum constants on a non-enum class",
                ));
            }
        }
        Ok(self)
    }
}

fn is_schema_file(path: &Path) -> bool {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => true,
        Some("yaml" | "yml") => cfg!(feature = "yaml"),
        _ => false,
    }
}

impl TypeProvider for Schema {
    fn list_classes(&self, namespace_root: &str) -> Result<Vec<ClassDescriptor>, SchemaError> {
        Ok(self
            .classes
            .iter()
            .filter(|class| is_within(&class.qualified_name, namespace_root))
            .filter(|class| !class.is_inner() && !class.is_placeholder())
            .cloned()
            .collect())
    }
}
