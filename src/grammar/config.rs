//! Derivation settings.

use crate::base::constants::{GAME_NAMESPACE, GAME_ROOT, METADATA_NAMESPACE, METADATA_ROOT};

/// Where the two class trees live and which classes anchor them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarConfig {
    /// Namespace enumerated for the game model.
    pub game_namespace: String,
    /// Namespace enumerated for the metadata model.
    pub metadata_namespace: String,
    /// Path of the symbol game descriptions start from.
    pub game_root: String,
    /// Path of the symbol metadata blocks start from.
    pub metadata_root: String,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            game_namespace: GAME_NAMESPACE.to_string(),
            metadata_namespace: METADATA_NAMESPACE.to_string(),
            game_root: GAME_ROOT.to_string(),
            metadata_root: METADATA_ROOT.to_string(),
        }
    }
}

impl GrammarConfig {
    pub fn with_game_root(mut self, namespace: impl Into<String>, root: impl Into<String>) -> Self {
        self.game_namespace = namespace.into();
        self.game_root = root.into();
        self
    }

    pub fn with_metadata_root(
        mut self,
        namespace: impl Into<String>,
        root: impl Into<String>,
    ) -> Self {
        self.metadata_namespace = namespace.into();
        self.metadata_root = root.into();
        self
    }

    /// Namespaces in enumeration order.
    pub fn namespaces(&self) -> [&str; 2] {
        [&self.game_namespace, &self.metadata_namespace]
    }
}
