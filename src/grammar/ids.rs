//! Arena identifiers.
//!
//! Every cross-reference inside a [`Grammar`](super::Grammar) is one of these
//! keys. Arenas are append-only, so a key stays valid for the grammar's life.

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(pub u32);

        impl $name {
            /// Create an id from an arena index
            pub fn new(index: usize) -> Self {
                Self(index as u32)
            }

            /// Get the index into the arena
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

arena_id!(
    /// Index of a [`Symbol`](super::Symbol).
    SymbolId
);
arena_id!(
    /// Index of a [`GrammarRule`](super::GrammarRule).
    RuleId
);
arena_id!(
    /// Index of a [`PackageInfo`](super::PackageInfo).
    PackageId
);

/// Index of a class descriptor owned by the grammar.
pub(crate) type ClassIdx = usize;
