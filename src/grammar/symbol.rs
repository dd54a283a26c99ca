use indexmap::IndexSet;
use smol_str::SmolStr;

use super::ids::{ClassIdx, PackageId, SymbolId};

/// Grammar role of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LudemeType {
    /// Scalar primitive (`int`, `float`, `boolean`).
    Primitive,
    /// Boxed stand-in for a primitive.
    Predefined,
    /// Named value: application sentinel or enum constant.
    Constant,
    /// Enum type and other non-constructible structure.
    Structural,
    /// Ordinary class with constructors.
    Ludeme,
    /// Class dispatching through static `construct` factories.
    SuperLudeme,
    /// Class that only appears as part of a super ludeme.
    SubLudeme,
}

impl LudemeType {
    /// Whether symbols of this type end a derivation.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            LudemeType::Primitive | LudemeType::Predefined | LudemeType::Constant
        )
    }

    /// Whether symbols of this type come from a constructible class.
    pub fn is_ludeme(self) -> bool {
        matches!(
            self,
            LudemeType::Ludeme | LudemeType::SuperLudeme | LudemeType::SubLudeme
        )
    }
}

/// A terminal or nonterminal of the derived grammar.
///
/// Identity is `(path, nesting)`: the same class at two collection depths is
/// two symbols. Symbols are owned by the [`Grammar`](super::Grammar) arena
/// and refer to each other by [`SymbolId`].
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub(crate) id: SymbolId,
    pub(crate) name: SmolStr,
    pub(crate) path: SmolStr,
    pub(crate) token: SmolStr,
    pub(crate) alias: Option<SmolStr>,
    pub(crate) grammar_label: SmolStr,
    pub(crate) ludeme_type: LudemeType,
    /// `None` means the symbol returns itself.
    pub(crate) return_type: Option<SymbolId>,
    pub(crate) nesting: usize,

    pub(crate) hidden: bool,
    pub(crate) is_abstract: bool,
    pub(crate) is_enum: bool,
    pub(crate) used_in_grammar: bool,
    pub(crate) used_in_description: bool,
    pub(crate) used_in_metadata: bool,
    pub(crate) visited: bool,
    pub(crate) depth: Option<usize>,

    pub(crate) ancestors: IndexSet<SymbolId>,
    pub(crate) sub_ludeme_of: Option<SymbolId>,
    pub(crate) pack: Option<PackageId>,
    pub(crate) class: Option<ClassIdx>,
}

impl Symbol {
    /// A fresh symbol returning itself; the id is assigned on registration.
    pub(crate) fn new(
        ludeme_type: LudemeType,
        path: impl Into<SmolStr>,
        name: impl Into<SmolStr>,
        token: impl Into<SmolStr>,
    ) -> Self {
        let token = token.into();
        Self {
            id: SymbolId(u32::MAX),
            name: name.into(),
            path: path.into(),
            grammar_label: token.clone(),
            token,
            alias: None,
            ludeme_type,
            return_type: None,
            nesting: 0,
            hidden: false,
            is_abstract: false,
            is_enum: false,
            used_in_grammar: false,
            used_in_description: false,
            used_in_metadata: false,
            visited: false,
            depth: None,
            ancestors: IndexSet::new(),
            sub_ludeme_of: None,
            pack: None,
            class: None,
        }
    }

    /// Copy of this symbol at another collection depth.
    ///
    /// The copy returns itself and carries none of the traversal state.
    pub(crate) fn nested_variant(&self, nesting: usize) -> Self {
        Self {
            id: SymbolId(u32::MAX),
            return_type: None,
            nesting,
            used_in_grammar: false,
            used_in_description: false,
            used_in_metadata: false,
            visited: false,
            depth: None,
            ancestors: IndexSet::new(),
            sub_ludeme_of: None,
            ..self.clone()
        }
    }

    pub fn id(&self) -> SymbolId {
        self.id
    }

    /// Simple (unqualified) name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Qualified path, unique together with [`nesting`](Self::nesting).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Token written in descriptions: the alias, or the lower-camel name.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Label the symbol is printed under; disambiguated where names collide.
    pub fn grammar_label(&self) -> &str {
        &self.grammar_label
    }

    pub fn ludeme_type(&self) -> LudemeType {
        self.ludeme_type
    }

    pub fn return_type(&self) -> SymbolId {
        self.return_type.unwrap_or(self.id)
    }

    pub fn returns_self(&self) -> bool {
        self.return_type.is_none_or(|rt| rt == self.id)
    }

    /// Collection depth (0 = scalar).
    pub fn nesting(&self) -> usize {
        self.nesting
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Backed by an enum: the enum type itself or one of its constants.
    pub fn is_enum(&self) -> bool {
        self.is_enum
    }

    /// Backed by a class descriptor.
    pub fn is_class(&self) -> bool {
        self.class.is_some()
    }

    pub fn is_terminal(&self) -> bool {
        self.ludeme_type.is_terminal()
    }

    /// Enum type whose values are its alternatives.
    pub fn is_enum_type(&self) -> bool {
        self.is_enum && self.ludeme_type == LudemeType::Structural
    }

    /// Enum constant usable as a terminal.
    pub fn is_enum_constant(&self) -> bool {
        self.is_enum && self.ludeme_type == LudemeType::Constant
    }

    pub fn used_in_grammar(&self) -> bool {
        self.used_in_grammar
    }

    pub fn used_in_description(&self) -> bool {
        self.used_in_description
    }

    pub fn used_in_metadata(&self) -> bool {
        self.used_in_metadata
    }

    /// Shallowest depth at which a root traversal reached this symbol.
    pub fn depth(&self) -> Option<usize> {
        self.depth
    }

    pub fn ancestors(&self) -> &IndexSet<SymbolId> {
        &self.ancestors
    }

    pub fn sub_ludeme_of(&self) -> Option<SymbolId> {
        self.sub_ludeme_of
    }

    pub fn package(&self) -> Option<PackageId> {
        self.pack
    }

    /// Structural identity: same path at the same collection depth.
    pub fn matches(&self, other: &Symbol) -> bool {
        self.nesting == other.nesting && self.path == other.path
    }

    pub(crate) fn key(&self) -> SymbolKey {
        (self.path.clone(), self.nesting)
    }

    pub(crate) fn clear_usage(&mut self) {
        self.used_in_grammar = false;
        self.used_in_description = false;
        self.used_in_metadata = false;
    }
}

/// Structural key of a symbol or rule: `(path, nesting)`.
pub(crate) type SymbolKey = (SmolStr, usize);
