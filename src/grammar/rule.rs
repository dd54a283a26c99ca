use smol_str::SmolStr;

use super::ids::{PackageId, RuleId, SymbolId};

/// One constructor parameter inside a constructor clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClauseArg {
    pub(crate) symbol: SymbolId,
    pub(crate) name: Option<SmolStr>,
    pub(crate) label: Option<SmolStr>,
    pub(crate) optional: bool,
    pub(crate) or_group: u32,
    pub(crate) and_group: u32,
    pub(crate) nesting: usize,
}

impl ClauseArg {
    pub fn new(symbol: SymbolId) -> Self {
        Self {
            symbol,
            name: None,
            label: None,
            optional: false,
            or_group: 0,
            and_group: 0,
            nesting: 0,
        }
    }

    /// Base symbol of the parameter type (collection depth stripped).
    pub fn symbol(&self) -> SymbolId {
        self.symbol
    }

    /// Declared parameter name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Label shown before the argument; only named parameters have one.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Mutually exclusive alternatives share a non-zero or-group.
    pub fn or_group(&self) -> u32 {
        self.or_group
    }

    /// Co-occurring parameters share a non-zero and-group.
    pub fn and_group(&self) -> u32 {
        self.and_group
    }

    /// Collection depth of this parameter.
    pub fn nesting(&self) -> usize {
        self.nesting
    }
}

/// One alternative on the right-hand side of a rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Clause {
    pub(crate) symbol: SymbolId,
    pub(crate) args: Option<Vec<ClauseArg>>,
    pub(crate) hidden: bool,
}

impl Clause {
    /// A bare reference to another symbol.
    pub fn reference(symbol: SymbolId) -> Self {
        Self {
            symbol,
            args: None,
            hidden: false,
        }
    }

    /// A constructor call of `symbol` with the given arguments.
    pub fn constructor(symbol: SymbolId, args: Vec<ClauseArg>, hidden: bool) -> Self {
        Self {
            symbol,
            args: Some(args),
            hidden,
        }
    }

    pub fn symbol(&self) -> SymbolId {
        self.symbol
    }

    /// Constructor arguments; `None` for bare references.
    pub fn args(&self) -> Option<&[ClauseArg]> {
        self.args.as_deref()
    }

    pub fn is_constructor(&self) -> bool {
        self.args.is_some()
    }

    /// Excluded from user-facing output but kept structurally.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

/// All alternatives for one left-hand-side symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct GrammarRule {
    pub(crate) id: RuleId,
    pub(crate) lhs: SymbolId,
    pub(crate) rhs: Vec<Clause>,
    pub(crate) retired: bool,
}

impl GrammarRule {
    pub(crate) fn new(id: RuleId, lhs: SymbolId) -> Self {
        Self {
            id,
            lhs,
            rhs: Vec::new(),
            retired: false,
        }
    }

    pub fn id(&self) -> RuleId {
        self.id
    }

    pub fn lhs(&self) -> SymbolId {
        self.lhs
    }

    pub fn rhs(&self) -> &[Clause] {
        &self.rhs
    }

    /// Retired rules were folded into another rule or inlined away.
    pub fn is_retired(&self) -> bool {
        self.retired
    }

    pub fn contains(&self, clause: &Clause) -> bool {
        self.rhs.contains(clause)
    }

    /// Append `clause` unless an equal clause is already present.
    pub(crate) fn add_unique(&mut self, clause: Clause) -> bool {
        if self.contains(&clause) {
            return false;
        }
        self.rhs.push(clause);
        true
    }
}

/// Rules grouped by the namespace their left-hand side comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub(crate) id: PackageId,
    pub(crate) path: SmolStr,
    pub(crate) rules: Vec<RuleId>,
}

impl PackageInfo {
    pub(crate) fn new(id: PackageId, path: impl Into<SmolStr>) -> Self {
        Self {
            id,
            path: path.into(),
            rules: Vec::new(),
        }
    }

    pub fn id(&self) -> PackageId {
        self.id
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Rules in canonical order (set by the package-order pass).
    pub fn rules(&self) -> &[RuleId] {
        &self.rules
    }
}
