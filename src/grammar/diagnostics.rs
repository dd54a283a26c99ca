//! Diagnostics — non-fatal conditions met during derivation.
//!
//! Anything that makes the derivation skip an item (an unresolvable parameter
//! type, a missing linker target) or that the schema should not contain (two
//! kinds of `or` on one parameter) is recorded here and logged. Derivation
//! carries on.

use smol_str::SmolStr;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Warning,
    Info,
}

/// A derivation diagnostic attached to the path it concerns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrammarDiagnostic {
    pub severity: Severity,
    /// Diagnostic code (see [`codes`]).
    pub code: &'static str,
    /// Qualified path of the class, symbol or rule concerned.
    pub subject: SmolStr,
    pub message: String,
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Diagnostic codes.
///
/// - **W0101-W0199**: schema facts that could not be used
/// - **I0101-I0199**: expected gaps, reported for completeness
pub mod codes {
    /// Parameter type names no known symbol.
    pub const UNRESOLVED_PARAM_TYPE: &str = "W0101";
    /// Both `or` and `or2` on one parameter.
    pub const CONFLICTING_OR: &str = "W0102";
    /// Both `and` and `and2` on one parameter.
    pub const CONFLICTING_AND: &str = "W0103";
    /// Evaluation return type names no known symbol.
    pub const UNRESOLVED_RETURN_TYPE: &str = "W0104";
    /// Sub-ludeme parent names no known symbol.
    pub const UNRESOLVED_SUB_LUDEME_PARENT: &str = "W0105";
    /// Class listed twice.
    pub const DUPLICATE_CLASS: &str = "W0106";
    /// Superclass inside a root namespace names no known symbol.
    pub const UNRESOLVED_SUPERCLASS: &str = "W0107";

    /// Linker target absent from this class graph.
    pub const MISSING_LINK_TARGET: &str = "I0101";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during derivation.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<GrammarDiagnostic>,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record and log a warning.
    pub fn warning(&mut self, code: &'static str, subject: &str, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!("[{}] {}: {}", code, subject, message);
        self.diagnostics.push(GrammarDiagnostic {
            severity: Severity::Warning,
            code,
            subject: subject.into(),
            message,
        });
    }

    /// Record and log an informational note.
    pub fn info(&mut self, code: &'static str, subject: &str, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!("[{}] {}: {}", code, subject, message);
        self.diagnostics.push(GrammarDiagnostic {
            severity: Severity::Info,
            code,
            subject: subject.into(),
            message,
        });
    }

    pub fn diagnostics(&self) -> &[GrammarDiagnostic] {
        &self.diagnostics
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Warning)
    }

    /// Diagnostics carrying `code`.
    pub fn with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a GrammarDiagnostic> {
        self.diagnostics.iter().filter(move |d| d.code == code)
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
