//! Text output of the canonical grammar.
//!
//! Rules are written in canonical order: rules outside any package first,
//! then each package in computed order. Only rules whose left-hand side is
//! used in the game or metadata grammar are written, and hidden clauses are
//! left out.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::grammar::{Clause, ClauseArg, Grammar, GrammarError, GrammarRule, PackageId};

/// Errors that can occur while exporting a grammar.
#[derive(Debug, Error)]
pub enum ExportError {
    /// IO error during write.
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The grammar could not be derived.
    #[error("Grammar error: {0}")]
    Grammar(#[from] GrammarError),
}

/// Renders rules as text.
pub trait GrammarFormatter {
    /// One rule, without a trailing newline.
    fn format_rule(&self, grammar: &Grammar, rule: &GrammarRule) -> String;

    /// Heading line written before a package's rules, if any.
    fn format_package(&self, _path: &str) -> Option<String> {
        None
    }

    /// The whole grammar in canonical order.
    fn format_grammar(&self, grammar: &Grammar) -> String {
        let mut out = String::new();
        for rule in grammar.canonical_rules(None) {
            out.push_str(&self.format_rule(grammar, rule));
            out.push('\n');
        }
        for package in grammar.package_order() {
            let rules: Vec<&GrammarRule> = grammar.canonical_rules(Some(package.id())).collect();
            if rules.is_empty() {
                continue;
            }
            out.push('\n');
            if let Some(heading) = self.format_package(package.path()) {
                out.push_str(&heading);
                out.push('\n');
            }
            for rule in rules {
                out.push_str(&self.format_rule(grammar, rule));
                out.push('\n');
            }
        }
        out
    }
}

/// `<label> ::= alt | alt` per rule.
///
/// Constructor clauses read `(label <arg> ...)`. Optional arguments are
/// bracketed, named arguments carry `name:`, collections are braced once per
/// level and an or-group is written `(<a> | <b>)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainFormatter;

impl PlainFormatter {
    fn format_clause(&self, grammar: &Grammar, clause: &Clause) -> String {
        let symbol = grammar.symbol(clause.symbol());
        let Some(args) = clause.args() else {
            return if symbol.is_terminal() {
                symbol.grammar_label().to_string()
            } else {
                format!("<{}>", symbol.grammar_label())
            };
        };

        let mut out = format!("({}", symbol.token());
        let mut n = 0;
        while n < args.len() {
            let group = args[n].or_group();
            let mut end = n + 1;
            if group != 0 {
                while end < args.len() && args[end].or_group() == group {
                    end += 1;
                }
            }
            out.push(' ');
            if end - n > 1 {
                let alternatives: Vec<String> = args[n..end]
                    .iter()
                    .map(|arg| self.format_arg(grammar, arg))
                    .collect();
                let _ = write!(out, "({})", alternatives.join(" | "));
            } else {
                out.push_str(&self.format_arg(grammar, &args[n]));
            }
            n = end;
        }
        out.push(')');
        out
    }

    fn format_arg(&self, grammar: &Grammar, arg: &ClauseArg) -> String {
        let mut text = format!("<{}>", grammar.symbol(arg.symbol()).grammar_label());
        for _ in 0..arg.nesting() {
            text = format!("{{{text}}}");
        }
        if let Some(label) = arg.label() {
            text = format!("{label}:{text}");
        }
        if arg.is_optional() {
            text = format!("[{text}]");
        }
        text
    }
}

impl GrammarFormatter for PlainFormatter {
    fn format_rule(&self, grammar: &Grammar, rule: &GrammarRule) -> String {
        let lhs = grammar.symbol(rule.lhs());
        let mut label = format!("<{}>", lhs.grammar_label());
        for _ in 0..lhs.nesting() {
            label = format!("{{{label}}}");
        }
        let alternatives: Vec<String> = rule
            .rhs()
            .iter()
            .filter(|clause| !clause.is_hidden())
            .map(|clause| self.format_clause(grammar, clause))
            .collect();
        format!("{} ::= {}", label, alternatives.join(" | "))
    }

    fn format_package(&self, path: &str) -> Option<String> {
        Some(format!("// {path}"))
    }
}

impl Grammar {
    /// Used rules of one package in canonical order; `None` gives the rules
    /// outside any package, in creation order.
    pub fn canonical_rules(
        &self,
        package: Option<PackageId>,
    ) -> impl Iterator<Item = &GrammarRule> + '_ {
        let rules: Vec<&GrammarRule> = match package {
            Some(id) => self.package(id).rules().iter().map(|id| self.rule(*id)).collect(),
            None => self
                .rules()
                .filter(|rule| self.symbol(rule.lhs()).package().is_none())
                .collect(),
        };
        rules.into_iter().filter(|rule| {
            let lhs = self.symbol(rule.lhs());
            !rule.is_retired()
                && (lhs.used_in_grammar() || lhs.used_in_metadata())
                && rule.rhs().iter().any(|clause| !clause.is_hidden())
        })
    }

    /// The grammar in the plain format.
    pub fn to_text(&self) -> String {
        PlainFormatter.format_grammar(self)
    }

    /// Write the grammar to `path` in the plain format, as UTF-8.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        self.export_with(path, &PlainFormatter)
    }

    pub fn export_with<F: GrammarFormatter + ?Sized>(
        &self,
        path: impl AsRef<Path>,
        formatter: &F,
    ) -> Result<(), ExportError> {
        let path = path.as_ref();
        let text = formatter.format_grammar(self);
        std::fs::write(path, text).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Exported grammar to {}", path.display());
        Ok(())
    }
}
