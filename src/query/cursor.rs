//! Cursor context inside description text.
//!
//! Only the character in front of the token under the cursor is inspected:
//!
//! | before token       | context                          |
//! |--------------------|----------------------------------|
//! | `<` `\|`           | rule reference (`<int\|float>`)  |
//! | `(`                | constructor call (`(board ...)`) |
//! | whitespace `:` `{` | terminal value (`Cell`)          |
//!
//! A token followed by `:` is a parameter name and has no context.

use indexmap::IndexSet;
use text_size::TextRange;

use crate::base::text::{char_at, char_before, token_range_at};
use crate::grammar::{Grammar, LudemeType, Symbol};

const METADATA_BLOCK: &str = "(metadata";
const METADATA_SEGMENT: &str = "metadata";

/// What the token under the cursor stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CursorContext {
    /// Inside `<...>`, alternatives included.
    RuleReference,
    /// Right after `(`.
    Constructor,
    /// After whitespace, `:` or `{`.
    Terminal,
}

impl CursorContext {
    /// Whether `symbol` can be written at a position of this kind.
    pub fn accepts(self, symbol: &Symbol) -> bool {
        match self {
            CursorContext::RuleReference => symbol.ludeme_type() != LudemeType::Constant,
            CursorContext::Constructor => {
                symbol.is_class() && !symbol.is_enum() && symbol.ludeme_type().is_ludeme()
            }
            CursorContext::Terminal => symbol.is_enum_constant(),
        }
    }
}

/// The classified token under a cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CursorToken {
    pub context: CursorContext,
    pub range: TextRange,
}

/// Classify the token at byte `offset` of `text`.
///
/// Returns `None`, logging why, for a cursor at either end of the text, off
/// any token, on a token that starts the text, on a parameter name, or after
/// a character that opens no context.
pub fn classify_cursor(text: &str, offset: usize) -> Option<CursorToken> {
    if offset == 0 || offset >= text.len() {
        tracing::warn!("Cursor at offset {} is at the edge of the text", offset);
        return None;
    }
    let Some(range) = token_range_at(text, offset) else {
        tracing::warn!("Cursor at offset {} is not on a token", offset);
        return None;
    };

    let start = usize::from(range.start());
    let end = usize::from(range.end());
    if char_at(text, end) == Some(':') {
        tracing::trace!("Token '{}' is a parameter name", &text[range]);
        return None;
    }

    let Some(before) = char_before(text, start) else {
        tracing::warn!("Token '{}' starts the text and opens no context", &text[range]);
        return None;
    };
    let context = match before {
        '<' | '|' => CursorContext::RuleReference,
        '(' => CursorContext::Constructor,
        c if c.is_whitespace() || c == ':' || c == '{' => CursorContext::Terminal,
        c => {
            tracing::trace!("No context after '{}'", c);
            return None;
        }
    };
    Some(CursorToken { context, range })
}

/// Whether `offset` lies after the opening of a metadata block.
pub fn in_metadata_block(text: &str, offset: usize) -> bool {
    text.get(..offset)
        .is_some_and(|before| before.contains(METADATA_BLOCK))
}

impl Grammar {
    /// Qualified paths of the symbols that fit the token at `offset`.
    ///
    /// With `use_partial` the token is matched as a prefix of symbol tokens,
    /// otherwise as a whole token or grammar label. Inside a metadata block
    /// only metadata symbols are offered; outside, none of them are.
    pub fn class_paths(&self, text: &str, offset: usize, use_partial: bool) -> Vec<String> {
        let Some(token) = classify_cursor(text, offset) else {
            return Vec::new();
        };
        let keyword = &text[token.range];
        let candidates = if use_partial {
            self.symbols_with_partial_keyword(keyword)
        } else {
            self.symbols_with_keyword(keyword)
        };

        let in_metadata = in_metadata_block(text, offset);
        let paths: IndexSet<&str> = candidates
            .into_iter()
            .filter(|symbol| token.context.accepts(symbol))
            .map(Symbol::path)
            .filter(|path| path.contains(METADATA_SEGMENT) == in_metadata)
            .collect();

        tracing::trace!(
            "{:?} '{}' at {}: {} paths",
            token.context,
            keyword,
            offset,
            paths.len()
        );
        paths.into_iter().map(str::to_string).collect()
    }
}
