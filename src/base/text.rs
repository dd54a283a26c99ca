//! Text manipulation utilities for working with game descriptions.

use text_size::{TextRange, TextSize};

/// Check if a character can appear inside a grammar token.
///
/// Uses Unicode Standard Annex #31 rules for identifier characters, plus `.`
/// so that disambiguated labels such as `ints.count` read as one token.
#[inline]
pub fn is_token_character(c: char) -> bool {
    unicode_ident::is_xid_continue(c) || c == '.'
}

/// Find the token touching byte offset `offset`.
///
/// The token may end at `offset` (cursor just after it) or contain it.
/// Returns `None` when neither the character before nor the character at the
/// offset is a token character, or when `offset` is not a char boundary.
pub fn token_range_at(text: &str, offset: usize) -> Option<TextRange> {
    if offset > text.len() || !text.is_char_boundary(offset) {
        return None;
    }

    let before = text[..offset].chars().next_back();
    let at = text[offset..].chars().next();
    if !before.is_some_and(is_token_character) && !at.is_some_and(is_token_character) {
        return None;
    }

    let start = text[..offset]
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_token_character(*c))
        .last()
        .map(|(idx, _)| idx)
        .unwrap_or(offset);

    let end = text[offset..]
        .char_indices()
        .find(|(_, c)| !is_token_character(*c))
        .map(|(idx, _)| offset + idx)
        .unwrap_or(text.len());

    Some(TextRange::new(
        TextSize::from(start as u32),
        TextSize::from(end as u32),
    ))
}

/// The character immediately before byte offset `offset`, if any.
pub fn char_before(text: &str, offset: usize) -> Option<char> {
    text.get(..offset)?.chars().next_back()
}

/// The character starting at byte offset `offset`, if any.
pub fn char_at(text: &str, offset: usize) -> Option<char> {
    text.get(offset..)?.chars().next()
}
