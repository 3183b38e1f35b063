//! Backslash escaping for payload field values.
//!
//! Five characters are reserved inside a field value and are written with a
//! leading backslash:
//!
//! ```text
//! \  ->  \\
//! ;  ->  \;
//! :  ->  \:
//! ,  ->  \,
//! "  ->  \"
//! ```
//!
//! Everything that looks inside a payload (terminator search, field
//! splitting, unescaping) walks the text through the same [`Tokens`]
//! scanner, so an escape sequence is consumed exactly once and a `;` or `:`
//! written as `\;` / `\:` is never mistaken for a separator.

use std::str::CharIndices;

/// Escape character.
pub const ESCAPE: char = '\\';

/// Characters that must be escaped inside a field value.
pub const RESERVED: [char; 5] = ['\\', ';', ':', ',', '"'];

/// Separator between fields.
pub(crate) const FIELD_SEPARATOR: char = ';';

/// Separator between a field key and its value.
pub(crate) const KEY_SEPARATOR: char = ':';

fn is_reserved(c: char) -> bool {
    RESERVED.contains(&c)
}

/// One scan step over payload text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token {
    /// A character taken as-is.
    Literal(char),
    /// The character following a backslash.
    Escaped(char),
}

/// Left-to-right scanner yielding the byte offset where each token starts.
pub(crate) struct Tokens<'a> {
    chars: CharIndices<'a>,
}

impl<'a> Tokens<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        Self {
            chars: text.char_indices(),
        }
    }
}

impl Iterator for Tokens<'_> {
    type Item = (usize, Token);

    fn next(&mut self) -> Option<Self::Item> {
        let (offset, c) = self.chars.next()?;
        if c != ESCAPE {
            return Some((offset, Token::Literal(c)));
        }
        match self.chars.next() {
            Some((_, escaped)) => Some((offset, Token::Escaped(escaped))),
            // A trailing backslash escapes nothing.
            None => Some((offset, Token::Literal(c))),
        }
    }
}

/// Escape the reserved characters of a field value.
///
/// Equivalent to escaping `\` first and then the other reserved characters.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        if is_reserved(c) {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}

/// Undo [`escape`].
///
/// A backslash before a non-reserved character is not an escape this format
/// defines; both characters are kept.
pub fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for (_, token) in Tokens::new(value) {
        match token {
            Token::Literal(c) => out.push(c),
            Token::Escaped(c) if is_reserved(c) => out.push(c),
            Token::Escaped(c) => {
                out.push(ESCAPE);
                out.push(c);
            }
        }
    }
    out
}

/// Split on every unescaped occurrence of `delimiter`.
pub(crate) fn split_unescaped(text: &str, delimiter: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    for (offset, token) in Tokens::new(text) {
        if token == Token::Literal(delimiter) {
            parts.push(&text[start..offset]);
            start = offset + delimiter.len_utf8();
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Split at the first unescaped occurrence of `delimiter`.
pub(crate) fn split_once_unescaped(text: &str, delimiter: char) -> Option<(&str, &str)> {
    Tokens::new(text)
        .find(|(_, token)| *token == Token::Literal(delimiter))
        .map(|(offset, _)| (&text[..offset], &text[offset + delimiter.len_utf8()..]))
}

/// Byte offset of the last unescaped `;;`.
pub(crate) fn find_terminator(text: &str) -> Option<usize> {
    let mut last = None;
    let mut previous_separator = None;
    for (offset, token) in Tokens::new(text) {
        if token == Token::Literal(FIELD_SEPARATOR) {
            if let Some(start) = previous_separator {
                last = Some(start);
            }
            previous_separator = Some(offset);
        } else {
            previous_separator = None;
        }
    }
    last
}
