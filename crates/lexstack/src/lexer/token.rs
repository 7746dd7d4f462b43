use compact_str::CompactString;
use hashbrown::HashMap;

use crate::error::LexError;
use crate::kind::TokenKind;

/// A matched token.
///
/// Start positions are always present; `end_line`/`end_column` are `None`
/// for exactly one shape of token: a multi-line-capable match whose single
/// line terminator is its final character, where the terminator is treated
/// as affecting only the tokens that follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<K: TokenKind> {
    /// Identity of the descriptor that matched.
    pub kind: K,
    /// The matched substring.
    pub image: CompactString,
    /// Byte offset of the first character, 0-based.
    pub start_offset: usize,
    /// 1-based line of the first character.
    pub start_line: u32,
    /// 1-based column (UTF-8 bytes) of the first character.
    pub start_column: u32,
    /// 1-based line of the last character, when defined.
    pub end_line: Option<u32>,
    /// 1-based column of the last character, inclusive, when defined.
    pub end_column: Option<u32>,
}

impl<K: TokenKind> Token<K> {
    /// Length of the image in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.image.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.image.is_empty()
    }

    /// Byte offset one past the last character.
    #[must_use]
    pub fn end_offset(&self) -> usize {
        self.start_offset + self.image.len()
    }
}

/// Everything one `tokenize` call produced.
#[derive(Debug, Clone)]
pub struct LexResult<K: TokenKind> {
    /// Default-group tokens, in match order.
    pub tokens: Vec<Token<K>>,
    /// Named buckets, each in match order. Every group declared anywhere in
    /// the catalog is present, even when empty.
    pub groups: HashMap<CompactString, Vec<Token<K>>, ahash::RandomState>,
    /// Recoverable scan errors, in order of occurrence.
    pub errors: Vec<LexError>,
}

impl<K: TokenKind> LexResult<K> {
    /// Tokens routed into the named bucket, if the catalog declares it.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&[Token<K>]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    /// Whether the scan completed without a single error.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
