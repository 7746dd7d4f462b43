//! # Catalog Module
//!
//! The token catalog: descriptor records and the lexer definition shapes
//! built from them.
//!
//! ## Overview
//!
//! A catalog is an ordered list of [`TokenType`] descriptors, optionally
//! split across named *lexing modes*. Each descriptor bundles the identity
//! the engine will stamp on matched tokens with the metadata that drives
//! scanning:
//!
//! - **Pattern**: a regular expression, or [`TokenPattern::NotApplicable`]
//!   for category-only descriptors that are never matched directly
//! - **Group**: the output channel: the default stream, a named bucket, or
//!   [`TokenGroup::Skipped`] to match-and-discard (whitespace, comments)
//! - **Longer alternative**: a second descriptor re-tried after a match and
//!   winning only when strictly longer (keyword vs identifier)
//! - **Mode directives**: push a named mode and/or pop the current one after
//!   the token is consumed
//!
//! Declaration order is match priority: the first pattern that matches at
//! the current position wins.
//!
//! ## Usage
//!
//! ```rust
//! use lexstack::{Lexer, TokenType};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind {
//!     Do,
//!     Ident,
//!     Whitespace,
//! }
//!
//! let lexer = Lexer::new(vec![
//!     TokenType::new(Kind::Do, "do").longer_alt(Kind::Ident),
//!     TokenType::new(Kind::Ident, r"[a-zA-Z_]\w*"),
//!     TokenType::new(Kind::Whitespace, r"\s+").skipped().line_breaks(true),
//! ])?;
//!
//! let result = lexer.tokenize("do donald")?;
//! assert_eq!(result.tokens[0].kind, Kind::Do);
//! assert_eq!(result.tokens[1].kind, Kind::Ident);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub(crate) mod analyze;
pub(crate) mod validate;

use compact_str::CompactString;

use crate::kind::TokenKind;

/// Name of the mode a plain descriptor list is placed in.
pub const DEFAULT_MODE: &str = "default_mode";

/// The match source of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenPattern {
    /// A regular expression, matched anchored at the scan position.
    Regex(CompactString),
    /// Category-only sentinel: the descriptor is never matched directly and
    /// is excluded from the compiled dispatch tables.
    NotApplicable,
}

/// The output channel of a matched token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum TokenGroup {
    /// Emit into the primary token stream.
    #[default]
    Default,
    /// Consume and discard. Position and mode directives still apply.
    Skipped,
    /// Route into the named bucket of [`crate::LexResult::groups`].
    Named(CompactString),
}

/// A token descriptor: one entry of the catalog.
///
/// Fields are public so a descriptor can be written as a struct literal; the
/// chained constructors below are the usual way to build one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenType<K: TokenKind> {
    /// Identity stamped on every token this descriptor matches.
    pub kind: K,
    /// `None` is a definition error; use [`TokenType::category`] for
    /// descriptors that intentionally have nothing to match.
    pub pattern: Option<TokenPattern>,
    /// Output channel.
    pub group: TokenGroup,
    /// Descriptor to re-try after a successful match, winning iff strictly
    /// longer.
    pub longer_alt: Option<K>,
    /// Mode to push after consuming this token.
    pub push_mode: Option<CompactString>,
    /// Pop the current mode after consuming this token (before any push).
    pub pop_mode: bool,
    /// Whether the pattern can match a line terminator. When unset the
    /// analyzer derives it by inspecting the pattern.
    pub line_breaks: Option<bool>,
}

impl<K: TokenKind> TokenType<K> {
    /// Create a descriptor matching a regular expression.
    #[must_use]
    pub fn new(kind: K, pattern: impl Into<CompactString>) -> Self {
        Self {
            kind,
            pattern: Some(TokenPattern::Regex(pattern.into())),
            group: TokenGroup::Default,
            longer_alt: None,
            push_mode: None,
            pop_mode: false,
            line_breaks: None,
        }
    }

    /// Create a category-only descriptor (never matched directly).
    #[must_use]
    pub fn category(kind: K) -> Self {
        Self {
            kind,
            pattern: Some(TokenPattern::NotApplicable),
            group: TokenGroup::Default,
            longer_alt: None,
            push_mode: None,
            pop_mode: false,
            line_breaks: None,
        }
    }

    /// Route matches into a named bucket instead of the main stream.
    #[must_use]
    pub fn group(mut self, name: impl Into<CompactString>) -> Self {
        self.group = TokenGroup::Named(name.into());
        self
    }

    /// Consume and discard matches.
    #[must_use]
    pub fn skipped(mut self) -> Self {
        self.group = TokenGroup::Skipped;
        self
    }

    /// Re-try `kind`'s pattern after a match; it wins iff strictly longer.
    #[must_use]
    pub fn longer_alt(mut self, kind: K) -> Self {
        self.longer_alt = Some(kind);
        self
    }

    /// Push the named mode after consuming this token.
    #[must_use]
    pub fn push_mode(mut self, mode: impl Into<CompactString>) -> Self {
        self.push_mode = Some(mode.into());
        self
    }

    /// Pop the current mode after consuming this token.
    #[must_use]
    pub fn pop_mode(mut self) -> Self {
        self.pop_mode = true;
        self
    }

    /// Declare whether the pattern can match a line terminator, overriding
    /// the analyzer's derivation.
    #[must_use]
    pub const fn line_breaks(mut self, yes: bool) -> Self {
        self.line_breaks = Some(yes);
        self
    }
}

/// A complete lexer definition: ordered modes and the initial mode.
///
/// Build one directly, convert a plain descriptor list with `From`, or use
/// [`crate::LexerBuilder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerDefinition<K: TokenKind> {
    /// Mode name to descriptor list, in declaration order.
    pub modes: Vec<(CompactString, Vec<TokenType<K>>)>,
    /// The mode scanning starts in unless overridden per call.
    pub default_mode: CompactString,
}

impl<K: TokenKind> From<Vec<TokenType<K>>> for LexerDefinition<K> {
    /// Wrap a plain descriptor list into the single implicit mode
    /// [`DEFAULT_MODE`].
    fn from(tokens: Vec<TokenType<K>>) -> Self {
        Self {
            modes: vec![(CompactString::const_new(DEFAULT_MODE), tokens)],
            default_mode: CompactString::const_new(DEFAULT_MODE),
        }
    }
}

impl<K: TokenKind> LexerDefinition<K> {
    /// Look up a mode's descriptor list by name.
    #[must_use]
    pub fn mode(&self, name: &str) -> Option<&[TokenType<K>]> {
        self.modes
            .iter()
            .find(|(mode, _)| mode == name)
            .map(|(_, tokens)| tokens.as_slice())
    }
}
