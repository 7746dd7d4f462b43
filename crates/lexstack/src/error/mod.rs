//! # Error Types
//!
//! Error types for catalog validation and scanning.
//!
//! ## Overview
//!
//! The engine reports problems on two distinct channels:
//!
//! - **Definition errors**: a malformed token catalog, caught once at
//!   construction. These are fatal, either immediately or (when deferred)
//!   on the first `tokenize` call.
//! - **Lexing errors**: unexpected input found while scanning. These are
//!   never fatal; the scanner resynchronizes and keeps going, and the
//!   accumulated records ride along in the [`crate::LexResult`].
//!
//! ## Error Types
//!
//! - [`DefinitionError`] / [`DefinitionErrors`]: catalog validation failures
//! - [`LexError`]: a recoverable scanning failure with source position
//! - [`TokenizeError`]: why a `tokenize` call could not run at all
//!
//! ## Diagnostics Support
//!
//! When the `diagnostics` feature is enabled, [`LexError`] integrates with
//! [`miette`] and carries a labeled source span.

use compact_str::CompactString;
use thiserror::Error;

#[cfg(feature = "serialize")]
use serde::{Deserialize, Serialize};

use crate::kind::TokenKind;

/// The kind of a catalog validation failure, as a bare discriminant.
///
/// The data for each case lives on the matching [`DefinitionError`] variant;
/// this enum exists so callers can branch on the kind without destructuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum DefinitionErrorKind {
    MissingPattern,
    InvalidPattern,
    EoiAnchorFound,
    SoiAnchorFound,
    UnsupportedFlagsFound,
    DuplicatePatternsFound,
    InvalidGroupTypeFound,
    PushModeDoesNotExist,
    DefaultModeDoesNotExist,
    EmptyMatchPattern,
}

/// A single catalog validation failure.
///
/// Validation never stops at the first problem; construction collects every
/// failure into a [`DefinitionErrors`] list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError<K: TokenKind> {
    #[error("token {token:?} in mode \"{mode}\" is missing a pattern")]
    MissingPattern { token: K, mode: CompactString },

    #[error("token {token:?} has an invalid pattern: {reason}")]
    InvalidPattern { token: K, reason: String },

    #[error("token {token:?} pattern contains an end-of-input anchor '$'")]
    EoiAnchorFound { token: K },

    #[error("token {token:?} pattern contains a start-of-input anchor '^'")]
    SoiAnchorFound { token: K },

    #[error("token {token:?} pattern enables unsupported flags: {flags}")]
    UnsupportedFlagsFound { token: K, flags: String },

    #[error("tokens {tokens:?} in mode \"{mode}\" share the identical pattern /{pattern}/")]
    DuplicatePatternsFound {
        tokens: Vec<K>,
        mode: CompactString,
        pattern: String,
    },

    #[error("token {token:?} has an invalid group: {reason}")]
    InvalidGroupTypeFound { token: K, reason: String },

    #[error("token {token:?} pushes mode \"{mode}\" which is not part of the definition")]
    PushModeDoesNotExist { token: K, mode: CompactString },

    #[error("initial mode \"{mode}\" is not part of the definition")]
    DefaultModeDoesNotExist { mode: CompactString },

    #[error("token {token:?} pattern can match the empty string")]
    EmptyMatchPattern { token: K },
}

impl<K: TokenKind> DefinitionError<K> {
    /// Get the kind of this definition error
    #[must_use]
    pub const fn kind(&self) -> DefinitionErrorKind {
        match self {
            Self::MissingPattern { .. } => DefinitionErrorKind::MissingPattern,
            Self::InvalidPattern { .. } => DefinitionErrorKind::InvalidPattern,
            Self::EoiAnchorFound { .. } => DefinitionErrorKind::EoiAnchorFound,
            Self::SoiAnchorFound { .. } => DefinitionErrorKind::SoiAnchorFound,
            Self::UnsupportedFlagsFound { .. } => DefinitionErrorKind::UnsupportedFlagsFound,
            Self::DuplicatePatternsFound { .. } => DefinitionErrorKind::DuplicatePatternsFound,
            Self::InvalidGroupTypeFound { .. } => DefinitionErrorKind::InvalidGroupTypeFound,
            Self::PushModeDoesNotExist { .. } => DefinitionErrorKind::PushModeDoesNotExist,
            Self::DefaultModeDoesNotExist { .. } => DefinitionErrorKind::DefaultModeDoesNotExist,
            Self::EmptyMatchPattern { .. } => DefinitionErrorKind::EmptyMatchPattern,
        }
    }
}

/// Every validation failure found in a lexer definition.
///
/// `Display` concatenates all messages, one per line, so the whole story
/// surfaces even when the list is propagated with `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionErrors<K: TokenKind>(pub Vec<DefinitionError<K>>);

impl<K: TokenKind> std::fmt::Display for DefinitionErrors<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "lexer definition contains {} error(s):", self.0.len())?;
        for err in &self.0 {
            write!(f, "\n  {err}")?;
        }
        Ok(())
    }
}

impl<K: TokenKind> std::error::Error for DefinitionErrors<K> {}

/// Types of recoverable scanning errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
pub enum LexErrorKind {
    /// No pattern of the current mode matched; the scanner dropped input
    /// until one did.
    #[error("unexpected character: ->{text}<-")]
    UnexpectedCharacters {
        /// The skipped input
        text: CompactString,
    },

    /// A token asked to pop the only remaining mode.
    #[error("unable to pop lexer mode after matching \"{image}\": the mode stack is empty")]
    EmptyModeStack {
        /// Image of the offending token
        image: CompactString,
    },
}

/// A recoverable scanning error with location information.
///
/// `length` is the number of input bytes the record covers: the resync skip
/// span for [`LexErrorKind::UnexpectedCharacters`], the token image length
/// for [`LexErrorKind::EmptyModeStack`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serialize", derive(Serialize, Deserialize))]
#[error("{kind} at line: {line}, column: {column} (offset {offset}, {length} byte(s))")]
pub struct LexError {
    pub offset: usize,
    pub line: u32,
    pub column: u32,
    pub length: usize,
    #[source]
    pub kind: LexErrorKind,
}

impl LexError {
    /// Get the kind of this error
    #[must_use]
    pub const fn kind(&self) -> &LexErrorKind {
        &self.kind
    }

    /// The full human-readable message
    #[must_use]
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(feature = "diagnostics")]
impl miette::Diagnostic for LexError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(match self.kind {
            LexErrorKind::UnexpectedCharacters { .. } => "lexer::unexpected_characters",
            LexErrorKind::EmptyModeStack { .. } => "lexer::empty_mode_stack",
        }))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        Some(Box::new(std::iter::once(miette::LabeledSpan::new(
            Some(self.kind.to_string()),
            self.offset,
            self.length,
        ))))
    }
}

/// Why a `tokenize` call could not run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError<K: TokenKind> {
    /// The lexer was constructed with deferred definition errors.
    #[error(transparent)]
    Definition(#[from] DefinitionErrors<K>),

    /// The requested initial mode is not part of the definition.
    #[error("unknown lexer mode: \"{0}\"")]
    UnknownMode(CompactString),
}
