//! # Lexer Module
//!
//! The engine proper: construction compiles and caches the catalog,
//! `tokenize` runs the scan loop against it.
//!
//! ## Overview
//!
//! A [`Lexer`] is built once from a catalog of token descriptors and is
//! immutable afterwards. Each `tokenize` call owns its own cursor, mode
//! stack, and output buffers, so a lexer can be shared by reference across
//! threads and used concurrently on independent inputs.
//!
//! Scanning is fault tolerant: input no pattern matches is skipped one
//! character at a time until scanning can resume, and each skipped span
//! becomes one entry of [`LexResult::errors`] rather than a failure.
//!
//! ## Usage
//!
//! ```rust
//! use lexstack::{Lexer, TokenType};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind {
//!     Word,
//!     Number,
//!     Whitespace,
//! }
//!
//! let lexer = Lexer::new(vec![
//!     TokenType::new(Kind::Word, r"[a-zA-Z]+"),
//!     TokenType::new(Kind::Number, r"\d+"),
//!     TokenType::new(Kind::Whitespace, r"\s+").skipped().line_breaks(true),
//! ])?;
//!
//! let result = lexer.tokenize("answer 42")?;
//! assert_eq!(result.tokens.len(), 2);
//! assert_eq!(result.tokens[1].image, "42");
//! assert_eq!(result.tokens[1].start_column, 8);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Construction returns [`crate::DefinitionErrors`] listing every problem in
//! the catalog. With [`LexerConfig::defer_definition_errors`] the list is
//! instead exposed on [`Lexer::definition_errors`] and any `tokenize` call
//! fails with it.

pub mod builder;
pub(crate) mod scan;
pub mod token;

pub use builder::LexerBuilder;
pub use token::{LexResult, Token};

use crate::catalog::analyze::{CompiledCatalog, analyze_definition};
use crate::catalog::validate::validate_definition;
use crate::catalog::{LexerDefinition, TokenType};
use crate::error::{DefinitionError, DefinitionErrors, TokenizeError};
use crate::kind::TokenKind;
use crate::lexer::scan::Scanner;

/// Configuration options for lexer construction.
///
/// # Example
///
/// ```rust
/// use lexstack::LexerConfig;
///
/// // Use default configuration
/// let config = LexerConfig::default();
///
/// // Or customize it
/// let config = LexerConfig {
///     defer_definition_errors: true,
/// };
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexerConfig {
    /// Collect catalog validation failures on [`Lexer::definition_errors`]
    /// instead of failing construction; `tokenize` then fails with them.
    pub defer_definition_errors: bool,
}

/// A compiled, immutable lexer.
///
/// Construction validates the catalog, then compiles one dispatch table per
/// mode. `tokenize` never mutates the lexer.
#[derive(Debug)]
pub struct Lexer<K: TokenKind> {
    catalog: CompiledCatalog<K>,
    config: LexerConfig,
    /// Validation failures found at construction. Empty unless
    /// [`LexerConfig::defer_definition_errors`] was set.
    pub definition_errors: Vec<DefinitionError<K>>,
}

impl<K: TokenKind> Lexer<K> {
    /// Build a lexer from a plain descriptor list (one implicit mode).
    ///
    /// # Errors
    ///
    /// Returns every validation failure found in the catalog.
    pub fn new(tokens: Vec<TokenType<K>>) -> Result<Self, DefinitionErrors<K>> {
        Self::with_definition(tokens, LexerConfig::default())
    }

    /// Build a lexer from a full multi-mode definition and configuration.
    ///
    /// # Errors
    ///
    /// Returns every validation failure found in the catalog, unless
    /// deferred handling was requested.
    pub fn with_definition(
        definition: impl Into<LexerDefinition<K>>,
        config: LexerConfig,
    ) -> Result<Self, DefinitionErrors<K>> {
        let definition = definition.into();
        let errors = validate_definition(&definition);
        if !errors.is_empty() && !config.defer_definition_errors {
            return Err(DefinitionErrors(errors));
        }
        // With deferred errors the analyzer still runs; it ignores
        // descriptors that failed to compile.
        let catalog = analyze_definition(&definition);
        Ok(Self {
            catalog,
            config,
            definition_errors: errors,
        })
    }

    /// Scan `input` starting in the definition's initial mode.
    ///
    /// # Errors
    ///
    /// Fails only when construction deferred definition errors; lexical
    /// problems in the input are reported via [`LexResult::errors`].
    pub fn tokenize(&self, input: &str) -> Result<LexResult<K>, TokenizeError<K>> {
        self.ensure_well_defined()?;
        Ok(Scanner::new(&self.catalog, input, self.catalog.default_mode).run())
    }

    /// Scan `input` starting in the named mode instead of the default.
    ///
    /// # Errors
    ///
    /// As [`Lexer::tokenize`], plus [`TokenizeError::UnknownMode`] when the
    /// definition has no mode of that name.
    pub fn tokenize_with_mode(
        &self,
        input: &str,
        initial_mode: &str,
    ) -> Result<LexResult<K>, TokenizeError<K>> {
        self.ensure_well_defined()?;
        let mode = self
            .catalog
            .mode_index(initial_mode)
            .ok_or_else(|| TokenizeError::UnknownMode(initial_mode.into()))?;
        Ok(Scanner::new(&self.catalog, input, mode).run())
    }

    /// The mode names of the definition, in declaration order.
    pub fn modes(&self) -> impl Iterator<Item = &str> {
        self.catalog.mode_names.iter().map(|name| name.as_str())
    }

    /// The configuration the lexer was built with.
    #[must_use]
    pub const fn config(&self) -> LexerConfig {
        self.config
    }

    fn ensure_well_defined(&self) -> Result<(), TokenizeError<K>> {
        if self.definition_errors.is_empty() {
            Ok(())
        } else {
            Err(DefinitionErrors(self.definition_errors.clone()).into())
        }
    }
}
