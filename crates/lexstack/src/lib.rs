//! # Lexstack
//!
//! A fault-tolerant, table-driven lexer engine with stacked lexing modes.
//!
//! ## Overview
//!
//! Lexstack turns a caller-supplied catalog of token descriptors into a
//! reusable scanner. It supports:
//!
//! - **Table-driven dispatch**: descriptors compile once into per-mode
//!   pattern tables; declaration order is match priority
//! - **Longer alternatives**: classic keyword-vs-identifier disambiguation
//!   via a per-descriptor re-try that wins only when strictly longer
//! - **Lexing modes**: a mode stack driven by per-token push/pop directives
//!   for context-sensitive scanning (content vs attribute mode, etc.)
//! - **Precise positions**: byte offset, 1-based line/column, and end
//!   positions across multi-line matches and mixed `\r`, `\n`, `\r\n`
//! - **Error recovery**: unmatched input is skipped character by character
//!   and reported, never fatal; the token stream stays well formed
//! - **Group dispatch**: route matches into the main stream, named buckets,
//!   or drop them entirely (whitespace, comments)
//!
//! ## Quick Start
//!
//! ```rust
//! use lexstack::{LexerBuilder, TokenType};
//!
//! // 1. Define your token kinds (any Copy + Eq + Hash + Debug type)
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Kind {
//!     While,
//!     Do,
//!     Identifier,
//!     Integer,
//!     Whitespace,
//!     Comment,
//! }
//!
//! // 2. Describe the catalog. Order is priority: keywords go first and
//! //    defer to the identifier via a longer alternative.
//! let lexer = LexerBuilder::new()
//!     .token(TokenType::new(Kind::While, "while").longer_alt(Kind::Identifier))
//!     .token(TokenType::new(Kind::Do, "do").longer_alt(Kind::Identifier))
//!     .token(TokenType::new(Kind::Identifier, r"[a-zA-Z_]\w*"))
//!     .token(TokenType::new(Kind::Integer, r"\d+"))
//!     .token(TokenType::new(Kind::Comment, r"//[^\n\r]*").group("comments"))
//!     .token(TokenType::new(Kind::Whitespace, r"\s+").skipped().line_breaks(true))
//!     .build()?;
//!
//! // 3. Scan. Errors are collected, not thrown.
//! let result = lexer.tokenize("do dough // note\nwhile")?;
//!
//! let kinds: Vec<Kind> = result.tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(kinds, vec![Kind::Do, Kind::Identifier, Kind::While]);
//! assert_eq!(result.group("comments").map(<[_]>::len), Some(1));
//! assert_eq!(result.tokens[2].start_line, 2);
//! assert!(result.is_clean());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Token descriptors, groups, modes, validation, analysis
//! - [`lexer`] - The engine: construction, configuration, scanning
//! - [`position`] - Line/column accounting helpers
//! - [`error`] - Definition and scanning error types
//!
//! ## Feature Flags
//!
//! - `diagnostics`: [`miette`] integration (codes and labeled spans)
//! - `serialize`: [`serde`] derives on the simple record types

pub mod catalog;
pub mod error;
pub mod kind;
pub mod lexer;
pub mod position;

// Re-export commonly used types
pub use catalog::{DEFAULT_MODE, LexerDefinition, TokenGroup, TokenPattern, TokenType};
pub use error::{
    DefinitionError, DefinitionErrorKind, DefinitionErrors, LexError, LexErrorKind, TokenizeError,
};
pub use kind::TokenKind;
pub use lexer::{LexResult, Lexer, LexerBuilder, LexerConfig, Token};
pub use position::LineCol;
