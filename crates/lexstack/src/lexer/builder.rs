use compact_str::CompactString;

use crate::catalog::{DEFAULT_MODE, LexerDefinition, TokenType};
use crate::error::DefinitionErrors;
use crate::kind::TokenKind;
use crate::lexer::{Lexer, LexerConfig};

/// Incrementally assembles a lexer definition.
///
/// Single-mode catalogs chain [`LexerBuilder::token`] calls; multi-mode
/// catalogs add whole modes with [`LexerBuilder::mode`] and name the initial
/// one with [`LexerBuilder::default_mode`].
pub struct LexerBuilder<K: TokenKind> {
    modes: Vec<(CompactString, Vec<TokenType<K>>)>,
    default_mode: Option<CompactString>,
    config: LexerConfig,
}

impl<K: TokenKind> Default for LexerBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: TokenKind> LexerBuilder<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            modes: Vec::new(),
            default_mode: None,
            config: LexerConfig::default(),
        }
    }

    /// Append a descriptor to the implicit default mode.
    #[must_use]
    pub fn token(self, token: TokenType<K>) -> Self {
        self.push_into(DEFAULT_MODE, vec![token])
    }

    /// Append several descriptors to the implicit default mode.
    #[must_use]
    pub fn tokens(self, tokens: impl IntoIterator<Item = TokenType<K>>) -> Self {
        self.push_into(DEFAULT_MODE, tokens.into_iter().collect())
    }

    /// Add (or extend) a named mode.
    #[must_use]
    pub fn mode(self, name: impl Into<CompactString>, tokens: Vec<TokenType<K>>) -> Self {
        let name = name.into();
        self.push_into(name.as_str(), tokens)
    }

    /// Name the mode scanning starts in.
    #[must_use]
    pub fn default_mode(mut self, name: impl Into<CompactString>) -> Self {
        self.default_mode = Some(name.into());
        self
    }

    /// Replace the construction configuration.
    #[must_use]
    pub fn config(mut self, config: LexerConfig) -> Self {
        self.config = config;
        self
    }

    /// Collect definition errors instead of failing `build`.
    #[must_use]
    pub fn defer_definition_errors(mut self) -> Self {
        self.config.defer_definition_errors = true;
        self
    }

    /// Validate and compile the assembled definition.
    ///
    /// When no initial mode was named, a single-mode definition starts in
    /// its only mode; otherwise the implicit default-mode name is assumed
    /// and validation reports it if absent.
    ///
    /// # Errors
    ///
    /// Returns every validation failure found in the catalog, unless
    /// deferred handling was requested.
    pub fn build(self) -> Result<Lexer<K>, DefinitionErrors<K>> {
        let default_mode = match self.default_mode {
            Some(name) => name,
            None => match self.modes.as_slice() {
                [(only, _)] => only.clone(),
                _ => CompactString::const_new(DEFAULT_MODE),
            },
        };
        Lexer::with_definition(
            LexerDefinition {
                modes: self.modes,
                default_mode,
            },
            self.config,
        )
    }

    fn push_into(mut self, name: &str, tokens: Vec<TokenType<K>>) -> Self {
        if let Some((_, existing)) = self.modes.iter_mut().find(|(mode, _)| mode.as_str() == name) {
            existing.extend(tokens);
        } else {
            self.modes.push((name.into(), tokens));
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TokenGroup;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestKind {
        Ident,
        Number,
        Plus,
        Whitespace,
        Enter,
        Exit,
    }

    #[test]
    fn test_builder_new_is_empty() {
        let builder = LexerBuilder::<TestKind>::new();
        assert!(builder.modes.is_empty());
        assert!(builder.default_mode.is_none());
        assert!(!builder.config.defer_definition_errors);
    }

    #[test]
    fn test_builder_token_accumulates_in_order() {
        let builder = LexerBuilder::new()
            .token(TokenType::new(TestKind::Ident, r"[a-z]+"))
            .token(TokenType::new(TestKind::Number, r"\d+"));
        assert_eq!(builder.modes.len(), 1);
        assert_eq!(builder.modes[0].0, DEFAULT_MODE);
        assert_eq!(builder.modes[0].1.len(), 2);
        assert_eq!(builder.modes[0].1[0].kind, TestKind::Ident);
        assert_eq!(builder.modes[0].1[1].kind, TestKind::Number);
    }

    #[test]
    fn test_builder_tokens_batch() {
        let builder = LexerBuilder::new().tokens(vec![
            TokenType::new(TestKind::Plus, r"\+"),
            TokenType::new(TestKind::Whitespace, r"[ \t]+").skipped(),
        ]);
        assert_eq!(builder.modes[0].1.len(), 2);
        assert_eq!(builder.modes[0].1[1].group, TokenGroup::Skipped);
    }

    #[test]
    fn test_builder_modes() {
        let builder = LexerBuilder::new()
            .mode(
                "outer",
                vec![TokenType::new(TestKind::Enter, "enter").push_mode("inner")],
            )
            .mode(
                "inner",
                vec![TokenType::new(TestKind::Exit, "exit").pop_mode()],
            )
            .default_mode("outer");
        assert_eq!(builder.modes.len(), 2);
        assert_eq!(builder.default_mode.as_deref(), Some("outer"));
    }

    #[test]
    fn test_builder_mode_extends_existing() {
        let builder = LexerBuilder::new()
            .mode("m", vec![TokenType::new(TestKind::Ident, r"[a-z]+")])
            .mode("m", vec![TokenType::new(TestKind::Number, r"\d+")]);
        assert_eq!(builder.modes.len(), 1);
        assert_eq!(builder.modes[0].1.len(), 2);
    }

    #[test]
    fn test_builder_build_single_mode() {
        let lexer = LexerBuilder::new()
            .token(TokenType::new(TestKind::Ident, r"[a-z]+"))
            .build()
            .expect("single-mode build should succeed");
        assert_eq!(lexer.modes().collect::<Vec<_>>(), vec![DEFAULT_MODE]);
    }

    #[test]
    fn test_builder_build_named_single_mode_is_default() {
        let lexer = LexerBuilder::new()
            .mode("only", vec![TokenType::new(TestKind::Ident, r"[a-z]+")])
            .build()
            .expect("build should pick the only mode as default");
        let result = lexer.tokenize("abc").expect("tokenize should run");
        assert_eq!(result.tokens.len(), 1);
    }

    #[test]
    fn test_builder_defer_definition_errors() {
        let lexer = LexerBuilder::new()
            .token(TokenType::new(TestKind::Ident, r"[unclosed"))
            .defer_definition_errors()
            .build()
            .expect("deferred build should succeed");
        assert_eq!(lexer.definition_errors.len(), 1);
        assert!(lexer.tokenize("x").is_err());
    }
}
