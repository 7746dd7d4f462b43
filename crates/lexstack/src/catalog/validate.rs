//! Catalog validation
//!
//! Runs once per mode at construction and reports every problem it finds as
//! a list. Construction decides whether the list is fatal immediately or
//! deferred until `tokenize`.

use hashbrown::HashMap;

use crate::catalog::analyze::compile_anchored;
use crate::catalog::{LexerDefinition, TokenGroup, TokenPattern, TokenType};
use crate::error::DefinitionError;
use crate::kind::TokenKind;

/// Validate a lexer definition, collecting every failure.
///
/// The returned list is deterministic: the initial-mode check first, then
/// per-descriptor checks in declaration order, then duplicate-pattern checks
/// per mode.
pub(crate) fn validate_definition<K: TokenKind>(
    def: &LexerDefinition<K>,
) -> Vec<DefinitionError<K>> {
    let mut errors = Vec::new();

    if def.mode(&def.default_mode).is_none() {
        errors.push(DefinitionError::DefaultModeDoesNotExist {
            mode: def.default_mode.clone(),
        });
    }

    for (mode_name, tokens) in &def.modes {
        for tok in tokens {
            validate_descriptor(tok, mode_name, def, &mut errors);
        }
        find_duplicate_patterns(tokens, mode_name, &mut errors);
    }

    errors
}

fn validate_descriptor<K: TokenKind>(
    tok: &TokenType<K>,
    mode_name: &str,
    def: &LexerDefinition<K>,
    errors: &mut Vec<DefinitionError<K>>,
) {
    match &tok.pattern {
        None => errors.push(DefinitionError::MissingPattern {
            token: tok.kind,
            mode: mode_name.into(),
        }),
        Some(TokenPattern::NotApplicable) => {}
        Some(TokenPattern::Regex(source)) => match compile_anchored(source) {
            Err(err) => errors.push(DefinitionError::InvalidPattern {
                token: tok.kind,
                reason: err.to_string(),
            }),
            Ok(compiled) => {
                let scan = scan_pattern_source(source);
                if scan.soi_anchor {
                    errors.push(DefinitionError::SoiAnchorFound { token: tok.kind });
                }
                if scan.eoi_anchor {
                    errors.push(DefinitionError::EoiAnchorFound { token: tok.kind });
                }
                if let Some(flags) = scan.flags {
                    errors.push(DefinitionError::UnsupportedFlagsFound {
                        token: tok.kind,
                        flags,
                    });
                }
                // Anchors and flags already make the empty-width question moot.
                if !scan.soi_anchor
                    && !scan.eoi_anchor
                    && compiled.find("").is_some()
                {
                    errors.push(DefinitionError::EmptyMatchPattern { token: tok.kind });
                }
            }
        },
    }

    if let TokenGroup::Named(name) = &tok.group
        && name.is_empty()
    {
        errors.push(DefinitionError::InvalidGroupTypeFound {
            token: tok.kind,
            reason: "group name must not be empty".to_string(),
        });
    }

    if let Some(target) = &tok.push_mode
        && def.mode(target).is_none()
    {
        errors.push(DefinitionError::PushModeDoesNotExist {
            token: tok.kind,
            mode: target.clone(),
        });
    }
}

fn find_duplicate_patterns<K: TokenKind>(
    tokens: &[TokenType<K>],
    mode_name: &str,
    errors: &mut Vec<DefinitionError<K>>,
) {
    let mut by_source: HashMap<&str, Vec<K>, ahash::RandomState> =
        HashMap::with_hasher(ahash::RandomState::new());
    let mut order = Vec::new();

    for tok in tokens {
        if let Some(TokenPattern::Regex(source)) = &tok.pattern {
            let entry = by_source.entry(source.as_str()).or_default();
            if entry.is_empty() {
                order.push(source.as_str());
            }
            entry.push(tok.kind);
        }
    }

    for source in order {
        if let Some(kinds) = by_source.get(source)
            && kinds.len() > 1
        {
            errors.push(DefinitionError::DuplicatePatternsFound {
                tokens: kinds.clone(),
                mode: mode_name.into(),
                pattern: source.to_string(),
            });
        }
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct PatternScan {
    soi_anchor: bool,
    eoi_anchor: bool,
    flags: Option<String>,
}

/// Surface-scan a pattern source for forbidden anchors and inline flags.
///
/// Tracks escape sequences and character classes so `[$]`, `\$`, and `[^a]`
/// do not trip the anchor checks.
fn scan_pattern_source(src: &str) -> PatternScan {
    let mut scan = PatternScan::default();
    let bytes = src.as_bytes();
    let mut in_class = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'[' if !in_class => {
                in_class = true;
                // a '^' directly after '[' is class negation
                if bytes.get(i + 1) == Some(&b'^') {
                    i += 2;
                } else {
                    i += 1;
                }
            }
            b']' if in_class => {
                in_class = false;
                i += 1;
            }
            b'^' if !in_class => {
                scan.soi_anchor = true;
                i += 1;
            }
            b'$' if !in_class => {
                scan.eoi_anchor = true;
                i += 1;
            }
            b'(' if !in_class && bytes.get(i + 1) == Some(&b'?') => {
                if let Some(flags) = scan_inline_flags(&bytes[i + 2..])
                    && flags.contains('m')
                {
                    scan.flags = Some(flags);
                }
                i += 2;
            }
            _ => i += 1,
        }
    }

    scan
}

/// Read the enabled-flags run of an inline `(?...)` group, or `None` when
/// the group is not a flags group at all.
pub(crate) fn scan_inline_flags(rest: &[u8]) -> Option<String> {
    let mut enabled = String::new();
    let mut disabling = false;
    for &b in rest {
        match b {
            b':' | b')' => return Some(enabled),
            b'-' => disabling = true,
            b'i' | b'm' | b's' | b'x' | b'u' | b'U' | b'R' => {
                if !disabling {
                    enabled.push(b as char);
                }
            }
            _ => return None,
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DEFAULT_MODE;
    use crate::error::DefinitionErrorKind;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestKind {
        A,
        B,
        C,
    }

    fn kinds_of<K: TokenKind>(errors: &[DefinitionError<K>]) -> Vec<DefinitionErrorKind> {
        errors.iter().map(DefinitionError::kind).collect()
    }

    #[test]
    fn test_scan_plain_pattern() {
        assert_eq!(scan_pattern_source(r"[a-z]+\d*"), PatternScan::default());
    }

    #[test]
    fn test_scan_eoi_anchor() {
        assert!(scan_pattern_source(r"abc$").eoi_anchor);
        // escaped or classed dollars are literals
        assert!(!scan_pattern_source(r"abc\$").eoi_anchor);
        assert!(!scan_pattern_source(r"[$]").eoi_anchor);
    }

    #[test]
    fn test_scan_soi_anchor() {
        assert!(scan_pattern_source(r"^abc").soi_anchor);
        assert!(!scan_pattern_source(r"\^abc").soi_anchor);
        // negation and in-class carets are not anchors
        assert!(!scan_pattern_source(r"[^abc]").soi_anchor);
        assert!(!scan_pattern_source(r"[a^]").soi_anchor);
    }

    #[test]
    fn test_scan_inline_flags() {
        assert_eq!(scan_pattern_source(r"(?m)abc").flags.as_deref(), Some("m"));
        assert_eq!(
            scan_pattern_source(r"(?im:x)").flags.as_deref(),
            Some("im")
        );
        // disabling and unrelated flags are fine
        assert!(scan_pattern_source(r"(?i)abc").flags.is_none());
        assert!(scan_pattern_source(r"(?-m)abc").flags.is_none());
        // non-flag groups are left alone
        assert!(scan_pattern_source(r"(?:m)").flags.is_none());
        assert!(scan_pattern_source(r"(?P<m>x)").flags.is_none());
    }

    #[test]
    fn test_validate_clean_definition() {
        let def: LexerDefinition<TestKind> = vec![
            TokenType::new(TestKind::A, r"[a-z]+"),
            TokenType::new(TestKind::B, r"\d+"),
        ]
        .into();
        assert!(validate_definition(&def).is_empty());
    }

    #[test]
    fn test_validate_missing_pattern() {
        let def: LexerDefinition<TestKind> = vec![TokenType {
            pattern: None,
            ..TokenType::new(TestKind::A, "x")
        }]
        .into();
        assert_eq!(
            kinds_of(&validate_definition(&def)),
            vec![DefinitionErrorKind::MissingPattern]
        );
    }

    #[test]
    fn test_validate_invalid_pattern() {
        let def: LexerDefinition<TestKind> =
            vec![TokenType::new(TestKind::A, r"[unclosed")].into();
        assert_eq!(
            kinds_of(&validate_definition(&def)),
            vec![DefinitionErrorKind::InvalidPattern]
        );
    }

    #[test]
    fn test_validate_empty_match_pattern() {
        let def: LexerDefinition<TestKind> = vec![TokenType::new(TestKind::A, r"a*")].into();
        assert_eq!(
            kinds_of(&validate_definition(&def)),
            vec![DefinitionErrorKind::EmptyMatchPattern]
        );
    }

    #[test]
    fn test_validate_duplicates_report_all_sharing_kinds() {
        let def: LexerDefinition<TestKind> = vec![
            TokenType::new(TestKind::A, r"\d+"),
            TokenType::new(TestKind::B, r"\d+"),
            TokenType::new(TestKind::C, r"\d+"),
        ]
        .into();
        let errors = validate_definition(&def);
        assert_eq!(errors.len(), 1);
        match &errors[0] {
            DefinitionError::DuplicatePatternsFound { tokens, pattern, .. } => {
                assert_eq!(tokens, &vec![TestKind::A, TestKind::B, TestKind::C]);
                assert_eq!(pattern, r"\d+");
            }
            other => panic!("expected duplicate-pattern error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_push_mode_unknown() {
        let def: LexerDefinition<TestKind> =
            vec![TokenType::new(TestKind::A, "a").push_mode("nowhere")].into();
        assert_eq!(
            kinds_of(&validate_definition(&def)),
            vec![DefinitionErrorKind::PushModeDoesNotExist]
        );
    }

    #[test]
    fn test_validate_default_mode_unknown() {
        let def = LexerDefinition::<TestKind> {
            modes: vec![(DEFAULT_MODE.into(), vec![TokenType::new(TestKind::A, "a")])],
            default_mode: "elsewhere".into(),
        };
        assert_eq!(
            kinds_of(&validate_definition(&def)),
            vec![DefinitionErrorKind::DefaultModeDoesNotExist]
        );
    }

    #[test]
    fn test_validate_accumulates_everything() {
        let def: LexerDefinition<TestKind> = vec![
            TokenType::new(TestKind::A, r"x$"),
            TokenType::new(TestKind::B, r"(?m)y").group(""),
        ]
        .into();
        let kinds = kinds_of(&validate_definition(&def));
        assert_eq!(
            kinds,
            vec![
                DefinitionErrorKind::EoiAnchorFound,
                DefinitionErrorKind::UnsupportedFlagsFound,
                DefinitionErrorKind::InvalidGroupTypeFound,
            ]
        );
    }

    #[test]
    fn test_validate_category_is_exempt() {
        let def: LexerDefinition<TestKind> = vec![
            TokenType::category(TestKind::A),
            TokenType::new(TestKind::B, r"[a-z]+"),
        ]
        .into();
        assert!(validate_definition(&def).is_empty());
    }
}
