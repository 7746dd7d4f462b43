//! Tests for the mode stack: push, pop, replacement, and over-pop recovery

use lexstack::{
    Lexer, LexErrorKind, LexerBuilder, LexerConfig, LexerDefinition, TokenType, TokenizeError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Kind {
    X,
    Y,
    Z,
    Enter,
    Exit,
    Swap,
    Whitespace,
}

fn two_mode_lexer() -> Lexer<Kind> {
    LexerBuilder::new()
        .mode(
            "M1",
            vec![
                TokenType::new(Kind::Enter, "Enter").push_mode("M2"),
                TokenType::new(Kind::X, "X"),
                TokenType::new(Kind::Whitespace, r"[ \t]+").skipped(),
            ],
        )
        .mode(
            "M2",
            vec![
                TokenType::new(Kind::Y, "Y"),
                TokenType::new(Kind::Exit, "Exit").pop_mode(),
                TokenType::new(Kind::Whitespace, r"[ \t]+").skipped(),
            ],
        )
        .default_mode("M1")
        .build()
        .expect("catalog should be valid")
}

#[test]
fn test_push_and_pop_round_trip() {
    let result = two_mode_lexer()
        .tokenize("X Enter Y Exit X")
        .expect("tokenize should run");
    assert!(result.is_clean());
    assert_eq!(
        result.tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![Kind::X, Kind::Enter, Kind::Y, Kind::Exit, Kind::X]
    );
}

#[test]
fn test_mode_switch_changes_matching() {
    // "Y" is not a token of M1
    let result = two_mode_lexer().tokenize("Y").expect("tokenize should run");
    assert!(result.tokens.is_empty());
    assert_eq!(result.errors.len(), 1);
}

#[test]
fn test_over_pop_reports_error_but_emits_token() {
    let lexer = two_mode_lexer();
    let result = lexer
        .tokenize_with_mode("Y Exit Y", "M2")
        .expect("tokenize should run");

    // the pop had nothing to pop: error recorded, token still emitted,
    // scanning continues in the same mode
    assert_eq!(
        result.tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![Kind::Y, Kind::Exit, Kind::Y]
    );
    assert_eq!(result.errors.len(), 1);
    let err = &result.errors[0];
    assert_eq!(
        err.kind,
        LexErrorKind::EmptyModeStack { image: "Exit".into() }
    );
    assert_eq!((err.offset, err.length), (2, 4));
    assert_eq!((err.line, err.column), (1, 3));
}

#[test]
fn test_pop_then_push_replaces_mode() {
    let lexer = LexerBuilder::new()
        .mode(
            "M1",
            vec![
                TokenType::new(Kind::Enter, "Enter").push_mode("M2"),
                TokenType::new(Kind::Whitespace, r"[ \t]+").skipped(),
            ],
        )
        .mode(
            "M2",
            vec![
                TokenType::new(Kind::Swap, "Swap").pop_mode().push_mode("M3"),
                TokenType::new(Kind::Whitespace, r"[ \t]+").skipped(),
            ],
        )
        .mode(
            "M3",
            vec![
                TokenType::new(Kind::Z, "Z"),
                TokenType::new(Kind::Whitespace, r"[ \t]+").skipped(),
            ],
        )
        .default_mode("M1")
        .build()
        .expect("catalog should be valid");

    let result = lexer
        .tokenize("Enter Swap Z")
        .expect("tokenize should run");
    assert!(result.is_clean());
    assert_eq!(
        result.tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![Kind::Enter, Kind::Swap, Kind::Z]
    );
}

#[test]
fn test_unknown_initial_mode() {
    let lexer = two_mode_lexer();
    let err = lexer
        .tokenize_with_mode("X", "M9")
        .expect_err("unknown mode must fail");
    assert_eq!(err, TokenizeError::UnknownMode("M9".into()));
}

#[test]
fn test_definition_form_and_default_mode() {
    let definition = LexerDefinition::<Kind> {
        modes: vec![
            (
                "content".into(),
                vec![
                    TokenType::new(Kind::X, "x"),
                    TokenType::new(Kind::Enter, "<").push_mode("tag"),
                ],
            ),
            (
                "tag".into(),
                vec![TokenType::new(Kind::Exit, ">").pop_mode()],
            ),
        ],
        default_mode: "content".into(),
    };
    let lexer = Lexer::with_definition(definition, LexerConfig::default())
        .expect("catalog should be valid");

    assert_eq!(lexer.modes().collect::<Vec<_>>(), vec!["content", "tag"]);
    let result = lexer.tokenize("x<>x").expect("tokenize should run");
    assert_eq!(
        result.tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![Kind::X, Kind::Enter, Kind::Exit, Kind::X]
    );
}

#[test]
fn test_mode_directives_apply_to_skipped_tokens() {
    // a skipped token still pushes its mode
    let lexer = LexerBuilder::new()
        .mode(
            "M1",
            vec![TokenType::new(Kind::Enter, "->").skipped().push_mode("M2")],
        )
        .mode("M2", vec![TokenType::new(Kind::Y, "Y")])
        .default_mode("M1")
        .build()
        .expect("catalog should be valid");

    let result = lexer.tokenize("->Y").expect("tokenize should run");
    assert_eq!(
        result.tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![Kind::Y]
    );
    assert!(result.is_clean());
}
