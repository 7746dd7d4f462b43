//! Expression lexer example
//!
//! Shows keyword-vs-identifier disambiguation, skipped whitespace, a
//! comment bucket, and how lexical errors are collected instead of thrown.

use lexstack::{LexerBuilder, TokenType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ExprKind {
    Let,
    In,
    Identifier,
    Integer,
    Plus,
    Equals,
    Comment,
    Whitespace,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let lexer = LexerBuilder::new()
        .token(TokenType::new(ExprKind::Let, "let").longer_alt(ExprKind::Identifier))
        .token(TokenType::new(ExprKind::In, "in").longer_alt(ExprKind::Identifier))
        .token(TokenType::new(ExprKind::Identifier, r"[a-zA-Z_]\w*"))
        .token(TokenType::new(ExprKind::Integer, r"\d+"))
        .token(TokenType::new(ExprKind::Plus, r"\+"))
        .token(TokenType::new(ExprKind::Equals, "="))
        .token(TokenType::new(ExprKind::Comment, r"//[^\n\r]*").group("comments"))
        .token(TokenType::new(ExprKind::Whitespace, r"\s+").skipped().line_breaks(true))
        .build()?;

    let source = "let increment = 1 // step\nlet total = increment + 41 @ in total";
    let result = lexer.tokenize(source)?;

    println!("tokens:");
    for token in &result.tokens {
        println!(
            "  {:?} {:?} at {}:{}",
            token.kind, token.image, token.start_line, token.start_column
        );
    }

    if let Some(comments) = result.group("comments") {
        println!("comments: {}", comments.len());
    }

    for error in &result.errors {
        println!("error: {error}");
    }

    Ok(())
}
