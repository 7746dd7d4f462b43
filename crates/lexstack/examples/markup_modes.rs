//! Markup-mode example
//!
//! A markup-like grammar scanned with two modes: text content outside tags,
//! attribute syntax inside them. The `<` token pushes the tag mode and `>`
//! pops back to content.

use lexstack::{LexerBuilder, TokenType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum MarkupKind {
    Text,
    TagOpen,
    TagClose,
    Name,
    Equals,
    QuotedValue,
    TagWhitespace,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let lexer = LexerBuilder::new()
        .mode(
            "content",
            vec![
                TokenType::new(MarkupKind::TagOpen, "</?").push_mode("tag"),
                TokenType::new(MarkupKind::Text, r"[^<]+"),
            ],
        )
        .mode(
            "tag",
            vec![
                TokenType::new(MarkupKind::TagClose, "/?>").pop_mode(),
                TokenType::new(MarkupKind::Name, r"[a-zA-Z][\w-]*"),
                TokenType::new(MarkupKind::Equals, "="),
                TokenType::new(MarkupKind::QuotedValue, r#""[^"]*""#),
                TokenType::new(MarkupKind::TagWhitespace, r"\s+").skipped().line_breaks(true),
            ],
        )
        .default_mode("content")
        .build()?;

    let source = r#"<greeting lang="en">hello <b>world</b></greeting>"#;
    let result = lexer.tokenize(source)?;

    for token in &result.tokens {
        println!("{:?} {:?}", token.kind, token.image);
    }
    println!("errors: {}", result.errors.len());

    Ok(())
}
