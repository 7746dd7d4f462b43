#![no_main]
use libfuzzer_sys::fuzz_target;
use lexstack::{LexerBuilder, TokenType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum FuzzKind {
    Word,
    Number,
    Punct,
    Whitespace,
}

fuzz_target!(|data: &str| {
    let lexer = LexerBuilder::new()
        .token(TokenType::new(FuzzKind::Word, r"[a-z]+"))
        .token(TokenType::new(FuzzKind::Number, r"[0-9]+"))
        .token(TokenType::new(FuzzKind::Punct, r"[;,.(){}]"))
        .token(
            TokenType::new(FuzzKind::Whitespace, r"[ \t\r\n]+")
                .group("whitespace")
                .line_breaks(true),
        )
        .build()
        .expect("fuzz catalog is valid");

    let result = lexer.tokenize(data).expect("tokenize always runs");

    // every input byte is accounted for exactly once
    let mut spans: Vec<(usize, usize)> = result
        .tokens
        .iter()
        .chain(result.groups.values().flatten())
        .map(|t| (t.start_offset, t.image.len()))
        .chain(result.errors.iter().map(|e| (e.offset, e.length)))
        .collect();
    spans.sort_unstable();

    let mut covered = 0;
    for (offset, len) in spans {
        assert_eq!(covered, offset);
        covered += len;
    }
    assert_eq!(covered, data.len());
});
