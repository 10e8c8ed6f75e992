#![allow(dead_code)]

use setget_dsl::{Token, TokenKind, lex};

/// Lex `input` and return `(kind, text)` pairs.
pub fn lex_pairs(input: &str) -> Vec<(TokenKind, String)> {
    lex(input).map(|t| (t.kind, t.text)).collect()
}

/// Shorthand for building expected `(kind, text)` pairs.
pub fn pair(kind: TokenKind, text: &str) -> (TokenKind, String) {
    (kind, text.to_string())
}

/// Assert that token spans cover the input in order, that each
/// token's text is its span's slice, and that only whitespace
/// falls between spans.
pub fn assert_spans_cover(input: &str, tokens: &[Token]) {
    let mut cursor = 0;
    for token in tokens {
        if matches!(token.kind, TokenKind::Error(_)) {
            continue;
        }
        assert!(
            token.span.start >= cursor,
            "token {token} overlaps previous span in {input:?}"
        );
        let gap = &input[cursor..token.span.start];
        assert!(
            gap.chars().all(char::is_whitespace),
            "non-whitespace gap {gap:?} before {token} in {input:?}"
        );
        assert_eq!(token.text, &input[token.span.start..token.span.end]);
        cursor = token.span.end;
    }
    if tokens.last().is_some_and(|t| t.kind == TokenKind::EndOfInput) {
        assert_eq!(cursor, input.len());
    } else if !tokens.iter().any(|t| matches!(t.kind, TokenKind::Error(_))) {
        // silent close: only trailing whitespace is left
        assert!(input[cursor..].chars().all(char::is_whitespace));
    }
}
