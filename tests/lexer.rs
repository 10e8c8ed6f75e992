//! Lexer behaviour and error tests.

mod common;

use common::{assert_spans_cover, lex_pairs, pair};
use setget_dsl::{Keyword, LexErrorKind, Span, TokenKind, lex, tokenize};

// -----------------------------------------------------------
// Free text.
// -----------------------------------------------------------

#[test]
fn lex_empty_input() {
    assert_eq!(lex_pairs(""), [pair(TokenKind::EndOfInput, "")]);
}

#[test]
fn lex_plain_text() {
    assert_eq!(
        lex_pairs("hello world\n"),
        [
            pair(TokenKind::FreeText, "hello world\n"),
            pair(TokenKind::EndOfInput, ""),
        ]
    );
}

#[test]
fn lex_only_whitespace() {
    assert_eq!(
        lex_pairs(" \t\n "),
        [
            pair(TokenKind::FreeText, " \t\n "),
            pair(TokenKind::EndOfInput, ""),
        ]
    );
}

#[test]
fn lex_multibyte_text() {
    assert_eq!(
        lex_pairs("héllo wörld ✓"),
        [
            pair(TokenKind::FreeText, "héllo wörld ✓"),
            pair(TokenKind::EndOfInput, ""),
        ]
    );
}

// -----------------------------------------------------------
// Commands.
// -----------------------------------------------------------

#[test]
fn lex_set_command() {
    assert_eq!(
        lex_pairs("set x 5"),
        [
            pair(TokenKind::SetKeyword, "set"),
            pair(TokenKind::Identifier, "x"),
            pair(TokenKind::Value, "5"),
            pair(TokenKind::EndOfInput, ""),
        ]
    );
}

#[test]
fn lex_get_command() {
    assert_eq!(
        lex_pairs("get y"),
        [
            pair(TokenKind::GetKeyword, "get"),
            pair(TokenKind::Identifier, "y"),
            pair(TokenKind::EndOfInput, ""),
        ]
    );
}

#[test]
fn lex_set_without_value() {
    assert_eq!(
        lex_pairs("set x"),
        [
            pair(TokenKind::SetKeyword, "set"),
            pair(TokenKind::Identifier, "x"),
            pair(TokenKind::EndOfInput, ""),
        ]
    );
}

#[test]
fn lex_command_inside_text() {
    assert_eq!(
        lex_pairs("hello set x 5 world"),
        [
            pair(TokenKind::FreeText, "hello "),
            pair(TokenKind::SetKeyword, "set"),
            pair(TokenKind::Identifier, "x"),
            pair(TokenKind::Value, "5"),
            pair(TokenKind::FreeText, "world"),
            pair(TokenKind::EndOfInput, ""),
        ]
    );
}

#[test]
fn lex_consecutive_commands() {
    assert_eq!(
        lex_pairs("set a 1 get b 2"),
        [
            pair(TokenKind::SetKeyword, "set"),
            pair(TokenKind::Identifier, "a"),
            pair(TokenKind::Value, "1"),
            pair(TokenKind::GetKeyword, "get"),
            pair(TokenKind::Identifier, "b"),
            pair(TokenKind::Value, "2"),
            pair(TokenKind::EndOfInput, ""),
        ]
    );
}

#[test]
fn lex_mixed_whitespace_between_parts() {
    assert_eq!(
        lex_pairs("set\t _name \n value-1.0"),
        [
            pair(TokenKind::SetKeyword, "set"),
            pair(TokenKind::Identifier, "_name"),
            pair(TokenKind::Value, "value-1.0"),
            pair(TokenKind::EndOfInput, ""),
        ]
    );
}

#[test]
fn lex_identifier_keeps_non_whitespace_tail() {
    let tokens = tokenize("get a.b-c/d").expect("tokenize");
    assert_eq!(tokens[1].text, "a.b-c/d");
}

#[test]
fn lex_multibyte_value() {
    assert_eq!(
        lex_pairs("set greeting héllo"),
        [
            pair(TokenKind::SetKeyword, "set"),
            pair(TokenKind::Identifier, "greeting"),
            pair(TokenKind::Value, "héllo"),
            pair(TokenKind::EndOfInput, ""),
        ]
    );
}

#[test]
fn lex_keyword_inside_word() {
    // no word boundary is required before a keyword
    assert_eq!(
        lex_pairs("asset x 5"),
        [
            pair(TokenKind::FreeText, "as"),
            pair(TokenKind::SetKeyword, "set"),
            pair(TokenKind::Identifier, "x"),
            pair(TokenKind::Value, "5"),
            pair(TokenKind::EndOfInput, ""),
        ]
    );
}

#[test]
fn lex_keyword_as_identifier() {
    assert_eq!(
        lex_pairs("getset"),
        [
            pair(TokenKind::GetKeyword, "get"),
            pair(TokenKind::Identifier, "set"),
            pair(TokenKind::EndOfInput, ""),
        ]
    );
}

#[test]
fn lex_command_word_after_name_is_value() {
    // a keyword right after a name is taken as the value
    assert_eq!(
        lex_pairs("get a set b 1"),
        [
            pair(TokenKind::GetKeyword, "get"),
            pair(TokenKind::Identifier, "a"),
            pair(TokenKind::Value, "set"),
            pair(TokenKind::FreeText, "b 1"),
            pair(TokenKind::EndOfInput, ""),
        ]
    );
}

// -----------------------------------------------------------
// Silent close after trailing whitespace.
// -----------------------------------------------------------

#[test]
fn lex_trailing_space_after_identifier() {
    assert_eq!(
        lex_pairs("get y  "),
        [
            pair(TokenKind::GetKeyword, "get"),
            pair(TokenKind::Identifier, "y"),
        ]
    );
}

#[test]
fn lex_trailing_space_after_value() {
    assert_eq!(
        lex_pairs("set x 5\n"),
        [
            pair(TokenKind::SetKeyword, "set"),
            pair(TokenKind::Identifier, "x"),
            pair(TokenKind::Value, "5"),
        ]
    );
}

// -----------------------------------------------------------
// Errors.
// -----------------------------------------------------------

#[test]
fn lex_error_bad_identifier_start() {
    let pairs = lex_pairs("set 1x 5");
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0], pair(TokenKind::SetKeyword, "set"));
    assert_eq!(
        pairs[1],
        pair(
            TokenKind::Error(LexErrorKind::InvalidVariableStart),
            "variable name can only start with a letter or underscore"
        )
    );
}

#[test]
fn lex_error_missing_name_after_set() {
    let pairs = lex_pairs("text set");
    assert_eq!(
        pairs,
        [
            pair(TokenKind::FreeText, "text "),
            pair(TokenKind::SetKeyword, "set"),
            pair(
                TokenKind::Error(LexErrorKind::MissingVariableName {
                    command: Keyword::Set
                }),
                "variable name is missing after set command"
            ),
        ]
    );
}

#[test]
fn lex_error_non_ascii_identifier_start() {
    let err = tokenize("get élan").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::InvalidVariableStart);
    assert_eq!(err.offset, 4);
}

#[test]
fn lex_error_stops_scanning() {
    let tokens: Vec<_> = lex("set $x 1 get y").collect();
    assert!(matches!(
        tokens.last().map(|t| &t.kind),
        Some(TokenKind::Error(_))
    ));
    assert_eq!(tokens.len(), 2);
}

#[test]
fn lex_error_display() {
    let err = tokenize("get   ").unwrap_err();
    assert_eq!(
        err.to_string(),
        "variable name is missing after get command at offset 6"
    );
}

// -----------------------------------------------------------
// Spans and stream properties.
// -----------------------------------------------------------

#[test]
fn lex_span_tracking() {
    let tokens = tokenize("ab set k v").expect("tokenize");
    let spans: Vec<_> = tokens.iter().map(|t| t.span).collect();
    assert_eq!(
        spans,
        [
            Span::new(0, 3),
            Span::new(3, 6),
            Span::new(7, 8),
            Span::new(9, 10),
            Span::new(10, 10),
        ]
    );
}

#[test]
fn lex_spans_cover_input() {
    for input in [
        "",
        "plain",
        "hello set x 5 world",
        "set  a\t\tb   get c",
        "get y  ",
        "x get y\n\nset z 1 tail get",
    ] {
        let tokens: Vec<_> = lex(input).collect();
        assert_spans_cover(input, &tokens);
    }
}

#[test]
fn lex_is_repeatable() {
    let input = "pre get a b post set c d";
    let first: Vec<_> = lex(input).collect();
    let second: Vec<_> = lex(input).collect();
    assert_eq!(first, second);
}

#[test]
fn lex_is_lazy() {
    let mut tokens = lex("one set x 1 two");
    assert_eq!(tokens.next().map(|t| t.text), Some("one ".to_string()));
    assert_eq!(tokens.next().map(|t| t.kind), Some(TokenKind::SetKeyword));
    assert_eq!(tokens.count(), 4);
}
