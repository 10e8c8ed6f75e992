use std::fmt;

use crate::ast::{Command, Item, Script};
use crate::lexer::LexErrorKind;
use crate::token::{Token, TokenKind};

/// Classifies a parser error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The token stream carried a lexer error.
    Lex(LexErrorKind),
    /// `set` command with a name but no value.
    MissingValue { name: String },
    /// Expected one thing, found another token or the end.
    Unexpected {
        expected: &'static str,
        found: Option<String>,
    },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex(kind) => write!(f, "{kind}"),
            Self::MissingValue { name } => {
                write!(f, "set command for '{name}' is missing a value")
            }
            Self::Unexpected {
                expected,
                found: None,
            } => write!(f, "expected {expected}"),
            Self::Unexpected {
                expected,
                found: Some(t),
            } => write!(f, "expected {expected}, got '{t}'"),
        }
    }
}

/// Error produced during parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at offset {offset}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub offset: usize,
}

/// Parse a token stream into a `Script`.
///
/// Parsing stops at the first `EndOfInput`; a stream that closes
/// without one is accepted as-is.
///
/// # Errors
///
/// Returns `ParseError` on lexer error tokens, a `set` without a
/// value, or tokens out of command order.
pub fn parse(tokens: &[Token]) -> Result<Script, ParseError> {
    Parser::new(tokens).parse()
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    const fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn parse(mut self) -> Result<Script, ParseError> {
        let mut script = Script::default();

        while let Some(token) = self.bump() {
            match &token.kind {
                TokenKind::EndOfInput => break,
                TokenKind::FreeText => script.items.push(Item::Text(token.text.clone())),
                TokenKind::SetKeyword => {
                    let name = self.expect_identifier()?;
                    let Some(value) = self.optional_value() else {
                        return Err(self.error(ParseErrorKind::MissingValue { name }));
                    };
                    script.items.push(Item::Command(Command::Set { name, value }));
                }
                TokenKind::GetKeyword => {
                    let name = self.expect_identifier()?;
                    let value = self.optional_value();
                    script.items.push(Item::Command(Command::Get { name, value }));
                }
                TokenKind::Error(kind) => {
                    return Err(ParseError {
                        kind: ParseErrorKind::Lex(kind.clone()),
                        offset: token.span.start,
                    });
                }
                TokenKind::Identifier | TokenKind::Value => {
                    return Err(ParseError {
                        kind: ParseErrorKind::Unexpected {
                            expected: "text or command",
                            found: Some(token.text.clone()),
                        },
                        offset: token.span.start,
                    });
                }
            }
        }

        Ok(script)
    }

    fn bump(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    fn peek_kind(&self) -> Option<&'a TokenKind> {
        self.tokens.get(self.pos).map(|t| &t.kind)
    }

    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        match self.bump() {
            Some(Token {
                kind: TokenKind::Identifier,
                text,
                ..
            }) => Ok(text.clone()),
            Some(Token {
                kind: TokenKind::Error(kind),
                span,
                ..
            }) => Err(ParseError {
                kind: ParseErrorKind::Lex(kind.clone()),
                offset: span.start,
            }),
            Some(other) => Err(ParseError {
                kind: ParseErrorKind::Unexpected {
                    expected: "variable name",
                    found: Some(other.text.clone()),
                },
                offset: other.span.start,
            }),
            None => Err(self.error(ParseErrorKind::Unexpected {
                expected: "variable name",
                found: None,
            })),
        }
    }

    fn optional_value(&mut self) -> Option<String> {
        if self.peek_kind() != Some(&TokenKind::Value) {
            return None;
        }
        self.bump().map(|t| t.text.clone())
    }

    /// Error positioned at the end of the last consumed token.
    fn error(&self, kind: ParseErrorKind) -> ParseError {
        let offset = self.pos.checked_sub(1).map_or(0, |i| self.tokens[i].span.end);
        ParseError { kind, offset }
    }
}
