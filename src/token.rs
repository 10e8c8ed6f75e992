use std::fmt;

use crate::lexer::LexErrorKind;

/// Byte range of a token within the scanned input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Token kinds produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Lexing failed. The token text holds the message.
    Error(LexErrorKind),
    /// End of input. Carries no text.
    EndOfInput,
    /// The `set` keyword.
    SetKeyword,
    /// The `get` keyword.
    GetKeyword,
    /// Variable name following a keyword.
    Identifier,
    /// Value following a variable name.
    Value,
    /// Any run of input outside a command.
    FreeText,
}

impl TokenKind {
    /// Whether no token can follow this one.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Error(_) | Self::EndOfInput)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error(_) => "error",
            Self::EndOfInput => "eof",
            Self::SetKeyword => "set",
            Self::GetKeyword => "get",
            Self::Identifier => "identifier",
            Self::Value => "value",
            Self::FreeText => "text",
        };
        f.write_str(name)
    }
}

/// A single token with its kind, text, and byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

/// Longest text shown by `Token`'s `Display` before truncation.
const DISPLAY_WIDTH: usize = 10;

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kind:{},val:", self.kind)?;
        if self.kind == TokenKind::EndOfInput {
            return f.write_str("EOF");
        }
        match self.text.char_indices().nth(DISPLAY_WIDTH) {
            Some((cut, _)) => write!(f, "{}...", &self.text[..cut]),
            None => f.write_str(&self.text),
        }
    }
}
