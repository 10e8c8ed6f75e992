//! Lexer and parser for a tiny `set`/`get` command language.
//!
//! Commands such as `set name value` and `get name` may appear
//! anywhere inside free-form text. The lexer splits the input into
//! typed tokens; everything outside a command is kept verbatim as
//! free text.
//!
//! # Quick start
//!
//! ## Tokenize
//!
//! ```
//! use setget_dsl::{tokenize, TokenKind};
//!
//! let tokens = tokenize("hello set x 5 world").unwrap();
//! let kinds: Vec<_> = tokens.iter().map(|t| &t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     [
//!         &TokenKind::FreeText,
//!         &TokenKind::SetKeyword,
//!         &TokenKind::Identifier,
//!         &TokenKind::Value,
//!         &TokenKind::FreeText,
//!         &TokenKind::EndOfInput,
//!     ]
//! );
//! ```
//!
//! ## Stream tokens from a lexer thread
//!
//! ```
//! let texts: Vec<_> = setget_dsl::spawn("get y").map(|t| t.text).collect();
//! assert_eq!(texts, ["get", "y", ""]);
//! ```
//!
//! ## Parse commands
//!
//! ```
//! use setget_dsl::parse_str;
//!
//! let script = parse_str("note: set retries 3").unwrap();
//! let first = script.commands().next().unwrap();
//! assert_eq!(first.name(), "retries");
//! assert_eq!(first.value(), Some("3"));
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod stream;
pub mod token;

pub use ast::{Command, Item, Script};
pub use lexer::{Keyword, LexError, LexErrorKind, Tokens, lex, tokenize};
pub use parser::{ParseError, ParseErrorKind, parse};
pub use stream::{TokenStream, spawn};
pub use token::{Span, Token, TokenKind};

/// Unified error type covering both lexing and parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// A parser error.
    #[error("{0}")]
    Parse(#[from] ParseError),
}

/// Tokenize and parse a source string in one step.
pub fn parse_str(input: &str) -> Result<Script, Error> {
    let tokens = tokenize(input)?;
    Ok(parse(&tokens)?)
}
