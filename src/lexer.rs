use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;

use tracing::{debug, trace};

use crate::token::{Span, Token, TokenKind};

/// Characters a variable name may start with.
const IDENT_START: &str = "_abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// A command keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Set,
    Get,
}

impl Keyword {
    /// Keywords in the order they are tried at each position.
    const ALL: [Self; 2] = [Self::Set, Self::Get];

    /// Source spelling of the keyword.
    #[must_use]
    pub const fn literal(self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Get => "get",
        }
    }

    const fn token_kind(self) -> TokenKind {
        match self {
            Self::Set => TokenKind::SetKeyword,
            Self::Get => TokenKind::GetKeyword,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.literal())
    }
}

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Input ended right after a keyword.
    MissingVariableName { command: Keyword },
    /// Variable name starts with something other than a letter or `_`.
    InvalidVariableStart,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingVariableName { command } => {
                write!(f, "variable name is missing after {command} command")
            }
            Self::InvalidVariableStart => {
                write!(f, "variable name can only start with a letter or underscore")
            }
        }
    }
}

/// Error produced during lexing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at offset {offset}")]
pub struct LexError {
    pub kind: LexErrorKind,
    /// Byte offset where scanning stopped.
    pub offset: usize,
}

/// Tokenize a source string into a sequence of tokens.
///
/// The returned tokens end with `EndOfInput` unless the input
/// ends in whitespace trailing a command.
///
/// # Errors
///
/// Returns `LexError` when the lexer emits an error token.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    for token in lex(input) {
        if let TokenKind::Error(kind) = token.kind {
            return Err(LexError {
                kind,
                offset: token.span.start,
            });
        }
        tokens.push(token);
    }
    Ok(tokens)
}

/// Lazily tokenize `input` on the calling thread.
///
/// The state machine only advances when the next token is requested.
#[must_use]
pub fn lex(input: &str) -> Tokens<'_> {
    Tokens {
        lexer: Lexer::new(input, VecDeque::new()),
        state: Some(State::Start),
    }
}

/// Receives tokens as the lexer emits them.
pub(crate) trait TokenSink {
    /// Hand over one token. Returns `false` once the consumer is gone.
    fn deliver(&mut self, token: Token) -> bool;
}

impl TokenSink for VecDeque<Token> {
    fn deliver(&mut self, token: Token) -> bool {
        self.push_back(token);
        true
    }
}

/// Pull-based token iterator returned by [`lex`].
pub struct Tokens<'a> {
    lexer: Lexer<'a, VecDeque<Token>>,
    state: Option<State>,
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.lexer.sink.pop_front() {
                return Some(token);
            }
            let state = self.state.take()?;
            self.state = self.lexer.step(state);
        }
    }
}

impl FusedIterator for Tokens<'_> {}

/// Lexer states. Each step consumes input, emits tokens and
/// yields the next state, or `None` to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    Start,
    Keyword(Keyword),
    Identifier,
    Value,
}

/// Scanner over one input. `start..pos` is the pending text
/// not yet emitted; `width` is the byte length of the last
/// character consumed, for a single-step rewind.
pub(crate) struct Lexer<'a, S> {
    input: &'a str,
    start: usize,
    pos: usize,
    width: usize,
    sink: S,
    closed: bool,
}

impl<'a, S: TokenSink> Lexer<'a, S> {
    pub(crate) const fn new(input: &'a str, sink: S) -> Self {
        Self {
            input,
            start: 0,
            pos: 0,
            width: 0,
            sink,
            closed: false,
        }
    }

    /// Whether the sink stopped accepting tokens.
    pub(crate) const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Drive the state machine to completion, or until the sink closes.
    pub(crate) fn run(&mut self) {
        let mut state = Some(State::Start);
        while let Some(current) = state {
            if self.closed {
                break;
            }
            state = self.step(current);
        }
    }

    pub(crate) fn step(&mut self, state: State) -> Option<State> {
        trace!(?state, pos = self.pos, "lexer step");
        match state {
            State::Start => self.lex_start(),
            State::Keyword(keyword) => self.lex_keyword(keyword),
            State::Identifier => self.lex_identifier(),
            State::Value => self.lex_value(),
        }
    }

    fn lex_start(&mut self) -> Option<State> {
        loop {
            let rest = &self.input[self.pos..];
            if let Some(keyword) = Keyword::ALL
                .into_iter()
                .find(|k| rest.starts_with(k.literal()))
            {
                if self.pos > self.start {
                    self.emit(TokenKind::FreeText);
                }
                return Some(State::Keyword(keyword));
            }
            if self.advance().is_none() {
                break;
            }
        }

        if self.pos > self.start {
            self.emit(TokenKind::FreeText);
        }
        self.emit(TokenKind::EndOfInput);
        None
    }

    fn lex_keyword(&mut self, keyword: Keyword) -> Option<State> {
        self.pos += keyword.literal().len();
        self.width = 0;
        self.emit(keyword.token_kind());
        if self.skip_whitespace().is_none() {
            return self.fail(LexErrorKind::MissingVariableName { command: keyword });
        }
        Some(State::Identifier)
    }

    fn lex_identifier(&mut self) -> Option<State> {
        if !self.accept_one(IDENT_START) {
            return self.fail(LexErrorKind::InvalidVariableStart);
        }
        if self.accept_until_whitespace().is_none() {
            self.emit(TokenKind::Identifier);
            self.emit(TokenKind::EndOfInput);
            return None;
        }
        self.rewind();
        self.emit(TokenKind::Identifier);
        // Trailing whitespace up to the end stops without EndOfInput.
        self.skip_whitespace()?;
        Some(State::Value)
    }

    fn lex_value(&mut self) -> Option<State> {
        if self.accept_until_whitespace().is_none() {
            self.emit(TokenKind::Value);
            self.emit(TokenKind::EndOfInput);
            return None;
        }
        self.rewind();
        self.emit(TokenKind::Value);
        self.skip_whitespace()?;
        Some(State::Start)
    }

    /// Consume the next character, or return `None` at end of input.
    fn advance(&mut self) -> Option<char> {
        let Some(ch) = self.input[self.pos..].chars().next() else {
            self.width = 0;
            return None;
        };
        self.width = ch.len_utf8();
        self.pos += self.width;
        Some(ch)
    }

    /// Undo the last `advance`. Only one step is remembered.
    const fn rewind(&mut self) {
        self.pos -= self.width;
        self.width = 0;
    }

    fn peek(&mut self) -> Option<char> {
        let ch = self.advance();
        self.rewind();
        ch
    }

    fn accept_one(&mut self, valid: &str) -> bool {
        match self.advance() {
            Some(ch) if valid.contains(ch) => true,
            _ => {
                self.rewind();
                false
            }
        }
    }

    /// Consume up to and including the next whitespace character.
    /// Returns that character, or `None` if input ran out first.
    fn accept_until_whitespace(&mut self) -> Option<char> {
        loop {
            match self.advance() {
                Some(ch) if ch.is_whitespace() => return Some(ch),
                Some(_) => {}
                None => return None,
            }
        }
    }

    /// Drop whitespace and return the next character without
    /// consuming it, or `None` at end of input.
    fn skip_whitespace(&mut self) -> Option<char> {
        loop {
            match self.peek() {
                Some(ch) if ch.is_whitespace() => {
                    self.advance();
                    self.ignore();
                }
                next => return next,
            }
        }
    }

    const fn ignore(&mut self) {
        self.start = self.pos;
    }

    fn emit(&mut self, kind: TokenKind) {
        let token = Token {
            kind,
            text: self.input[self.start..self.pos].to_string(),
            span: Span::new(self.start, self.pos),
        };
        self.deliver(token);
        self.start = self.pos;
    }

    fn fail(&mut self, kind: LexErrorKind) -> Option<State> {
        debug!(error = %kind, offset = self.pos, "lexing failed");
        let token = Token {
            text: kind.to_string(),
            kind: TokenKind::Error(kind),
            span: Span::new(self.pos, self.pos),
        };
        self.deliver(token);
        None
    }

    fn deliver(&mut self, token: Token) {
        if self.closed {
            return;
        }
        trace!(%token, "emit");
        if !self.sink.deliver(token) {
            self.closed = true;
        }
    }
}
