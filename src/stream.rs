//! Concurrent token delivery.
//!
//! [`spawn`] runs the lexer on its own thread and hands tokens to
//! the consumer over a zero-capacity channel, so the producer never
//! works more than one token ahead of the consumer.

use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver, Sender};
use tracing::{debug, warn};

use crate::lexer::{Lexer, TokenSink};
use crate::token::Token;

impl TokenSink for Sender<Token> {
    fn deliver(&mut self, token: Token) -> bool {
        self.send(token).is_ok()
    }
}

/// Tokens produced by a lexer running on another thread.
///
/// Iterating blocks until the producer hands over the next token.
/// The iterator ends when the producer finishes. Dropping the
/// stream early stops the producer and waits for it to exit.
pub struct TokenStream {
    receiver: Option<Receiver<Token>>,
    producer: Option<JoinHandle<()>>,
}

/// Start lexing `input` on a new thread.
#[must_use]
pub fn spawn(input: impl Into<String>) -> TokenStream {
    let input = input.into();
    let (sender, receiver) = channel::bounded(0);
    let producer = thread::spawn(move || {
        let mut lexer = Lexer::new(&input, sender);
        lexer.run();
        if lexer.is_closed() {
            debug!("consumer hung up, lexer stopped early");
        }
    });
    TokenStream {
        receiver: Some(receiver),
        producer: Some(producer),
    }
}

impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.receiver.as_ref()?.recv().ok()
    }
}

impl Drop for TokenStream {
    fn drop(&mut self) {
        // Disconnect first so a producer blocked on send wakes up.
        drop(self.receiver.take());
        let Some(producer) = self.producer.take() else {
            return;
        };
        if producer.join().is_err() {
            warn!("lexer thread panicked");
        }
    }
}
