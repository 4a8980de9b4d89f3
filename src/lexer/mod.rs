//! Lexical analyzer for the cflat language.
//!
//! This module provides the [`Lexer`] struct which converts source code
//! text into a stream of [`Token`]s for parsing.
//!
//! # Supported tokens
//!
//! - **Identifiers**: a letter-leading run of ASCII letters/digits (no `_`).
//! - **Keywords**: see [`TokenKind::keyword`](crate::token::TokenKind::keyword).
//! - **Numbers**: a digit-leading run of letters/digits/`.`; a letter
//!   anywhere in the run, or more than one `.`, is a malformed-number
//!   error rather than a split into separate tokens.
//! - **Strings**: `"…"` with no escape processing, and `'c` single-char
//!   literals, both producing `StringLiteral`.
//! - **Operators**: a maximal run of `= + - * / % & | ^ < > ? !`,
//!   classified by the parser rather than the lexer.
//! - **Punctuation**: `( ) [ ] { } . , ; :`.
//!
//! There is no comment syntax: `/` is an ordinary operator character,
//! so `//` lexes as a single `OPERATOR` token.
//!
//! # Module Structure
//!
//! - [`error`] - Error types for lexical analysis
//! - [`cursor`] - Position tracking and character navigation
//! - [`skip`] - Space/tab skipping
//! - [`tokens`] - Token recognition and reading
//!
//! # See Also
//!
//! * [`crate::token`] - Token type definitions
//! * [`crate::parser`] - Parser that consumes the token stream

mod cursor;
mod error;
mod skip;
mod tokens;

#[cfg(test)]
mod tests;

pub use error::{LexError, LexErrorKind};

use crate::token::{Span, Token, TokenKind};
use std::rc::Rc;

/// A lexical analyzer that tokenizes cflat source code.
///
/// The lexer is fail-soft: lexical errors are accumulated rather than
/// aborting the scan, so [`tokenize`](Lexer::tokenize) always returns a
/// complete (possibly error-laden) token stream.
pub struct Lexer<'a> {
    pub(super) input: &'a str,
    pub(super) pos: usize,
    pub(super) line: usize,
    pub(super) file: Rc<str>,
}

impl<'a> Lexer<'a> {
    /// Creates a new `Lexer` for the given input and file label.
    pub fn new(input: &'a str, file: Rc<str>) -> Self {
        Lexer {
            input,
            pos: 0,
            line: 1,
            file,
        }
    }

    /// Tokenizes the entire input, returning the token stream (always
    /// terminated by a single `Eof` token) and any lexical errors
    /// encountered along the way.
    pub fn tokenize(&mut self) -> (Vec<Token>, Vec<LexError>) {
        tracing::debug!(file = %self.file, bytes = self.input.len(), "lexing source");
        let mut tokens = Vec::new();
        let mut errors = Vec::new();

        loop {
            self.skip_spaces_and_tabs();

            match self.current_char() {
                None => break,
                Some('\n') => {
                    self.advance();
                    continue;
                }
                Some(_) => {}
            }

            match self.next_token() {
                Some(Ok(token)) => {
                    tracing::trace!(kind = ?token.kind, "token");
                    tokens.push(token);
                }
                Some(Err(err)) => errors.push(err),
                None => {}
            }
        }

        let eof_span = Span::new(self.pos, self.pos, self.line);
        tokens.push(Token::new(TokenKind::Eof, eof_span, Rc::clone(&self.file)));
        tracing::debug!(tokens = tokens.len(), errors = errors.len(), "lexing complete");
        (tokens, errors)
    }
}
