//! Lexical analysis error types.

use crate::token::Span;
use std::rc::Rc;

/// The kind of a [`LexError`], for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A string literal (or char literal) was never closed before EOF
    /// or a newline.
    UnterminatedString,
    /// A `'c..` char literal did not have exactly one character between
    /// the quotes.
    MalformedCharLiteral,
    /// A digit-leading run contained a letter or more than one `.`,
    /// per the dialect's number-scanning rule (see `tokens::scan_number`).
    MalformedNumber,
}

/// An error produced during lexical analysis.
///
/// Lexing is fail-soft: a `LexError` is recorded and scanning continues,
/// so a single run can surface every malformed token in a file instead
/// of stopping at the first one.
#[derive(Debug, Clone)]
pub struct LexError {
    kind: LexErrorKind,
    message: String,
    span: Span,
    file: Rc<str>,
}

impl LexError {
    pub fn new(kind: LexErrorKind, message: impl Into<String>, span: Span, file: Rc<str>) -> Self {
        LexError {
            kind,
            message: message.into(),
            span,
            file,
        }
    }

    pub fn kind(&self) -> LexErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn file(&self) -> &Rc<str> {
        &self.file
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} ln {}] Syntax: {}",
            self.file, self.span.line, self.message
        )
    }
}

impl std::error::Error for LexError {}
