//! Token navigation helpers shared by every parsing stage.

use super::Parser;
use super::error::{ParseError, ParseErrorKind};
use crate::token::{Span, Token, TokenKind};

impl Parser {
    /// The token at the cursor. Always valid since `advance` never moves
    /// the cursor past the final `Eof` token.
    pub(super) fn current(&self) -> &Token {
        let idx = self.pos.min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    pub(super) fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    pub(super) fn current_span(&self) -> Span {
        self.current().span
    }

    pub(super) fn current_line(&self) -> usize {
        self.current().span.line
    }

    pub(super) fn file(&self) -> std::rc::Rc<str> {
        self.current().file.clone()
    }

    pub(super) fn is_eof(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Looks `offset` tokens ahead of the cursor, clamped to the final
    /// (`Eof`) token so lookahead never runs off the end.
    pub(super) fn peek_at(&self, offset: usize) -> &Token {
        let idx = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    /// Advances the cursor and returns the token that was current,
    /// unless already at `Eof`.
    pub(super) fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        if !self.is_eof() {
            self.pos += 1;
        }
        tok
    }

    /// True (without consuming) when the current token's discriminant
    /// matches `kind`'s.
    pub(super) fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.current_kind()) == std::mem::discriminant(kind)
    }

    /// True when the current token is an `Operator` token whose lexeme is
    /// exactly `lexeme`.
    pub(super) fn matches_operator(&self, lexeme: &str) -> bool {
        matches!(self.current_kind(), TokenKind::Operator(op) if op == lexeme)
    }

    /// If the current token is an `Operator` with lexeme one of `lexemes`,
    /// consumes and returns it; otherwise leaves the cursor untouched.
    pub(super) fn take_operator(&mut self, lexemes: &[&str]) -> Option<Token> {
        if let TokenKind::Operator(op) = self.current_kind() {
            if lexemes.iter().any(|l| l == op) {
                return Some(self.advance());
            }
        }
        None
    }

    /// Consumes the current token if its discriminant matches `kind`,
    /// otherwise records an `UnexpectedToken` error.
    pub(super) fn expect(&mut self, kind: TokenKind, context: &str) -> Result<Token, ParseError> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            Err(self.error(
                ParseErrorKind::UnexpectedToken,
                format!(
                    "expected {} {}, found {}",
                    kind.describe(),
                    context,
                    self.current_kind().describe()
                ),
            ))
        }
    }

    /// Consumes an `Identifier` token, returning it, or records an error.
    pub(super) fn expect_identifier(&mut self, context: &str) -> Result<Token, ParseError> {
        if matches!(self.current_kind(), TokenKind::Identifier(_)) {
            Ok(self.advance())
        } else {
            Err(self.error(
                ParseErrorKind::UnexpectedToken,
                format!("expected identifier {}, found {}", context, self.current_kind().describe()),
            ))
        }
    }

    pub(super) fn error(&self, kind: ParseErrorKind, message: impl Into<String>) -> ParseError {
        ParseError::new(kind, message, self.current_span(), self.file())
    }

    /// Error recovery: skips the token that caused the error, then keeps
    /// skipping until the line number changes (or EOF). This is a known
    /// sharp edge — a single-token error can cause the next legitimate
    /// token on the same line to be skipped too.
    pub(super) fn rerail(&mut self) {
        let error_line = self.current_line();
        self.advance();
        while !self.is_eof() && self.current_line() == error_line {
            self.advance();
        }
    }
}
