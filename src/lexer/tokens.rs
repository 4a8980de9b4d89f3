//! Token reading and recognition for the lexer.

use super::Lexer;
use super::error::{LexError, LexErrorKind};
use crate::token::{Span, Token, TokenKind};

/// Operator characters from which rule 7 builds a maximal run. The
/// parser, not the lexer, decides which compound operator a run spells.
const OPERATOR_CHARS: &[char] = &['=', '+', '-', '*', '/', '%', '&', '|', '^', '<', '>', '?', '!'];

impl<'a> Lexer<'a> {
    /// Dispatches to the right scanner for the character at the cursor.
    ///
    /// Returns `None` for an unrecognized character (rule 8's catch-all
    /// `UNKNOWN`): the lexer is fail-soft and silently drops it rather
    /// than emitting a token or an error.
    pub(super) fn next_token(&mut self) -> Option<Result<Token, LexError>> {
        let c = self.current_char()?;

        if c == '"' {
            return Some(self.scan_string());
        }
        if c == '\'' {
            return Some(self.scan_char_literal());
        }
        if c.is_ascii_digit() {
            return Some(self.scan_number());
        }
        if c.is_ascii_alphabetic() {
            return Some(Ok(self.scan_identifier_or_keyword()));
        }
        if OPERATOR_CHARS.contains(&c) {
            return Some(Ok(self.scan_operator()));
        }
        if let Some(token) = self.scan_punctuation(c) {
            return Some(Ok(token));
        }

        self.advance();
        None
    }

    /// Rule 2: `"…"`. No escape processing — the content is whatever
    /// bytes sit between the quotes, verbatim.
    fn scan_string(&mut self) -> Result<Token, LexError> {
        let start = self.pos;
        let line = self.line;
        self.advance();
        let content_start = self.pos;

        loop {
            match self.current_char() {
                None | Some('\n') => {
                    let span = Span::new(start, self.pos, line);
                    return Err(LexError::new(
                        LexErrorKind::UnterminatedString,
                        "unterminated string literal",
                        span,
                        self.file.clone(),
                    ));
                }
                Some('"') => break,
                Some(_) => self.advance(),
            }
        }

        let content = self.input[content_start..self.pos].to_string();
        self.advance();
        let span = Span::new(start, self.pos, line);
        Ok(Token::new(TokenKind::StringLiteral(content), span, self.file.clone()))
    }

    /// Rule 4: `'c..` — quote, exactly one character, quote — kept as a
    /// single-character string literal.
    fn scan_char_literal(&mut self) -> Result<Token, LexError> {
        let start = self.pos;
        let line = self.line;
        self.advance();

        let inner = match self.current_char() {
            Some(c) if c != '\'' && c != '\n' => c,
            _ => {
                let span = Span::new(start, self.pos, line);
                return Err(LexError::new(
                    LexErrorKind::MalformedCharLiteral,
                    "malformed char literal",
                    span,
                    self.file.clone(),
                ));
            }
        };
        self.advance();

        if self.current_char() != Some('\'') {
            let span = Span::new(start, self.pos, line);
            return Err(LexError::new(
                LexErrorKind::MalformedCharLiteral,
                "malformed char literal, expected closing '",
                span,
                self.file.clone(),
            ));
        }
        self.advance();

        let span = Span::new(start, self.pos, line);
        Ok(Token::new(
            TokenKind::StringLiteral(inner.to_string()),
            span,
            self.file.clone(),
        ))
    }

    /// Rule 5: a digit-leading run consumed while the next character is
    /// `.` or a letter/digit. This means `123abc` is consumed as a
    /// single run and reported malformed, rather than split into a
    /// number token and an identifier token — preserved deliberately.
    fn scan_number(&mut self) -> Result<Token, LexError> {
        let start = self.pos;
        let line = self.line;

        while matches!(self.current_char(), Some(c) if c == '.' || c.is_ascii_alphanumeric()) {
            self.advance();
        }

        let text = &self.input[start..self.pos];
        let span = Span::new(start, self.pos, line);
        let has_letter = text.chars().any(|c| c.is_ascii_alphabetic());
        let dot_count = text.chars().filter(|&c| c == '.').count();

        if has_letter || dot_count > 1 {
            return Err(LexError::new(
                LexErrorKind::MalformedNumber,
                format!("malformed number literal '{}'", text),
                span,
                self.file.clone(),
            ));
        }

        if dot_count == 1 {
            text.parse::<f64>().map(|v| Token::new(TokenKind::DoubleLiteral(v), span, self.file.clone())).map_err(|_| {
                LexError::new(
                    LexErrorKind::MalformedNumber,
                    format!("malformed number literal '{}'", text),
                    span,
                    self.file.clone(),
                )
            })
        } else {
            text.parse::<i64>().map(|v| Token::new(TokenKind::IntLiteral(v), span, self.file.clone())).map_err(|_| {
                LexError::new(
                    LexErrorKind::MalformedNumber,
                    format!("malformed number literal '{}'", text),
                    span,
                    self.file.clone(),
                )
            })
        }
    }

    /// Rule 6: letter-leading run of ASCII letters/digits. Keywords win
    /// a table lookup; anything else becomes `IDENTIFIER`. The dialect
    /// does not allow `_` in identifiers.
    fn scan_identifier_or_keyword(&mut self) -> Token {
        let start = self.pos;
        let line = self.line;

        while matches!(self.current_char(), Some(c) if c.is_ascii_alphanumeric()) {
            self.advance();
        }

        let text = &self.input[start..self.pos];
        let span = Span::new(start, self.pos, line);
        let kind = TokenKind::keyword(text).unwrap_or_else(|| TokenKind::Identifier(text.to_string()));
        Token::new(kind, span, self.file.clone())
    }

    /// Rule 7: the maximal run of operator characters becomes one
    /// `OPERATOR` token; the parser later interprets compound operators.
    fn scan_operator(&mut self) -> Token {
        let start = self.pos;
        let line = self.line;

        while matches!(self.current_char(), Some(c) if OPERATOR_CHARS.contains(&c)) {
            self.advance();
        }

        let text = self.input[start..self.pos].to_string();
        let span = Span::new(start, self.pos, line);
        Token::new(TokenKind::Operator(text), span, self.file.clone())
    }

    /// Rule 8: single-character punctuation.
    fn scan_punctuation(&mut self, c: char) -> Option<Token> {
        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '.' => TokenKind::Dot,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            _ => return None,
        };
        let start = self.pos;
        let line = self.line;
        self.advance();
        Some(Token::new(kind, Span::new(start, self.pos, line), self.file.clone()))
    }
}
