//! Top-level declaration parsing: `func`/`void`, `var`, `arr`, `import`.

use super::Parser;
use super::error::{ParseError, ParseErrorKind};
use crate::ast::{Stmt, StmtKind};
use crate::token::{Span, TokenKind};

const MAX_ARITY: usize = 63;

impl Parser {
    pub(super) fn parse_import(&mut self) -> Result<Stmt, ParseError> {
        let kw = self.expect(TokenKind::Import, "to start an import statement")?;
        let mut names = vec![self.expect_identifier("as an imported module name")?];
        while self.check(&TokenKind::Comma) {
            self.advance();
            names.push(self.expect_identifier("as an imported module name")?);
        }
        let end = self.expect(TokenKind::Semicolon, "after import statement")?;
        let span = Span::new(kw.span.start, end.span.end, kw.span.line);
        Ok(Stmt::new(StmtKind::Import(names), span))
    }

    pub(super) fn parse_function_decl(&mut self, returns_void: bool) -> Result<Stmt, ParseError> {
        let kw = self.advance();
        let name = self.expect_identifier("as a function name")?;
        self.expect(TokenKind::LeftParen, "after function name")?;

        let mut params = Vec::new();
        if !self.check(&TokenKind::RightParen) {
            loop {
                if params.len() >= MAX_ARITY {
                    return Err(self.error(ParseErrorKind::ArityTooLarge, format!("a function cannot take more than {} parameters", MAX_ARITY)));
                }
                params.push(self.expect_identifier("as a parameter name")?);
                if self.check(&TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::RightParen, "after function parameters")?;

        let block = self.parse_block()?;
        let body = match block.kind {
            StmtKind::Block(stmts) => stmts,
            _ => unreachable!("parse_block always returns a Block"),
        };
        let span = Span::new(kw.span.start, block.span.end, kw.span.line);
        Ok(Stmt::new(StmtKind::FunctionDecl { name, params, body, returns: !returns_void }, span))
    }

    pub(super) fn parse_var_decl(&mut self) -> Result<Stmt, ParseError> {
        let kw = self.expect(TokenKind::Var, "to start a variable declaration")?;
        let name = self.expect_identifier("as a variable name")?;
        let initializer = if self.matches_operator("=") {
            self.advance();
            Some(self.parse_expr()?)
        } else {
            None
        };
        let end = self.expect(TokenKind::Semicolon, "after variable declaration")?;
        let span = Span::new(kw.span.start, end.span.end, kw.span.line);
        Ok(Stmt::new(StmtKind::VarDecl { name, initializer }, span))
    }

    pub(super) fn parse_arr_decl(&mut self) -> Result<Stmt, ParseError> {
        let kw = self.expect(TokenKind::Arr, "to start an array declaration")?;
        let name = self.expect_identifier("as an array name")?;

        let mut initializers = Vec::new();
        if self.matches_operator("=") {
            self.advance();
            self.expect(TokenKind::LeftBrace, "to open an array initializer")?;
            if !self.check(&TokenKind::RightBrace) {
                loop {
                    initializers.push(self.parse_expr()?);
                    if self.check(&TokenKind::Comma) {
                        self.advance();
                    } else {
                        break;
                    }
                }
            }
            self.expect(TokenKind::RightBrace, "to close an array initializer")?;
        }

        let end = self.expect(TokenKind::Semicolon, "after array declaration")?;
        let span = Span::new(kw.span.start, end.span.end, kw.span.line);
        Ok(Stmt::new(StmtKind::ArrayDecl { name, initializers }, span))
    }
}
