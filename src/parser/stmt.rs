//! Statement parsing.

use super::Parser;
use super::error::{ParseError, ParseErrorKind};
use crate::ast::{Stmt, StmtKind};
use crate::token::{Span, TokenKind};
use crate::value::Value;

impl Parser {
    /// Parses a single statement, dispatching on the leading keyword.
    pub(super) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        match self.current_kind() {
            TokenKind::LeftBrace => self.parse_block(),
            TokenKind::Import => self.parse_import(),
            TokenKind::Func => self.parse_function_decl(false),
            TokenKind::Void => self.parse_function_decl(true),
            TokenKind::Var => self.parse_var_decl(),
            TokenKind::Arr => self.parse_arr_decl(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Switch => self.parse_switch(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Break => self.parse_break(),
            _ => self.parse_expr_stmt(),
        }
    }

    pub(super) fn parse_block(&mut self) -> Result<Stmt, ParseError> {
        let open = self.expect(TokenKind::LeftBrace, "to open a block")?;
        let mut statements = Vec::new();
        while !self.check(&TokenKind::RightBrace) && !self.is_eof() {
            statements.push(self.parse_statement()?);
        }
        let close = self.expect(TokenKind::RightBrace, "to close a block")?;
        let span = Span::new(open.span.start, close.span.end, open.span.line);
        Ok(Stmt::new(StmtKind::Block(statements), span))
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let kw = self.expect(TokenKind::If, "to start an if statement")?;
        self.expect(TokenKind::LeftParen, "after 'if'")?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RightParen, "after if condition")?;
        let then_branch = self.parse_statement_boxed()?;

        let else_branch = if self.check(&TokenKind::Else) {
            self.advance();
            Some(self.parse_statement_boxed()?)
        } else {
            None
        };

        let span = Span::new(kw.span.start, kw.span.end, kw.span.line);
        Ok(Stmt::new(StmtKind::If { condition, then_branch, else_branch }, span))
    }

    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        let kw = self.expect(TokenKind::While, "to start a while statement")?;
        self.expect(TokenKind::LeftParen, "after 'while'")?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RightParen, "after while condition")?;
        let body = self.parse_statement_boxed()?;
        let span = Span::new(kw.span.start, kw.span.end, kw.span.line);
        Ok(Stmt::new(StmtKind::While { condition, body }, span))
    }

    /// Desugars `for (init; cond; incr) body` into
    /// `{ init; while (cond) { body; incr; } }`.
    fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        let kw = self.expect(TokenKind::For, "to start a for statement")?;
        self.expect(TokenKind::LeftParen, "after 'for'")?;

        let init = if self.check(&TokenKind::Semicolon) {
            self.advance();
            None
        } else if self.check(&TokenKind::Var) {
            Some(self.parse_var_decl()?)
        } else {
            Some(self.parse_expr_stmt()?)
        };

        let condition = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::Semicolon, "after for-loop condition")?;

        let increment = if self.check(&TokenKind::RightParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::RightParen, "after for-loop clauses")?;

        let body = self.parse_statement()?;
        let line = kw.span.line;

        let condition = condition.unwrap_or_else(|| {
            crate::ast::Expr::new(self.next_id(), crate::ast::ExprKind::Literal(Value::Bool(true)), Span::synthetic(line))
        });

        let mut loop_body_stmts = vec![body];
        if let Some(incr) = increment {
            let incr_span = incr.span;
            loop_body_stmts.push(Stmt::new(StmtKind::ExprStmt(incr), incr_span));
        }
        let loop_body = Stmt::new(StmtKind::Block(loop_body_stmts), Span::synthetic(line));
        let while_stmt = Stmt::new(StmtKind::While { condition, body: Box::new(loop_body) }, Span::synthetic(line));

        let mut outer = Vec::new();
        if let Some(init) = init {
            outer.push(init);
        }
        outer.push(while_stmt);
        Ok(Stmt::new(StmtKind::Block(outer), Span::synthetic(line)))
    }

    fn parse_switch(&mut self) -> Result<Stmt, ParseError> {
        let kw = self.expect(TokenKind::Switch, "to start a switch statement")?;
        self.expect(TokenKind::LeftParen, "after 'switch'")?;
        let switcher = self.parse_expr()?;
        self.expect(TokenKind::RightParen, "after switch subject")?;
        self.expect(TokenKind::LeftBrace, "to open a switch body")?;

        let mut switchees = Vec::new();
        let mut cases = Vec::new();
        let mut default = None;

        while !self.check(&TokenKind::RightBrace) && !self.is_eof() {
            if self.check(&TokenKind::Case) {
                self.advance();
                let switchee = self.parse_expr()?;
                self.expect(TokenKind::Colon, "after case expression")?;
                let body = self.parse_case_body()?;
                switchees.push(switchee);
                cases.push(Stmt::new(StmtKind::Block(body), Span::synthetic(kw.span.line)));
            } else if self.check(&TokenKind::Default) {
                self.advance();
                self.expect(TokenKind::Colon, "after 'default'")?;
                if default.is_some() {
                    return Err(self.error(ParseErrorKind::InvalidConstruct, "a switch can only have one default clause"));
                }
                let body = self.parse_case_body()?;
                default = Some(Box::new(Stmt::new(StmtKind::Block(body), Span::synthetic(kw.span.line))));
            } else {
                return Err(self.error(ParseErrorKind::UnexpectedToken, "expected 'case' or 'default' in switch body"));
            }
        }

        self.expect(TokenKind::RightBrace, "to close a switch body")?;
        Ok(Stmt::new(StmtKind::Switch { switcher, switchees, cases, default }, Span::synthetic(kw.span.line)))
    }

    fn parse_case_body(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut body = Vec::new();
        while !matches!(self.current_kind(), TokenKind::Case | TokenKind::Default | TokenKind::RightBrace) && !self.is_eof() {
            body.push(self.parse_statement()?);
        }
        Ok(body)
    }

    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        let kw = self.expect(TokenKind::Return, "to start a return statement")?;
        let value = if self.check(&TokenKind::Semicolon) { None } else { Some(self.parse_expr()?) };
        let end = self.expect(TokenKind::Semicolon, "after return statement")?;
        let span = Span::new(kw.span.start, end.span.end, kw.span.line);
        Ok(Stmt::new(StmtKind::Return { keyword: kw, value }, span))
    }

    fn parse_break(&mut self) -> Result<Stmt, ParseError> {
        let kw = self.expect(TokenKind::Break, "to start a break statement")?;
        let value = if self.check(&TokenKind::Semicolon) { None } else { Some(self.parse_expr()?) };
        let end = self.expect(TokenKind::Semicolon, "after break statement")?;
        let span = Span::new(kw.span.start, end.span.end, kw.span.line);
        Ok(Stmt::new(StmtKind::Break { keyword: kw, value }, span))
    }

    pub(super) fn parse_expr_stmt(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.parse_expr()?;
        let end = self.expect(TokenKind::Semicolon, "after expression statement")?;
        let span = Span::new(expr.span.start, end.span.end, expr.span.line);
        Ok(Stmt::new(StmtKind::ExprStmt(expr), span))
    }
}
