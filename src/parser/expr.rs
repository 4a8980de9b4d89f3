//! Expression parsing.
//!
//! Precedence from loosest to tightest: assignment, ternary, `||`, `&&`,
//! `|`, `^`, `&`, equality, relational, shift, additive, multiplicative,
//! unary, postfix, call/index, primary.

use super::Parser;
use super::error::{ParseError, ParseErrorKind};
use crate::ast::{Expr, ExprKind};
use crate::token::{Span, Token, TokenKind};
use crate::value::Value;

const CAST_KEYWORDS: &[&str] = &["bln", "int", "flt", "str"];
const MAX_ARITY: usize = 63;

impl Parser {
    pub(super) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_assignment()
    }

    /// Right-associative. Desugars `x ⊙= y` into `x = x ⊙ y`. An
    /// `AssignAt` target (`a[i] op= v`) only permits `=`/`+=`.
    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        let target = self.parse_ternary()?;

        let Some(op_tok) = self.take_operator(&[
            "=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<=", ">>=",
        ]) else {
            return Ok(target);
        };
        let op = operator_lexeme(&op_tok);
        let value = self.parse_assignment()?;
        self.build_assignment(target, op, op_tok, value)
    }

    fn build_assignment(
        &mut self,
        target: Expr,
        op: String,
        op_tok: Token,
        value: Expr,
    ) -> Result<Expr, ParseError> {
        let span = Span::new(target.span.start, value.span.end, target.span.line);
        match target.kind {
            ExprKind::Variable(name) => {
                if op == "=" {
                    Ok(Expr::new(self.next_id(), ExprKind::Assignment { name, value: Box::new(value) }, span))
                } else {
                    let binop = strip_assign_suffix(&op);
                    let binop_tok = Token::new(TokenKind::Operator(binop), op_tok.span, op_tok.file.clone());
                    let read = Expr::new(self.next_id(), ExprKind::Variable(name.clone()), target.span);
                    let rhs = Expr::new(self.next_id(), ExprKind::Binary(Box::new(read), binop_tok, Box::new(value)), span);
                    Ok(Expr::new(self.next_id(), ExprKind::Assignment { name, value: Box::new(rhs) }, span))
                }
            }
            ExprKind::Index { name, array, colon, start, .. } => {
                if colon.is_some() {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidConstruct,
                        "cannot assign into a slice",
                        span,
                        op_tok.file.clone(),
                    ));
                }
                if op != "=" && op != "+=" {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidAssignAtOperator,
                        format!("'{}' is not a valid indexed-assignment operator; only '=' and '+=' are", op),
                        span,
                        op_tok.file.clone(),
                    ));
                }
                let Some(index) = start else {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidConstruct,
                        "an indexed assignment needs an index expression",
                        span,
                        op_tok.file.clone(),
                    ));
                };
                Ok(Expr::new(
                    self.next_id(),
                    ExprKind::AssignAt { name, array, op, index, value: Box::new(value) },
                    span,
                ))
            }
            _ => Err(ParseError::new(
                ParseErrorKind::InvalidConstruct,
                "invalid assignment target",
                target.span,
                op_tok.file,
            )),
        }
    }

    /// Right-associative. `cond ? then : otherwise`.
    fn parse_ternary(&mut self) -> Result<Expr, ParseError> {
        let cond = self.parse_logical_or()?;
        if !self.matches_operator("?") {
            return Ok(cond);
        }
        self.advance();
        let then_branch = self.parse_assignment()?;
        self.expect(TokenKind::Colon, "in ternary expression")?;
        let else_branch = self.parse_ternary()?;
        let span = Span::new(cond.span.start, else_branch.span.end, cond.span.line);
        Ok(Expr::new(
            self.next_id(),
            ExprKind::Ternary(Box::new(cond), Box::new(then_branch), Box::new(else_branch)),
            span,
        ))
    }

    fn parse_logical_or(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc_binary(&["||"], Self::parse_logical_and)
    }

    fn parse_logical_and(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc_binary(&["&&"], Self::parse_bit_or)
    }

    fn parse_bit_or(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc_binary(&["|"], Self::parse_bit_xor)
    }

    fn parse_bit_xor(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc_binary(&["^"], Self::parse_bit_and)
    }

    fn parse_bit_and(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc_binary(&["&"], Self::parse_equality)
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc_binary(&["==", "!="], Self::parse_comparison)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc_binary(&["<", "<=", ">", ">="], Self::parse_shift)
    }

    fn parse_shift(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc_binary(&["<<", ">>", ">>>"], Self::parse_additive)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc_binary(&["+", "-"], Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc_binary(&["*", "/", "%"], Self::parse_unary)
    }

    /// Shared left-associative binary-operator layer: parses one operand
    /// at the next tighter precedence, then folds in `op operand` pairs
    /// while the current token is an `Operator` with a lexeme in `ops`.
    fn parse_left_assoc_binary(
        &mut self,
        ops: &[&str],
        mut next: impl FnMut(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        let mut left = next(self)?;
        while let Some(op_tok) = self.take_operator(ops) {
            let right = next(self)?;
            let span = Span::new(left.span.start, right.span.end, left.span.line);
            left = Expr::new(self.next_id(), ExprKind::Binary(Box::new(left), op_tok, Box::new(right)), span);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let Some(op_tok) = self.take_operator(&["+", "-", "!"]) else {
            return self.parse_postfix();
        };

        // Fold a leading '-' straight into a following numeric literal
        // rather than wrapping it in a Unary node.
        if operator_lexeme(&op_tok) == "-" {
            if let TokenKind::IntLiteral(n) = self.current_kind() {
                let n = *n;
                let lit_tok = self.advance();
                let span = Span::new(op_tok.span.start, lit_tok.span.end, op_tok.span.line);
                return Ok(Expr::new(self.next_id(), ExprKind::Literal(Value::Int(-n)), span));
            }
            if let TokenKind::DoubleLiteral(d) = self.current_kind() {
                let d = *d;
                let lit_tok = self.advance();
                let span = Span::new(op_tok.span.start, lit_tok.span.end, op_tok.span.line);
                return Ok(Expr::new(self.next_id(), ExprKind::Literal(Value::Double(-d)), span));
            }
        }

        let operand = self.parse_unary()?;
        let span = Span::new(op_tok.span.start, operand.span.end, op_tok.span.line);
        Ok(Expr::new(self.next_id(), ExprKind::Unary(op_tok, Box::new(operand)), span))
    }

    /// A bare-variable `++`/`--`. Whether the operand is actually a bare
    /// variable is enforced by the evaluator, not here.
    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let operand = self.parse_call_or_index()?;
        let Some(op_tok) = self.take_operator(&["++", "--"]) else {
            return Ok(operand);
        };
        let span = Span::new(operand.span.start, op_tok.span.end, operand.span.line);
        Ok(Expr::new(self.next_id(), ExprKind::Postfix(Box::new(operand), op_tok), span))
    }

    /// Chains zero or more calls and index/slice suffixes onto a primary
    /// expression. A call is only legal on a bare identifier callee; an
    /// index/slice chains against the originating variable's token.
    fn parse_call_or_index(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.check(&TokenKind::LeftParen) {
                let ExprKind::Variable(ref name) = expr.kind else {
                    return Err(self.error(ParseErrorKind::InvalidConstruct, "only a bare identifier can be called"));
                };
                let callee = name.clone();
                let paren = self.advance();
                let args = self.parse_arguments()?;
                let close = self.expect(TokenKind::RightParen, "to close call arguments")?;
                let span = Span::new(expr.span.start, close.span.end, expr.span.line);
                expr = Expr::new(self.next_id(), ExprKind::Call { callee, paren, args }, span);
            } else if self.check(&TokenKind::LeftBracket) {
                let name = match &expr.kind {
                    ExprKind::Variable(t) => t.clone(),
                    ExprKind::Index { name, .. } => name.clone(),
                    _ => return Err(self.error(ParseErrorKind::InvalidConstruct, "only a variable can be indexed")),
                };
                let lbracket = self.advance();
                let start = if self.check(&TokenKind::RightBracket) || self.check(&TokenKind::Colon) {
                    None
                } else {
                    Some(Box::new(self.parse_expr()?))
                };
                let colon = if self.check(&TokenKind::Colon) { Some(self.advance()) } else { None };
                let end = if colon.is_some() && !self.check(&TokenKind::RightBracket) {
                    Some(Box::new(self.parse_expr()?))
                } else {
                    None
                };
                if start.is_none() && colon.is_none() {
                    return Err(self.error(ParseErrorKind::InvalidConstruct, "an index needs a start expression, a slice, or both"));
                }
                let close = self.expect(TokenKind::RightBracket, "to close an index")?;
                let span = Span::new(expr.span.start, close.span.end, expr.span.line);
                expr = Expr::new(self.next_id(), ExprKind::Index { name, array: Box::new(expr), lbracket, start, colon, end }, span);
            } else {
                break;
            }
        }

        Ok(expr)
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        if self.check(&TokenKind::RightParen) {
            return Ok(args);
        }
        loop {
            if args.len() >= MAX_ARITY {
                return Err(self.error(ParseErrorKind::ArityTooLarge, format!("a call cannot take more than {} arguments", MAX_ARITY)));
            }
            args.push(self.parse_expr()?);
            if self.check(&TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        Ok(args)
    }

    /// `(bln|int|flt|str) expr` requires exactly a cast keyword followed
    /// immediately by `)`; anything else starting with `(` is a grouping.
    fn looks_like_cast(&self) -> bool {
        matches!(self.peek_at(1).kind, TokenKind::Identifier(ref id) if CAST_KEYWORDS.contains(&id.as_str()))
            && matches!(self.peek_at(2).kind, TokenKind::RightParen)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let span = self.current_span();

        match self.current_kind().clone() {
            TokenKind::IntLiteral(n) => {
                self.advance();
                Ok(Expr::new(self.next_id(), ExprKind::Literal(Value::Int(n)), span))
            }
            TokenKind::DoubleLiteral(d) => {
                self.advance();
                Ok(Expr::new(self.next_id(), ExprKind::Literal(Value::Double(d)), span))
            }
            TokenKind::StringLiteral(s) => {
                self.advance();
                Ok(Expr::new(self.next_id(), ExprKind::Literal(Value::string(s)), span))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::new(self.next_id(), ExprKind::Literal(Value::Bool(true)), span))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::new(self.next_id(), ExprKind::Literal(Value::Bool(false)), span))
            }
            TokenKind::Null => {
                self.advance();
                Ok(Expr::new(self.next_id(), ExprKind::Literal(Value::Null), span))
            }
            TokenKind::Identifier(_) => {
                let tok = self.advance();
                Ok(Expr::new(self.next_id(), ExprKind::Variable(tok), span))
            }
            TokenKind::LeftParen if self.looks_like_cast() => {
                self.advance();
                let keyword_tok = self.advance();
                self.advance(); // ')'
                let operand = self.parse_unary()?;
                let end_span = operand.span;
                let full_span = Span::new(span.start, end_span.end, span.line);
                Ok(Expr::new(self.next_id(), ExprKind::TypeCast(keyword_tok, Box::new(operand)), full_span))
            }
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.parse_expr()?;
                let close = self.expect(TokenKind::RightParen, "to close a grouped expression")?;
                let full_span = Span::new(span.start, close.span.end, span.line);
                Ok(Expr::new(self.next_id(), ExprKind::Grouping(Box::new(inner)), full_span))
            }
            other => Err(self.error(ParseErrorKind::UnexpectedToken, format!("expected an expression, found {}", other.describe()))),
        }
    }
}

fn operator_lexeme(tok: &Token) -> String {
    match &tok.kind {
        TokenKind::Operator(s) => s.clone(),
        _ => unreachable!("operator_lexeme called on a non-operator token"),
    }
}

fn strip_assign_suffix(op: &str) -> String {
    op.strip_suffix('=').expect("compound-assign operator must end in '='").to_string()
}
