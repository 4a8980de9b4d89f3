//! Statement execution.

use super::{Evaluator, Flow, FunctionDef};
use crate::ast::{ExprKind, Stmt, StmtKind};
use crate::evaluator::error::{RuntimeError, RuntimeErrorKind};
use crate::token::Token;
use std::rc::Rc;

impl Evaluator {
    pub(super) fn exec_stmt(&mut self, stmt: &Stmt) -> Result<Flow, RuntimeError> {
        match &stmt.kind {
            StmtKind::Block(stmts) => {
                self.env.push_scope();
                let result = self.exec_block_statements(stmts);
                self.env.pop_scope();
                result
            }
            // A bare call used as a statement (rather than nested inside
            // a larger expression) checks the void table before the
            // func table, so calling a `void` by itself is not an error
            // the way it would be in an expression position.
            StmtKind::ExprStmt(expr) => {
                if let ExprKind::Call { callee, paren, args } = &expr.kind {
                    self.call_expr(callee, paren, args, true)?;
                } else {
                    self.eval_expr(expr)?;
                }
                Ok(Flow::Normal)
            }
            // Spliced away by the driver before a program ever reaches
            // the evaluator.
            StmtKind::Import(_) => Ok(Flow::Normal),
            StmtKind::FunctionDecl { name, params, body, returns } => {
                self.declare_function(name, params, body, *returns);
                Ok(Flow::Normal)
            }
            StmtKind::VarDecl { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.eval_expr(expr)?,
                    None => crate::value::Value::Null,
                };
                self.define_or_error(name, value)?;
                Ok(Flow::Normal)
            }
            StmtKind::ArrayDecl { name, initializers } => {
                let mut items = Vec::with_capacity(initializers.len());
                for init in initializers {
                    items.push(self.eval_expr(init)?);
                }
                self.define_or_error(name, crate::value::Value::list(items))?;
                Ok(Flow::Normal)
            }
            StmtKind::If { condition, then_branch, else_branch } => {
                if self.eval_expr(condition)?.to_bool() {
                    self.exec_stmt(then_branch)
                } else if let Some(branch) = else_branch {
                    self.exec_stmt(branch)
                } else {
                    Ok(Flow::Normal)
                }
            }
            StmtKind::While { condition, body } => self.exec_while(condition, body),
            StmtKind::Switch { switcher, switchees, cases, default } => self.exec_switch(switcher, switchees, cases, default),
            StmtKind::Return { value, .. } => {
                let v = match value {
                    Some(expr) => self.eval_expr(expr)?,
                    None => crate::value::Value::Null,
                };
                Ok(Flow::Returning(v))
            }
            StmtKind::Break { keyword, value } => self.exec_break(keyword, value.as_ref()),
        }
    }

    /// Runs a sequence of statements without opening a new scope —
    /// used for a function body, which shares its parameter scope.
    pub(super) fn exec_block_statements(&mut self, stmts: &[Stmt]) -> Result<Flow, RuntimeError> {
        for stmt in stmts {
            match self.exec_stmt(stmt)? {
                Flow::Normal => continue,
                other => return Ok(other),
            }
        }
        Ok(Flow::Normal)
    }

    fn declare_function(&mut self, name: &Token, params: &[Token], body: &[Stmt], returns: bool) {
        let def = Rc::new(FunctionDef {
            params: params.to_vec(),
            body: body.to_vec(),
            returns,
        });
        let key = (identifier_name(name), params.len());
        if returns {
            self.functions.insert(key, def);
        } else {
            self.voids.insert(key, def);
        }
    }

    fn define_or_error(&mut self, name: &Token, value: crate::value::Value) -> Result<(), RuntimeError> {
        if self.env.define(&identifier_name(name), value) {
            Ok(())
        } else {
            Err(RuntimeError::new(
                RuntimeErrorKind::DuplicateDeclaration,
                format!("'{}' is already declared in this scope", identifier_name(name)),
                name.span,
                name.file.clone(),
            ))
        }
    }

    fn exec_while(&mut self, condition: &crate::ast::Expr, body: &Stmt) -> Result<Flow, RuntimeError> {
        while self.eval_expr(condition)?.to_bool() {
            match self.exec_stmt(body)? {
                Flow::Normal => continue,
                Flow::Breaking(n) if n <= 1 => break,
                Flow::Breaking(n) => return Ok(Flow::Breaking(n - 1)),
                Flow::Returning(v) => return Ok(Flow::Returning(v)),
            }
        }
        Ok(Flow::Normal)
    }

    /// Evaluates the switcher once, then falls through `cases` starting
    /// at the first matching `switchees` entry. A case sequence that
    /// runs to the end without `break` always falls into `default` next,
    /// even when a case matched partway through — cflat's grammar does
    /// not record where `default` sat relative to the `case` arms, so
    /// this is the closest approximation of true positional fallthrough.
    fn exec_switch(
        &mut self,
        switcher: &crate::ast::Expr,
        switchees: &[crate::ast::Expr],
        cases: &[Stmt],
        default: &Option<Box<Stmt>>,
    ) -> Result<Flow, RuntimeError> {
        let switch_val = self.eval_expr(switcher)?;
        let mut start = cases.len();
        for (i, switchee) in switchees.iter().enumerate() {
            if self.eval_expr(switchee)? == switch_val {
                start = i;
                break;
            }
        }
        for case in &cases[start..] {
            match self.exec_stmt(case)? {
                Flow::Normal => continue,
                Flow::Breaking(n) if n <= 1 => return Ok(Flow::Normal),
                Flow::Breaking(n) => return Ok(Flow::Breaking(n - 1)),
                Flow::Returning(v) => return Ok(Flow::Returning(v)),
            }
        }
        match default {
            Some(default) => match self.exec_stmt(default)? {
                Flow::Breaking(n) if n <= 1 => Ok(Flow::Normal),
                Flow::Breaking(n) => Ok(Flow::Breaking(n - 1)),
                other => Ok(other),
            },
            None => Ok(Flow::Normal),
        }
    }

    fn exec_break(&mut self, keyword: &Token, value: Option<&crate::ast::Expr>) -> Result<Flow, RuntimeError> {
        let level = match value {
            Some(expr) => {
                let v = self.eval_expr(expr)?;
                v.to_int().map_err(|e| RuntimeError::new(RuntimeErrorKind::CoercionError, e, keyword.span, keyword.file.clone()))?
            }
            None => 1,
        };
        if level < 1 {
            return Err(RuntimeError::new(
                RuntimeErrorKind::CoercionError,
                format!("break level must be at least 1, got {}", level),
                keyword.span,
                keyword.file.clone(),
            ));
        }
        Ok(Flow::Breaking(level as u32))
    }
}

fn identifier_name(tok: &Token) -> String {
    match &tok.kind {
        crate::token::TokenKind::Identifier(name) => name.clone(),
        other => unreachable!("identifier token expected, found {:?}", other),
    }
}
