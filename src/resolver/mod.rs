//! Lexical scope resolution for cflat programs.
//!
//! This is a single static walk over the AST, run after parsing and
//! before evaluation, that annotates every variable reference with the
//! number of scopes between it and the scope where it was declared.
//! The evaluator then looks a variable up by walking exactly that many
//! scopes rather than searching outward on every access — the same
//! "resolve once, look up cheaply forever" split Lox-family
//! interpreters use.
//!
//! Unlike a resolver keyed on node pointer identity, this one is keyed
//! on [`NodeId`] so the side table survives the AST being moved between
//! the parse and evaluate passes.
//!
//! `func`/`void` names are not part of this scope chain: they live in
//! the evaluator's own function/void tables and are looked up by name
//! directly, so a function declaration only opens a scope for its own
//! parameters.

mod error;


pub use error::{ResolverError, ResolverErrorKind};

use crate::ast::{Expr, ExprKind, NodeId, Program, Stmt, StmtKind};
use crate::token::{Token, TokenKind};
use std::collections::HashMap;

/// Maps a variable-reference [`NodeId`] to the number of scopes between
/// it and its declaring scope. A reference with no entry is global.
pub type Locals = HashMap<NodeId, usize>;

/// Walks a [`Program`] and produces its [`Locals`] table.
pub struct Resolver {
    /// Each scope maps a declared name to whether its initializer has
    /// finished resolving yet — `declare` inserts `false`, `define`
    /// flips it to `true` once the initializer (if any) is resolved.
    scopes: Vec<HashMap<String, bool>>,
    locals: Locals,
    loop_depth: usize,
    errors: Vec<ResolverError>,
}

impl Resolver {
    pub fn new() -> Self {
        Resolver {
            scopes: Vec::new(),
            locals: HashMap::new(),
            loop_depth: 0,
            errors: Vec::new(),
        }
    }

    /// Resolves an entire program, returning the locals table and any
    /// static errors found along the way (e.g. a `break` with no
    /// enclosing loop).
    pub fn resolve(mut self, program: &Program) -> (Locals, Vec<ResolverError>) {
        tracing::debug!(statements = program.statements.len(), "resolving program");
        self.resolve_statements(&program.statements);
        tracing::debug!(locals = self.locals.len(), errors = self.errors.len(), "resolve complete");
        (self.locals, self.errors)
    }

    fn resolve_statements(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            self.resolve_statement(stmt);
        }
    }

    fn resolve_statement(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Block(stmts) => {
                self.begin_scope();
                self.resolve_statements(stmts);
                self.end_scope();
            }
            StmtKind::ExprStmt(expr) => self.resolve_expr(expr),
            StmtKind::Import(_) => {
                // Imports are spliced in by the driver before resolution
                // ever runs; by the time we get here there is nothing
                // left to resolve.
            }
            StmtKind::FunctionDecl { params, body, .. } => {
                self.begin_scope();
                for param in params {
                    self.declare(param);
                    self.define(param);
                }
                self.resolve_statements(body);
                self.end_scope();
            }
            StmtKind::VarDecl { name, initializer } => {
                self.declare(name);
                if let Some(init) = initializer {
                    self.resolve_expr(init);
                }
                self.define(name);
            }
            StmtKind::ArrayDecl { name, initializers } => {
                self.declare(name);
                for init in initializers {
                    self.resolve_expr(init);
                }
                self.define(name);
            }
            StmtKind::If { condition, then_branch, else_branch } => {
                self.resolve_expr(condition);
                self.resolve_statement(then_branch);
                if let Some(branch) = else_branch {
                    self.resolve_statement(branch);
                }
            }
            StmtKind::While { condition, body } => {
                self.resolve_expr(condition);
                self.loop_depth += 1;
                self.resolve_statement(body);
                self.loop_depth -= 1;
            }
            StmtKind::Switch { switcher, switchees, cases, default } => {
                self.resolve_expr(switcher);
                for switchee in switchees {
                    self.resolve_expr(switchee);
                }
                self.loop_depth += 1;
                for case in cases {
                    self.resolve_statement(case);
                }
                if let Some(default) = default {
                    self.resolve_statement(default);
                }
                self.loop_depth -= 1;
            }
            StmtKind::Return { value, .. } => {
                if let Some(value) = value {
                    self.resolve_expr(value);
                }
            }
            StmtKind::Break { keyword, value } => {
                if self.loop_depth == 0 {
                    self.errors.push(ResolverError::new(
                        ResolverErrorKind::NoEnclosingLoop,
                        "'break' used outside of a loop or switch",
                        keyword.span,
                        keyword.file.clone(),
                    ));
                }
                if let Some(value) = value {
                    self.resolve_expr(value);
                    self.check_break_level(keyword, value);
                }
            }
        }
    }

    /// `break n` is only checkable statically when `n` is itself a
    /// literal integer, since loop nesting is known lexically but the
    /// value of an arbitrary expression is not.
    fn check_break_level(&mut self, keyword: &Token, value: &Expr) {
        if let ExprKind::Literal(crate::value::Value::Int(n)) = &value.kind {
            let in_range = *n >= 1 && (*n as usize) <= self.loop_depth;
            if !in_range {
                self.errors.push(ResolverError::new(
                    ResolverErrorKind::InvalidBreakLevel,
                    format!("break level {} is out of range for {} enclosing loop(s)", n, self.loop_depth),
                    keyword.span,
                    keyword.file.clone(),
                ));
            }
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Literal(_) => {}
            ExprKind::Variable(name) => self.resolve_local(expr.id, name),
            ExprKind::Grouping(inner) => self.resolve_expr(inner),
            ExprKind::Unary(_, operand) => self.resolve_expr(operand),
            ExprKind::Postfix(operand, _) => self.resolve_expr(operand),
            ExprKind::Binary(left, _, right) => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }
            ExprKind::Ternary(cond, then_branch, else_branch) => {
                self.resolve_expr(cond);
                self.resolve_expr(then_branch);
                self.resolve_expr(else_branch);
            }
            ExprKind::TypeCast(_, operand) => self.resolve_expr(operand),
            ExprKind::Index { array, start, end, .. } => {
                self.resolve_expr(array);
                if let Some(start) = start {
                    self.resolve_expr(start);
                }
                if let Some(end) = end {
                    self.resolve_expr(end);
                }
            }
            ExprKind::AssignAt { array, index, value, .. } => {
                self.resolve_expr(array);
                self.resolve_expr(index);
                self.resolve_expr(value);
            }
            ExprKind::Call { args, .. } => {
                for arg in args {
                    self.resolve_expr(arg);
                }
            }
            ExprKind::Assignment { name, value } => {
                self.resolve_expr(value);
                self.resolve_local(expr.id, name);
            }
        }
    }

    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    /// Enters `name` into the innermost scope as not-yet-defined, so a
    /// reference to it found while resolving its own initializer can be
    /// caught below rather than silently resolving to an outer binding.
    fn declare(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(identifier_name(name), false);
        }
    }

    /// Marks `name` as fully defined in the innermost scope, once its
    /// initializer (if any) has finished resolving.
    fn define(&mut self, name: &Token) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(identifier_name(name), true);
        }
    }

    /// Walks the scope stack from innermost outward, recording the
    /// distance at which `name` was declared. No match means the
    /// evaluator should treat the reference as global. A match that is
    /// declared but not yet defined means `name` is being read from
    /// inside its own initializer.
    fn resolve_local(&mut self, expr_id: NodeId, name: &Token) {
        let key = identifier_name(name);
        for (distance, scope) in self.scopes.iter().rev().enumerate() {
            if let Some(&defined) = scope.get(&key) {
                if !defined {
                    self.errors.push(ResolverError::new(
                        ResolverErrorKind::SelfReferentialInitializer,
                        format!("can't read local variable '{}' in its own initializer", key),
                        name.span,
                        name.file.clone(),
                    ));
                }
                self.locals.insert(expr_id, distance);
                return;
            }
        }
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

fn identifier_name(tok: &Token) -> String {
    match &tok.kind {
        TokenKind::Identifier(name) => name.clone(),
        other => unreachable!("identifier token expected, found {:?}", other),
    }
}
