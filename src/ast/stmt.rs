//! Statement nodes for the cflat AST.

use super::expr::Expr;
use crate::token::{Span, Token};

/// The kind of a statement, without source location.
/// Use [`Stmt`] for the full AST node.
#[derive(Debug, Clone)]
pub enum StmtKind {
    /// `{ statement* }`.
    Block(Vec<Stmt>),

    /// An expression evaluated for its side effects; the result is
    /// discarded.
    ExprStmt(Expr),

    /// `import a, b, c;` — names of sibling modules to splice in before
    /// resolution.
    Import(Vec<Token>),

    /// `func`/`void` declaration. `returns` distinguishes which of the
    /// two disjoint function tables this declaration populates.
    FunctionDecl {
        name: Token,
        params: Vec<Token>,
        body: Vec<Stmt>,
        returns: bool,
    },

    /// `var name (= init)?;`.
    VarDecl { name: Token, initializer: Option<Expr> },

    /// `arr name (= { init, ... })?;`.
    ArrayDecl { name: Token, initializers: Vec<Expr> },

    /// `if (cond) then (else else_branch)?`.
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    /// `while (cond) body`. `for` loops are desugared into this at parse
    /// time (see the parser's `for`-statement handling).
    While { condition: Expr, body: Box<Stmt> },

    /// `switch (switcher) { case switchees[i]: cases[i] ... default: .. }`.
    /// Case bodies fall through into the next case by default; `break;`
    /// is the only way to opt out.
    Switch {
        switcher: Expr,
        switchees: Vec<Expr>,
        cases: Vec<Stmt>,
        default: Option<Box<Stmt>>,
    },

    /// `return expr?;`.
    Return { keyword: Token, value: Option<Expr> },

    /// `break n?;` — `value` is the (optional) break-level expression,
    /// defaulting to 1 when absent.
    Break { keyword: Token, value: Option<Expr> },
}

/// A statement in the cflat language with source location.
#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    /// Creates a new statement with the given kind and span.
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}
