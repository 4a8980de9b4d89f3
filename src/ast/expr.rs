//! Expression nodes for the cflat AST.

use super::node_id::NodeId;
use crate::token::{Span, Token};
use crate::value::Value;

/// The kind of an expression, without source location or node identity.
/// Use [`Expr`] for the full AST node.
#[derive(Debug, Clone)]
pub enum ExprKind {
    /// A literal value baked in at parse time (int, double, bool, string,
    /// or null). Lists are never literals — they are built by `ArrayDecl`.
    Literal(Value),

    /// A reference to a variable by name.
    Variable(Token),

    /// A parenthesized sub-expression, kept distinct from its inner
    /// expression so diagnostics can point at the parens when useful.
    Grouping(Box<Expr>),

    /// A prefix operator applied to an operand: `+ - ! ~`.
    Unary(Token, Box<Expr>),

    /// A postfix `++`/`--` applied to a bare variable.
    Postfix(Box<Expr>, Token),

    /// A binary operator with its two operands.
    Binary(Box<Expr>, Token, Box<Expr>),

    /// `cond ? then : otherwise`.
    Ternary(Box<Expr>, Box<Expr>, Box<Expr>),

    /// `(bln|int|flt|str) expr` — a coercion, not a grouping.
    TypeCast(Token, Box<Expr>),

    /// `name[start? :? end?]` on a variable holding a string or list.
    Index {
        name: Token,
        array: Box<Expr>,
        lbracket: Token,
        start: Option<Box<Expr>>,
        /// Present when a `:` was parsed, marking this as a slice.
        colon: Option<Token>,
        end: Option<Box<Expr>>,
    },

    /// `name[index] op= value` where `op` is `"="` or `"+="`.
    AssignAt {
        name: Token,
        array: Box<Expr>,
        op: String,
        index: Box<Expr>,
        value: Box<Expr>,
    },

    /// A call to a bare-identifier callee.
    Call {
        callee: Token,
        paren: Token,
        args: Vec<Expr>,
    },

    /// `name = value`.
    Assignment { name: Token, value: Box<Expr> },
}

/// An expression in the cflat language, with source location and a
/// stable identity used to key the resolver's side table.
#[derive(Debug, Clone)]
pub struct Expr {
    pub id: NodeId,
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    /// Creates a new expression with the given id, kind, and span.
    pub fn new(id: NodeId, kind: ExprKind, span: Span) -> Self {
        Expr { id, kind, span }
    }
}
