//! Abstract Syntax Tree definitions for the cflat language.
//!
//! This module defines the data structures that represent parsed cflat
//! programs. The AST is produced by the [`crate::parser`], annotated by
//! the [`crate::resolver`], and consumed by the [`crate::evaluator`].
//!
//! # Module Structure
//!
//! - [`node_id`] - Stable per-node identity for the resolver's side table
//! - [`expr`] - Expression nodes and kinds
//! - [`stmt`] - Statement nodes and kinds
//! - [`program`] - Top-level program structure
//!
//! Each AST node includes source location information ([`Span`](crate::token::Span))
//! for error reporting, and every expression additionally carries a
//! [`NodeId`] for resolver annotation.

mod expr;
mod node_id;
mod program;
mod stmt;

pub use expr::{Expr, ExprKind};
pub use node_id::{NodeId, NodeIdGen};
pub use program::Program;
pub use stmt::{Stmt, StmtKind};
