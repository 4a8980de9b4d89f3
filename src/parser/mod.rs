//! Parser for the cflat language.
//!
//! This module provides the [`Parser`] struct which transforms a token
//! stream into an Abstract Syntax Tree ([`Program`]).
//!
//! # Overview
//!
//! The parser is a recursive-descent parser. Binary operators are lexed
//! as a single `OPERATOR` token holding the raw lexeme string rather than
//! a dedicated `TokenKind` variant per operator, so precedence climbing
//! is implemented as a cascade of one function per precedence level
//! (each checking the current token's lexeme) instead of a single
//! generic Pratt loop keyed on `TokenKind`.
//!
//! # Grammar
//!
//! ```text
//! program     → statement* EOF
//! statement   → block | import | funcDecl | voidDecl | varDecl | arrDecl
//!             | ifStmt | whileStmt | forStmt | switchStmt | returnStmt
//!             | breakStmt | exprStmt
//! block       → "{" statement* "}"
//! import      → "import" IDENTIFIER ("," IDENTIFIER)* ";"
//! funcDecl    → "func" IDENTIFIER "(" params? ")" block
//! voidDecl    → "void" IDENTIFIER "(" params? ")" block
//! varDecl     → "var" IDENTIFIER ("=" expr)? ";"
//! arrDecl     → "arr" IDENTIFIER ("=" "{" (expr ("," expr)*)? "}")? ";"
//! ifStmt      → "if" "(" expr ")" statement ("else" statement)?
//! whileStmt   → "while" "(" expr ")" statement
//! forStmt     → "for" "(" (varDecl | exprStmt | ";") expr? ";" expr? ")" statement
//! switchStmt  → "switch" "(" expr ")" "{" caseClause* defaultClause? "}"
//! returnStmt  → "return" expr? ";"
//! breakStmt   → "break" expr? ";"
//! exprStmt    → expr ";"
//!
//! expr        → assignment
//! assignment  → ternary (assignOp assignment)?
//! ternary     → logicOr ("?" assignment ":" ternary)?
//! ```
//!
//! Parsing is fail-soft: a malformed statement records a [`ParseError`]
//! and the parser "rerails" to the next line rather than aborting, so a
//! single run surfaces every syntax error rather than just the first.
//!
//! # Module Structure
//!
//! - [`error`] - Parse error types
//! - `helpers` - Token navigation and basic parsing operations
//! - `decl` - Top-level declaration parsing (func/void/var/arr/import)
//! - `stmt` - Statement parsing
//! - `expr` - Expression parsing
//! - `tests` - Unit tests (test-only)
//!
//! # See Also
//!
//! * [`crate::lexer`] - Produces the token stream consumed by the parser
//! * [`crate::ast`] - Defines the AST types produced by the parser
//! * [`crate::resolver`] - Consumes the AST to annotate scope depth

mod decl;
mod error;
mod expr;
mod helpers;
mod stmt;

#[cfg(test)]
mod tests;

pub use error::{ParseError, ParseErrorKind};

use crate::ast::{NodeId, NodeIdGen, Program, Stmt};
use crate::token::Token;

/// A recursive-descent parser for the cflat language.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    node_ids: NodeIdGen,
}

impl Parser {
    /// Creates a new parser from a token list, numbering its AST nodes
    /// from a fresh id generator starting at 0.
    ///
    /// # Panics
    /// Panics if the token list is empty. The lexer always produces at
    /// least an `Eof` token.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_ids(tokens, NodeIdGen::new())
    }

    /// Creates a new parser that continues numbering AST nodes from
    /// `node_ids` rather than starting over at 0. Used to give every
    /// node in a spliced-together program (entry file plus every
    /// imported module) a process-wide-unique id, since the resolver's
    /// `Locals` table is keyed by that id across the whole program.
    ///
    /// # Panics
    /// Panics if the token list is empty. The lexer always produces at
    /// least an `Eof` token.
    pub fn with_ids(tokens: Vec<Token>, node_ids: NodeIdGen) -> Self {
        assert!(!tokens.is_empty(), "token list must not be empty");
        Parser {
            tokens,
            pos: 0,
            node_ids,
        }
    }

    pub(super) fn next_id(&mut self) -> NodeId {
        self.node_ids.next_id()
    }

    /// Parses the entire token stream into a [`Program`], accumulating
    /// every syntax error encountered rather than stopping at the first.
    /// Returns the id generator's state so a caller stitching together
    /// multiple parses (e.g. the importer) can continue numbering from
    /// where this one left off.
    pub fn parse(mut self) -> (Program, Vec<ParseError>, NodeIdGen) {
        let mut statements = Vec::new();
        let mut errors = Vec::new();

        while !self.is_eof() {
            match self.parse_statement() {
                Ok(stmt) => statements.push(stmt),
                Err(err) => {
                    errors.push(err);
                    self.rerail();
                }
            }
        }

        (Program::new(statements), errors, self.node_ids)
    }

    /// Parses a single statement; exposed for the declaration/statement
    /// submodules which recurse into each other (e.g. a block contains
    /// statements, an `if` branch is a single statement).
    pub(super) fn parse_statement_boxed(&mut self) -> Result<Box<Stmt>, ParseError> {
        self.parse_statement().map(Box::new)
    }
}
