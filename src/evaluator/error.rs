//! Runtime error types produced while evaluating a program.

use crate::token::Span;
use std::rc::Rc;

/// The kind of a [`RuntimeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeErrorKind {
    UndefinedVariable,
    UndefinedFunction,
    ArityMismatch,
    TypeError,
    DivisionByZero,
    IndexOutOfBounds,
    InvalidAssignmentTarget,
    InvalidPostfixTarget,
    CoercionError,
    DuplicateDeclaration,
    VoidCallInExpression,
}

/// An error raised while evaluating a resolved program.
#[derive(Debug, Clone)]
pub struct RuntimeError {
    kind: RuntimeErrorKind,
    message: String,
    span: Span,
    file: Rc<str>,
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind, message: impl Into<String>, span: Span, file: Rc<str>) -> Self {
        RuntimeError {
            kind,
            message: message.into(),
            span,
            file,
        }
    }

    pub fn kind(&self) -> RuntimeErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn file(&self) -> &Rc<str> {
        &self.file
    }
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} ln {}] Runtime: {}", self.file, self.span.line, self.message)
    }
}

impl std::error::Error for RuntimeError {}
