//! Stderr diagnostic reporting.
//!
//! The CLI's two contractual stderr lines come straight from each error
//! type's own `Display` impl: `[<file> ln <line>] Syntax: <message>` for
//! lex/parse/import/resolve failures, `[<file> ln <line>] Runtime:
//! <message>` for evaluator failures. This module's only job is routing
//! a [`CompileError`](crate::driver::CompileError) to the right line.
//! `tracing` output is a separate, opt-in stream gated by `RUST_LOG` and
//! never touches stderr through this path.

use crate::driver::CompileError;

/// Prints the single diagnostic line appropriate for `error`.
pub fn report(error: &CompileError) {
    eprintln!("{}", error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::{RuntimeError, RuntimeErrorKind};
    use crate::lexer::{LexError, LexErrorKind};
    use std::rc::Rc;

    fn file() -> Rc<str> {
        Rc::from("test.cflat")
    }

    #[test]
    fn test_lex_error_uses_syntax_format() {
        let err = CompileError::Lex(LexError::new(LexErrorKind::UnterminatedString, "unterminated string", crate::token::Span::new(0, 1, 3), file()));
        assert_eq!(format!("{}", err), "[test.cflat ln 3] Syntax: unterminated string");
    }

    #[test]
    fn test_runtime_error_uses_runtime_format() {
        let err = CompileError::Runtime(RuntimeError::new(RuntimeErrorKind::DivisionByZero, "division by zero", crate::token::Span::new(0, 1, 7), file()));
        assert_eq!(format!("{}", err), "[test.cflat ln 7] Runtime: division by zero");
    }

    #[test]
    fn test_io_error_does_not_use_the_syntax_or_runtime_format() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let err = CompileError::Io { path: "missing.cflat".to_string(), source: io_err };
        let message = format!("{}", err);
        assert!(message.contains("missing.cflat"));
        assert!(!message.contains("Syntax:"));
        assert!(!message.contains("Runtime:"));
    }
}
