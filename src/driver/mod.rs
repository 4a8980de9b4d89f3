//! Orchestrates the lex -> parse -> import -> resolve -> evaluate pipeline
//! for a single cflat program.

mod import;

pub use import::{ImportError, ImportErrorKind, Importer};

use crate::ast::Program;
use crate::evaluator::{Evaluator, RuntimeError};
use crate::lexer::{LexError, Lexer};
use crate::parser::{ParseError, Parser};
use crate::resolver::{Resolver, ResolverError};
use std::rc::Rc;

/// A failure from any stage of the pipeline.
///
/// This enum unifies errors from lexing, parsing, import resolution,
/// scope resolution, and evaluation so the caller has a single place to
/// turn a failure into a diagnostic and an exit code.
pub enum CompileError {
    /// The entry source file could not be read.
    Io { path: String, source: std::io::Error },
    /// A lexical error in the entry file. Only the first is reported;
    /// the lexer itself accumulates every one it finds.
    Lex(LexError),
    /// A syntax error in the entry file.
    Parse(ParseError),
    /// A failure resolving or splicing an `import`.
    Import(ImportError),
    /// A static scope error (e.g. `break` with no enclosing loop).
    Resolve(ResolverError),
    /// A failure during evaluation.
    Runtime(RuntimeError),
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Io { path, source } => write!(f, "cannot read '{}': {}", path, source),
            CompileError::Lex(e) => write!(f, "{}", e),
            CompileError::Parse(e) => write!(f, "{}", e),
            CompileError::Import(e) => write!(f, "{}", e),
            CompileError::Resolve(e) => write!(f, "{}", e),
            CompileError::Runtime(e) => write!(f, "{}", e),
        }
    }
}

impl CompileError {
    /// The process exit code this failure should produce.
    ///
    /// A runtime error gets its own code; every other stage is an
    /// inability to get a program running at all, so they share the
    /// "bad input" code rather than the usage-error code reserved for
    /// CLI argument mistakes.
    pub fn exit_code(&self) -> i32 {
        match self {
            CompileError::Runtime(_) => 1,
            _ => 65,
        }
    }
}

/// Runs the cflat program at `path` to completion, returning the process
/// exit code it should produce. Diagnostics are printed to stderr along
/// the way; this function never panics on a malformed program.
pub fn run(path: &str) -> i32 {
    match run_inner(path) {
        Ok(()) => 0,
        Err(err) => {
            crate::diagnostics::report(&err);
            err.exit_code()
        }
    }
}

fn run_inner(path: &str) -> Result<(), CompileError> {
    tracing::info!(path, "reading source file");
    let source = std::fs::read_to_string(path).map_err(|e| CompileError::Io {
        path: path.to_string(),
        source: e,
    })?;

    let file: Rc<str> = Rc::from(path);

    tracing::debug!("lexing");
    let (tokens, lex_errors) = Lexer::new(&source, Rc::clone(&file)).tokenize();
    if let Some(e) = lex_errors.into_iter().next() {
        return Err(CompileError::Lex(e));
    }

    tracing::debug!("parsing");
    let (program, parse_errors, node_ids) = Parser::new(tokens).parse();
    if let Some(e) = parse_errors.into_iter().next() {
        return Err(CompileError::Parse(e));
    }

    tracing::debug!("resolving imports");
    let statements = Importer::new(node_ids).splice(program.statements).map_err(CompileError::Import)?;
    let program = Program { statements };

    tracing::debug!("resolving scopes");
    let (locals, resolver_errors) = Resolver::new().resolve(&program);
    if let Some(e) = resolver_errors.into_iter().next() {
        return Err(CompileError::Resolve(e));
    }

    tracing::info!("evaluating");
    let mut evaluator = Evaluator::new(locals);
    evaluator.run(&program).map_err(CompileError::Runtime)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    // Import resolution is relative to the process's current directory,
    // so any test exercising an `import` serializes on this lock rather
    // than risk racing another test's `set_current_dir` call.
    static CWD_LOCK: Mutex<()> = Mutex::new(());

    fn write_source(contents: &str) -> (tempfile::TempDir, String) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("program.cflat");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, path.to_str().unwrap().to_string())
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = run_inner("/no/such/file.cflat").unwrap_err();
        assert!(matches!(err, CompileError::Io { .. }));
        assert_eq!(err.exit_code(), 65);
    }

    #[test]
    fn test_parse_error_exits_65() {
        let (_dir, path) = write_source("var = ;");
        let err = run_inner(&path).unwrap_err();
        assert!(matches!(err, CompileError::Parse(_)));
        assert_eq!(err.exit_code(), 65);
    }

    #[test]
    fn test_runtime_error_exits_1() {
        let (_dir, path) = write_source("var result = 1 / 0;");
        let err = run_inner(&path).unwrap_err();
        assert!(matches!(err, CompileError::Runtime(_)));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_successful_program_returns_ok() {
        let (_dir, path) = write_source("void main() { print(\"hello\"); } main();");
        assert!(run_inner(&path).is_ok());
    }

    /// An imported module is parsed by its own `Parser`; its node ids
    /// must continue from the entry file's generator rather than
    /// restart at 0, or a reference in the entry file can collide with
    /// a resolved local from the imported module and resolve to the
    /// wrong scope depth.
    #[test]
    fn test_imported_module_nodes_do_not_collide_with_entry_file_nodes() {
        let _guard = CWD_LOCK.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("cflatexe")).unwrap();
        std::fs::write(dir.path().join("cflatexe").join("lib.cflat"), "func f(a) { var b = a; var c = b; return c; }").unwrap();
        let entry = dir.path().join("cflatexe").join("main.cflat");
        std::fs::write(&entry, "import lib; var g = 5; print(g);").unwrap();

        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();
        let result = run_inner(entry.to_str().unwrap());
        std::env::set_current_dir(previous).unwrap();

        assert!(result.is_ok(), "expected success, got {:?}", result.err().map(|e| e.to_string()));
    }
}
