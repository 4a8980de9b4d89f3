//! Splicing `import` statements into a program's top-level statement list.
//!
//! cflat has no module system beyond this: `import a, b;` names sibling
//! files under `./cflatexe/`, and only their `func`/`void` declarations
//! are pulled in — a library file's own top-level `var`s or bare calls
//! are not imported, the same way a C header only exposes declarations.

use crate::ast::{NodeIdGen, StmtKind};
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::token::{Span, Token};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// The kind of an [`ImportError`], for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportErrorKind {
    /// The module named by an `import` could not be found or read.
    FileNotFound,
    /// A imports B imports ... imports A.
    CircularImport,
    /// The imported file itself failed to lex.
    Lex,
    /// The imported file itself failed to parse.
    Parse,
}

/// An error produced while resolving an `import` statement.
///
/// Import resolution happens between parsing and resolving, and is
/// reported as a parse-time diagnostic: a program with a broken import
/// never reaches the evaluator.
#[derive(Debug, Clone)]
pub struct ImportError {
    kind: ImportErrorKind,
    message: String,
    span: Span,
    file: Rc<str>,
}

impl ImportError {
    pub fn new(kind: ImportErrorKind, message: impl Into<String>, span: Span, file: Rc<str>) -> Self {
        ImportError {
            kind,
            message: message.into(),
            span,
            file,
        }
    }

    pub fn kind(&self) -> ImportErrorKind {
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

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} ln {}] Syntax: {}", self.file, self.span.line, self.message)
    }
}

impl std::error::Error for ImportError {}

/// Resolves `import` statements by recursively lexing, parsing, and
/// splicing the `func`/`void` declarations of every named module.
///
/// Modules are cached by canonical path, so a module imported from two
/// different places is only read and parsed once. Cycle detection walks
/// a stack of paths currently being loaded, mirroring the
/// push-before-recurse/pop-after-recurse shape used elsewhere in this
/// codebase for module resolution.
///
/// Every imported module is parsed by continuing the same [`NodeIdGen`]
/// the entry file's own parse left off at, rather than starting a fresh
/// one at 0 — the resolver's `Locals` table is keyed by node id across
/// the whole spliced program, so two different files' nodes must never
/// share an id.
pub struct Importer {
    loading: Vec<PathBuf>,
    resolved: HashMap<PathBuf, Vec<crate::ast::Stmt>>,
    node_ids: NodeIdGen,
}

impl Importer {
    pub fn new(node_ids: NodeIdGen) -> Self {
        Importer {
            loading: Vec::new(),
            resolved: HashMap::new(),
            node_ids,
        }
    }

    /// Walks `statements`, replacing each `Import` with the declarations
    /// it names, and returns the combined list.
    pub fn splice(&mut self, statements: Vec<crate::ast::Stmt>) -> Result<Vec<crate::ast::Stmt>, ImportError> {
        let mut out = Vec::with_capacity(statements.len());
        for stmt in statements {
            match stmt.kind {
                StmtKind::Import(names) => {
                    for name in &names {
                        out.extend(self.load_module(name)?);
                    }
                }
                other => out.push(crate::ast::Stmt::new(other, stmt.span)),
            }
        }
        Ok(out)
    }

    fn load_module(&mut self, name: &Token) -> Result<Vec<crate::ast::Stmt>, ImportError> {
        let module_name = identifier_name(name);
        let path = Path::new("./cflatexe").join(format!("{}.cflat", module_name));

        let canonical = path.canonicalize().map_err(|_| {
            ImportError::new(
                ImportErrorKind::FileNotFound,
                format!("cannot find module '{}' (looked for {})", module_name, path.display()),
                name.span,
                name.file.clone(),
            )
        })?;

        if let Some(cached) = self.resolved.get(&canonical) {
            return Ok(cached.clone());
        }
        if self.loading.contains(&canonical) {
            return Err(ImportError::new(
                ImportErrorKind::CircularImport,
                format!("circular import detected while importing '{}'", module_name),
                name.span,
                name.file.clone(),
            ));
        }

        let source = std::fs::read_to_string(&canonical).map_err(|_| {
            ImportError::new(
                ImportErrorKind::FileNotFound,
                format!("cannot read module '{}' at {}", module_name, canonical.display()),
                name.span,
                name.file.clone(),
            )
        })?;

        self.loading.push(canonical.clone());
        let declarations = self.parse_module(&source, &canonical);
        self.loading.pop();
        let declarations = declarations?;

        self.resolved.insert(canonical, declarations.clone());
        Ok(declarations)
    }

    fn parse_module(&mut self, source: &str, canonical: &Path) -> Result<Vec<crate::ast::Stmt>, ImportError> {
        let module_file: Rc<str> = Rc::from(canonical.to_string_lossy().as_ref());

        let (tokens, lex_errors) = Lexer::new(source, Rc::clone(&module_file)).tokenize();
        if let Some(e) = lex_errors.into_iter().next() {
            return Err(ImportError::new(ImportErrorKind::Lex, e.message().to_string(), e.span(), e.file().clone()));
        }

        let node_ids = std::mem::take(&mut self.node_ids);
        let (program, parse_errors, node_ids) = Parser::with_ids(tokens, node_ids).parse();
        self.node_ids = node_ids;
        if let Some(e) = parse_errors.into_iter().next() {
            return Err(ImportError::new(ImportErrorKind::Parse, e.message().to_string(), e.span(), e.file().clone()));
        }

        let mut declarations = Vec::new();
        let mut nested_imports = Vec::new();
        for stmt in program.statements {
            match &stmt.kind {
                StmtKind::FunctionDecl { .. } => declarations.push(stmt),
                StmtKind::Import(_) => nested_imports.push(stmt),
                // A library module's own top-level vars/calls run only
                // if it is executed directly, not when it is imported.
                _ => {}
            }
        }
        declarations.extend(self.splice(nested_imports)?);
        Ok(declarations)
    }
}

fn identifier_name(tok: &Token) -> String {
    match &tok.kind {
        crate::token::TokenKind::Identifier(name) => name.clone(),
        other => unreachable!("identifier token expected, found {:?}", other),
    }
}
