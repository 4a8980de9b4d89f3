//! The tree-walking evaluator for cflat programs.
//!
//! The evaluator executes a resolved [`Program`] directly against its
//! AST — there is no bytecode or intermediate representation. Control
//! flow that needs to unwind through several statement frames (`return`,
//! `break n`) is modeled as the explicit [`Flow`] enum returned by every
//! statement-executing method, rather than Rust panics/exceptions or a
//! boolean sentinel: each frame inspects the `Flow` its child produced
//! and decides whether to keep propagating it or absorb it.
//!
//! # Module Structure
//!
//! - [`error`] - Runtime error types
//! - [`environment`] - Variable storage (globals + lexical scope stack)
//! - [`builtins`] - Functions available without an `import`
//! - `expr` - Expression evaluation
//! - `stmt` - Statement execution
//! - `tests` - Unit tests (test-only)

mod builtins;
mod environment;
pub mod error;
mod expr;
mod stmt;


pub use error::{RuntimeError, RuntimeErrorKind};

use crate::ast::{Program, Stmt, StmtKind};
use crate::resolver::Locals;
use crate::token::Token;
use crate::value::Value;
use environment::Environment;
use std::collections::HashMap;
use std::rc::Rc;

/// How control is currently flowing out of a statement.
///
/// `Breaking(n)` carries the number of enclosing loops/switches still to
/// unwind through; a `break;` with no explicit level produces
/// `Breaking(1)`, consumed by the nearest enclosing loop.
#[derive(Debug, Clone)]
pub enum Flow {
    Normal,
    Returning(Value),
    Breaking(u32),
}

#[derive(Debug)]
struct FunctionDef {
    params: Vec<Token>,
    body: Vec<Stmt>,
    #[allow(dead_code)]
    returns: bool,
}

/// Evaluates a resolved [`Program`].
/// Functions are looked up by name *and* arity — cflat allows
/// overloading a name across different parameter counts, the same way
/// `println`/`println(x)` are really two different builtins.
type FunctionKey = (String, usize);

#[derive(Debug)]
pub struct Evaluator {
    env: Environment,
    locals: Locals,
    functions: HashMap<FunctionKey, Rc<FunctionDef>>,
    voids: HashMap<FunctionKey, Rc<FunctionDef>>,
}

impl Evaluator {
    pub fn new(locals: Locals) -> Self {
        Evaluator {
            env: Environment::new(),
            locals,
            functions: HashMap::new(),
            voids: HashMap::new(),
        }
    }

    /// Registers every top-level `func`/`void` declaration before
    /// executing any statement, so forward references (a function
    /// calling one declared later in the file) resolve correctly.
    fn register_functions(&mut self, program: &Program) {
        for stmt in &program.statements {
            if let StmtKind::FunctionDecl { name, params, body, returns } = &stmt.kind {
                let def = Rc::new(FunctionDef { params: params.clone(), body: body.clone(), returns: *returns });
                let key = (identifier_name(name), params.len());
                if *returns {
                    self.functions.insert(key, def);
                } else {
                    self.voids.insert(key, def);
                }
            }
        }
    }

    /// Runs the whole program, executing top-level statements in order.
    pub fn run(&mut self, program: &Program) -> Result<(), RuntimeError> {
        self.register_functions(program);
        for stmt in &program.statements {
            // A top-level `func`/`void` was already captured above; skip
            // re-executing its declaration (it has no side effect of its
            // own beyond registration).
            if matches!(stmt.kind, StmtKind::FunctionDecl { .. }) {
                continue;
            }
            self.exec_stmt(stmt)?;
        }
        Ok(())
    }

    /// Reads back a global variable's current value. Exposed for tests
    /// and embedding callers that want to inspect a program's state
    /// after it has run.
    pub fn global(&self, name: &str) -> Option<Value> {
        self.env.get_global(name)
    }
}

fn identifier_name(tok: &Token) -> String {
    match &tok.kind {
        crate::token::TokenKind::Identifier(name) => name.clone(),
        other => unreachable!("identifier token expected, found {:?}", other),
    }
}
