//! Variable storage for the evaluator.
//!
//! The scope stack mirrors exactly the `begin_scope`/`end_scope` calls
//! the resolver makes while walking the same AST, so a resolved
//! distance of `d` always means "the `d`-th scope counting from the
//! innermost one currently open". A reference the resolver found no
//! local scope for is looked up in `globals` instead.

use crate::value::Value;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct Environment {
    globals: HashMap<String, Value>,
    scopes: Vec<HashMap<String, Value>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            globals: HashMap::new(),
            scopes: Vec::new(),
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Defines `name` in the innermost open scope, or globally if no
    /// scope is open (top-level declarations). Fails if `name` is
    /// already declared in that exact scope — shadowing an outer scope
    /// is fine, redeclaring within the same one is not.
    pub fn define(&mut self, name: &str, value: Value) -> bool {
        if let Some(scope) = self.scopes.last_mut() {
            if scope.contains_key(name) {
                return false;
            }
            scope.insert(name.to_string(), value);
        } else {
            if self.globals.contains_key(name) {
                return false;
            }
            self.globals.insert(name.to_string(), value);
        }
        true
    }

    pub fn get_global(&self, name: &str) -> Option<Value> {
        self.globals.get(name).cloned()
    }

    pub fn assign_global(&mut self, name: &str, value: Value) -> bool {
        if let Some(slot) = self.globals.get_mut(name) {
            *slot = value;
            true
        } else {
            false
        }
    }

    /// Reads a variable `distance` scopes out from the innermost one.
    pub fn get_at(&self, distance: usize, name: &str) -> Option<Value> {
        let idx = self.scopes.len().checked_sub(distance + 1)?;
        self.scopes[idx].get(name).cloned()
    }

    /// Writes a variable `distance` scopes out from the innermost one.
    pub fn assign_at(&mut self, distance: usize, name: &str, value: Value) -> bool {
        let Some(idx) = self.scopes.len().checked_sub(distance + 1) else {
            return false;
        };
        if let Some(slot) = self.scopes[idx].get_mut(name) {
            *slot = value;
            true
        } else {
            false
        }
    }
}
