//! Expression evaluation.

use super::{Evaluator, FunctionDef};
use crate::ast::{Expr, ExprKind};
use crate::evaluator::error::{RuntimeError, RuntimeErrorKind};
use crate::token::{Token, TokenKind};
use crate::value::Value;
use std::rc::Rc;

impl Evaluator {
    pub(super) fn eval_expr(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match &expr.kind {
            ExprKind::Literal(value) => Ok(value.clone()),
            ExprKind::Variable(name) => self.lookup_variable(expr.id, name),
            ExprKind::Grouping(inner) => self.eval_expr(inner),
            ExprKind::Unary(op, operand) => self.eval_unary(op, operand),
            ExprKind::Postfix(operand, op) => self.eval_postfix(operand, op),
            ExprKind::Binary(left, op, right) => self.eval_binary(left, op, right),
            ExprKind::Ternary(cond, then_branch, else_branch) => {
                if self.eval_expr(cond)?.to_bool() {
                    self.eval_expr(then_branch)
                } else {
                    self.eval_expr(else_branch)
                }
            }
            ExprKind::TypeCast(kw, operand) => self.eval_cast(kw, operand),
            ExprKind::Index { name: _, array, lbracket, start, colon, end } => {
                self.eval_index(array, lbracket, start.as_deref(), colon.is_some(), end.as_deref())
            }
            ExprKind::AssignAt { name, array, op, index, value } => self.eval_assign_at(name, array, op, index, value),
            ExprKind::Call { callee, paren, args } => self.eval_call(callee, paren, args),
            ExprKind::Assignment { name, value } => {
                let v = self.eval_expr(value)?;
                self.assign_variable(expr.id, name, v.clone())?;
                Ok(v)
            }
        }
    }

    fn lookup_variable(&self, expr_id: crate::ast::NodeId, name: &Token) -> Result<Value, RuntimeError> {
        let key = identifier_name(name);
        let found = match self.locals.get(&expr_id) {
            Some(&distance) => self.env.get_at(distance, &key),
            None => self.env.get_global(&key),
        };
        found.ok_or_else(|| {
            RuntimeError::new(
                RuntimeErrorKind::UndefinedVariable,
                format!("undefined variable '{}'", key),
                name.span,
                name.file.clone(),
            )
        })
    }

    fn assign_variable(&mut self, expr_id: crate::ast::NodeId, name: &Token, value: Value) -> Result<(), RuntimeError> {
        let key = identifier_name(name);
        let ok = match self.locals.get(&expr_id) {
            Some(&distance) => self.env.assign_at(distance, &key, value.clone()),
            None => self.env.assign_global(&key, value.clone()),
        };
        if ok {
            Ok(())
        } else {
            Err(RuntimeError::new(
                RuntimeErrorKind::UndefinedVariable,
                format!("undefined variable '{}'", key),
                name.span,
                name.file.clone(),
            ))
        }
    }

    fn eval_unary(&mut self, op: &Token, operand: &Expr) -> Result<Value, RuntimeError> {
        let value = self.eval_expr(operand)?;
        match op_lexeme(op) {
            "-" => match value {
                Value::Int(n) => Ok(Value::Int(n.wrapping_neg())),
                Value::Double(d) => Ok(Value::Double(-d)),
                other => Err(type_error("a number", &other, op)),
            },
            "+" => match value {
                Value::Int(_) | Value::Double(_) => Ok(value),
                other => Err(type_error("a number", &other, op)),
            },
            "!" => Ok(Value::Bool(!value.to_bool())),
            "~" => match value {
                Value::Int(n) => Ok(Value::Int(!n)),
                other => Err(type_error("an int", &other, op)),
            },
            other => unreachable!("unknown unary operator '{}'", other),
        }
    }

    fn eval_postfix(&mut self, operand: &Expr, op: &Token) -> Result<Value, RuntimeError> {
        let ExprKind::Variable(name) = &operand.kind else {
            return Err(RuntimeError::new(
                RuntimeErrorKind::InvalidPostfixTarget,
                "'++'/'--' may only be applied to a bare variable",
                op.span,
                op.file.clone(),
            ));
        };
        let old = self.lookup_variable(operand.id, name)?;
        let delta = if op_lexeme(op) == "++" { 1 } else { -1 };
        let updated = match &old {
            Value::Int(n) => Value::Int(n.wrapping_add(delta)),
            Value::Double(d) => Value::Double(d + delta as f64),
            other => return Err(type_error("a number", other, op)),
        };
        self.assign_variable(operand.id, name, updated)?;
        Ok(old)
    }

    fn eval_binary(&mut self, left: &Expr, op: &Token, right: &Expr) -> Result<Value, RuntimeError> {
        let lexeme = op_lexeme(op);
        if lexeme == "&&" {
            let l = self.eval_expr(left)?;
            if !l.to_bool() {
                return Ok(Value::Bool(false));
            }
            return Ok(Value::Bool(self.eval_expr(right)?.to_bool()));
        }
        if lexeme == "||" {
            let l = self.eval_expr(left)?;
            if l.to_bool() {
                return Ok(Value::Bool(true));
            }
            return Ok(Value::Bool(self.eval_expr(right)?.to_bool()));
        }

        let l = self.eval_expr(left)?;
        // `list + anything` appends in place and yields the same (now
        // longer) list, rather than going through numeric/string `+`.
        if lexeme == "+" {
            if let Value::List(items) = &l {
                let r = self.eval_expr(right)?;
                items.borrow_mut().push(r);
                return Ok(l);
            }
        }
        let r = self.eval_expr(right)?;
        apply_binary(lexeme, l, r, op)
    }

    fn eval_cast(&mut self, kw: &Token, operand: &Expr) -> Result<Value, RuntimeError> {
        let value = self.eval_expr(operand)?;
        let target = match &kw.kind {
            TokenKind::Identifier(name) => name.as_str(),
            _ => unreachable!("cast keyword must be an identifier token"),
        };
        let coerce = |e: String| RuntimeError::new(RuntimeErrorKind::CoercionError, e, kw.span, kw.file.clone());
        match target {
            "bln" => Ok(Value::Bool(value.to_bool())),
            "int" => value.to_int().map(Value::Int).map_err(coerce),
            "flt" => value.to_double().map(Value::Double).map_err(coerce),
            "str" => Ok(Value::Str(value.to_cflat_string())),
            other => unreachable!("unknown cast target '{}'", other),
        }
    }

    fn eval_index(
        &mut self,
        array: &Expr,
        lbracket: &Token,
        start: Option<&Expr>,
        is_slice: bool,
        end: Option<&Expr>,
    ) -> Result<Value, RuntimeError> {
        let container = self.eval_expr(array)?;
        let start_idx = start.map(|e| self.eval_expr(e)).transpose()?.map(|v| v.to_int()).transpose().map_err(|e| coercion_error(e, lbracket))?;
        let end_idx = end.map(|e| self.eval_expr(e)).transpose()?.map(|v| v.to_int()).transpose().map_err(|e| coercion_error(e, lbracket))?;

        match &container {
            Value::Str(s) => {
                let chars: Vec<char> = s.chars().collect();
                let len = chars.len() as i64;
                if is_slice {
                    let (from, to) = slice_bounds(start_idx, end_idx, len, lbracket)?;
                    Ok(Value::string(chars[from..to].iter().collect::<String>()))
                } else {
                    let i = require_single_index(start_idx, lbracket)?;
                    let idx = bounds_check(i, len, lbracket)?;
                    Ok(Value::string(chars[idx].to_string()))
                }
            }
            Value::List(items) => {
                let borrowed = items.borrow();
                let len = borrowed.len() as i64;
                if is_slice {
                    let (from, to) = slice_bounds(start_idx, end_idx, len, lbracket)?;
                    Ok(Value::list(borrowed[from..to].to_vec()))
                } else {
                    let i = require_single_index(start_idx, lbracket)?;
                    let idx = bounds_check(i, len, lbracket)?;
                    Ok(borrowed[idx].clone())
                }
            }
            other => Err(type_error("a string or list", other, lbracket)),
        }
    }

    /// `a[i] = v` replaces a list element or splices a string; `a[i] += v`
    /// inserts into a list or splices a string without removing the
    /// existing character. A list is mutated in place through its shared
    /// `Rc<RefCell<_>>`; a string is immutable, so the new string is
    /// written back through `name`'s resolved binding instead.
    fn eval_assign_at(&mut self, name: &Token, array: &Expr, op: &str, index: &Expr, value: &Expr) -> Result<Value, RuntimeError> {
        let container = self.eval_expr(array)?;
        let idx_val = self.eval_expr(index)?;
        let i = idx_val.to_int().map_err(|e| coercion_error(e, name))?;
        let new_value = self.eval_expr(value)?;

        match &container {
            Value::List(items) => match op {
                "=" => {
                    let len = items.borrow().len() as i64;
                    let idx = bounds_check(i, len, name)?;
                    items.borrow_mut()[idx] = new_value.clone();
                    Ok(new_value)
                }
                "+=" => {
                    let len = items.borrow().len() as i64;
                    let idx = insertion_index(i, len, name)?;
                    items.borrow_mut().insert(idx, new_value.clone());
                    Ok(new_value)
                }
                other => unreachable!("unknown AssignAt operator '{}'", other),
            },
            Value::Str(s) => {
                if !matches!(array.kind, ExprKind::Variable(_)) {
                    return Err(type_error("a bare variable", &container, name));
                }
                let chars: Vec<char> = s.chars().collect();
                let len = chars.len() as i64;
                let result = match op {
                    "=" => {
                        let idx = bounds_check(i, len, name)?;
                        let mut out = String::new();
                        out.extend(chars[..idx].iter());
                        out.push_str(&new_value.display_string());
                        out.extend(chars[idx + 1..].iter());
                        out
                    }
                    "+=" => {
                        let Value::Str(insert) = &new_value else {
                            return Err(type_error("a string", &new_value, name));
                        };
                        let idx = insertion_index(i, len, name)?;
                        let mut out = String::new();
                        out.extend(chars[..idx].iter());
                        out.push_str(insert);
                        out.extend(chars[idx..].iter());
                        out
                    }
                    other => unreachable!("unknown AssignAt operator '{}'", other),
                };
                let new_str = Value::string(result);
                self.assign_variable(array.id, name, new_str.clone())?;
                Ok(new_str)
            }
            other => Err(type_error("a list or string", other, name)),
        }
    }

    fn eval_call(&mut self, callee: &Token, paren: &Token, args: &[Expr]) -> Result<Value, RuntimeError> {
        self.call_expr(callee, paren, args, false)
    }

    /// Resolves and invokes `name(args)`. `prefer_void` distinguishes a
    /// call used as a bare statement (where a `void` is perfectly
    /// normal and is looked up first) from one used in an expression
    /// position (where only the `func` table is eligible, and a `void`
    /// match with no `func` counterpart is an error rather than a
    /// silent `null`).
    pub(super) fn call_expr(&mut self, callee: &Token, paren: &Token, args: &[Expr], prefer_void: bool) -> Result<Value, RuntimeError> {
        let name = identifier_name(callee);
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.eval_expr(arg)?);
        }
        let arity = values.len();

        if let Some(result) = super::builtins::call(&name, &values, paren.span, &paren.file) {
            return result;
        }

        let key = (name.clone(), arity);
        let void_def = self.voids.get(&key).cloned();
        let func_def = self.functions.get(&key).cloned();

        if prefer_void {
            if let Some(def) = void_def {
                return self.call_function(&def, values, paren);
            }
            if let Some(def) = func_def {
                return self.call_function(&def, values, paren);
            }
        } else {
            if let Some(def) = func_def {
                return self.call_function(&def, values, paren);
            }
            if void_def.is_some() {
                return Err(RuntimeError::new(
                    RuntimeErrorKind::VoidCallInExpression,
                    format!("function '{}' does not return a value", name),
                    callee.span,
                    callee.file.clone(),
                ));
            }
        }

        Err(RuntimeError::new(
            RuntimeErrorKind::UndefinedFunction,
            format!("undefined function '{}' with {} argument(s){}", name, arity, suggest_other_arity(&self.functions, &self.voids, &name, arity)),
            callee.span,
            callee.file.clone(),
        ))
    }

    fn call_function(&mut self, def: &Rc<FunctionDef>, args: Vec<Value>, call_site: &Token) -> Result<Value, RuntimeError> {
        if args.len() != def.params.len() {
            return Err(RuntimeError::new(
                RuntimeErrorKind::ArityMismatch,
                format!("expected {} argument(s), got {}", def.params.len(), args.len()),
                call_site.span,
                call_site.file.clone(),
            ));
        }
        let previous_env = std::mem::take(&mut self.env);
        self.env.push_scope();

        let mut bind_error = None;
        for (param, value) in def.params.iter().zip(args) {
            if !self.env.define(&identifier_name(param), value) {
                bind_error = Some(RuntimeError::new(
                    RuntimeErrorKind::DuplicateDeclaration,
                    format!("duplicate parameter '{}'", identifier_name(param)),
                    call_site.span,
                    call_site.file.clone(),
                ));
                break;
            }
        }

        let outcome = match bind_error {
            Some(e) => Err(e),
            None => self.exec_block_statements(&def.body),
        };
        self.env = previous_env;
        match outcome? {
            super::Flow::Returning(value) => Ok(value),
            _ => Ok(Value::Null),
        }
    }
}

/// Best-effort "did you mean" hint when a call fails to resolve at its
/// requested arity: looks for the same name at a nearby arity across
/// both tables and, if found, suggests it.
fn suggest_other_arity(functions: &std::collections::HashMap<super::FunctionKey, Rc<FunctionDef>>, voids: &std::collections::HashMap<super::FunctionKey, Rc<FunctionDef>>, name: &str, arity: usize) -> String {
    let highest = arity + 2;
    for candidate in (0..=highest).rev() {
        if candidate == arity {
            continue;
        }
        let key = (name.to_string(), candidate);
        if functions.contains_key(&key) || voids.contains_key(&key) {
            return format!(" Did you mean {} with {} parameters?", name, candidate);
        }
    }
    String::new()
}

fn require_single_index(start: Option<i64>, site: &Token) -> Result<i64, RuntimeError> {
    start.ok_or_else(|| RuntimeError::new(RuntimeErrorKind::IndexOutOfBounds, "missing index expression", site.span, site.file.clone()))
}

fn bounds_check(i: i64, len: i64, site: &Token) -> Result<usize, RuntimeError> {
    if i < 0 || i >= len {
        Err(RuntimeError::new(
            RuntimeErrorKind::IndexOutOfBounds,
            format!("index {} out of bounds for length {}", i, len),
            site.span,
            site.file.clone(),
        ))
    } else {
        Ok(i as usize)
    }
}

/// Like [`bounds_check`], but an index equal to `len` is valid — an
/// insertion (list) or append-position splice (string) at the very end.
fn insertion_index(i: i64, len: i64, site: &Token) -> Result<usize, RuntimeError> {
    if i < 0 || i > len {
        Err(RuntimeError::new(
            RuntimeErrorKind::IndexOutOfBounds,
            format!("insertion index {} out of bounds for length {}", i, len),
            site.span,
            site.file.clone(),
        ))
    } else {
        Ok(i as usize)
    }
}

fn slice_bounds(start: Option<i64>, end: Option<i64>, len: i64, site: &Token) -> Result<(usize, usize), RuntimeError> {
    let from = start.unwrap_or(0).clamp(0, len);
    let to = end.unwrap_or(len).clamp(0, len);
    if from > to {
        return Err(RuntimeError::new(
            RuntimeErrorKind::IndexOutOfBounds,
            format!("slice start {} is after end {}", from, to),
            site.span,
            site.file.clone(),
        ));
    }
    Ok((from as usize, to as usize))
}

fn coercion_error(message: String, site: &Token) -> RuntimeError {
    RuntimeError::new(RuntimeErrorKind::CoercionError, message, site.span, site.file.clone())
}

fn type_error(expected: &str, got: &Value, site: &Token) -> RuntimeError {
    RuntimeError::new(
        RuntimeErrorKind::TypeError,
        format!("expected {}, got a {}", expected, got.type_name()),
        site.span,
        site.file.clone(),
    )
}

fn op_lexeme(tok: &Token) -> &str {
    match &tok.kind {
        TokenKind::Operator(s) => s.as_str(),
        other => unreachable!("operator token expected, found {:?}", other),
    }
}

fn identifier_name(tok: &Token) -> String {
    match &tok.kind {
        TokenKind::Identifier(name) => name.clone(),
        other => unreachable!("identifier token expected, found {:?}", other),
    }
}

/// Applies a non-short-circuiting binary operator to already-evaluated
/// operands. `&&`/`||` are handled by the caller before operands are
/// both forced, so they never reach here.
fn apply_binary(op: &str, left: Value, right: Value, site: &Token) -> Result<Value, RuntimeError> {
    match op {
        "+" => numeric_or_string(left, right, site, |a, b| a.wrapping_add(b), |a, b| a + b),
        "-" => numeric(left, right, site, |a, b| a.wrapping_sub(b), |a, b| a - b),
        "*" => numeric(left, right, site, |a, b| a.wrapping_mul(b), |a, b| a * b),
        "/" => divide(left, right, site),
        "%" => modulo(left, right, site),
        "==" => Ok(Value::Bool(left == right)),
        "!=" => Ok(Value::Bool(left != right)),
        "<" | "<=" | ">" | ">=" => compare(op, left, right, site),
        "&" | "|" | "^" | "<<" | ">>" | ">>>" => bitwise(op, left, right, site),
        other => unreachable!("unknown binary operator '{}'", other),
    }
}

fn numeric(left: Value, right: Value, site: &Token, int_op: impl Fn(i64, i64) -> i64, dbl_op: impl Fn(f64, f64) -> f64) -> Result<Value, RuntimeError> {
    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(int_op(*a, *b))),
        (Value::Int(_) | Value::Double(_), Value::Int(_) | Value::Double(_)) => {
            Ok(Value::Double(dbl_op(left.to_double().unwrap(), right.to_double().unwrap())))
        }
        _ => Err(type_error("two numbers", if left.is_numeric() { &right } else { &left }, site)),
    }
}

fn numeric_or_string(left: Value, right: Value, site: &Token, int_op: impl Fn(i64, i64) -> i64, dbl_op: impl Fn(f64, f64) -> f64) -> Result<Value, RuntimeError> {
    if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) {
        return Ok(Value::string(format!("{}{}", left.display_string(), right.display_string())));
    }
    numeric(left, right, site, int_op, dbl_op)
}

fn divide(left: Value, right: Value, site: &Token) -> Result<Value, RuntimeError> {
    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => {
            if *b == 0 {
                return Err(RuntimeError::new(RuntimeErrorKind::DivisionByZero, "division by zero", site.span, site.file.clone()));
            }
            Ok(Value::Int(a.wrapping_div(*b)))
        }
        (Value::Int(_) | Value::Double(_), Value::Int(_) | Value::Double(_)) => {
            let b = right.to_double().unwrap();
            if b == 0.0 {
                return Err(RuntimeError::new(RuntimeErrorKind::DivisionByZero, "division by zero", site.span, site.file.clone()));
            }
            Ok(Value::Double(left.to_double().unwrap() / b))
        }
        _ => Err(type_error("two numbers", if left.is_numeric() { &right } else { &left }, site)),
    }
}

fn modulo(left: Value, right: Value, site: &Token) -> Result<Value, RuntimeError> {
    match (&left, &right) {
        (Value::Int(a), Value::Int(b)) => {
            if *b == 0 {
                return Err(RuntimeError::new(RuntimeErrorKind::DivisionByZero, "division by zero", site.span, site.file.clone()));
            }
            Ok(Value::Int(a.wrapping_rem(*b)))
        }
        (Value::Int(_) | Value::Double(_), Value::Int(_) | Value::Double(_)) => {
            let b = right.to_double().unwrap();
            if b == 0.0 {
                return Err(RuntimeError::new(RuntimeErrorKind::DivisionByZero, "division by zero", site.span, site.file.clone()));
            }
            Ok(Value::Double(left.to_double().unwrap() % b))
        }
        _ => Err(type_error("two numbers", if left.is_numeric() { &right } else { &left }, site)),
    }
}

fn compare(op: &str, left: Value, right: Value, site: &Token) -> Result<Value, RuntimeError> {
    let ordering = match (&left, &right) {
        (Value::Str(a), Value::Str(b)) => a.as_ref().cmp(b.as_ref()),
        (Value::Int(_) | Value::Double(_), Value::Int(_) | Value::Double(_)) => left
            .to_double()
            .unwrap()
            .partial_cmp(&right.to_double().unwrap())
            .ok_or_else(|| RuntimeError::new(RuntimeErrorKind::TypeError, "cannot compare NaN", site.span, site.file.clone()))?,
        _ => return Err(type_error("two numbers or two strings", if left.is_numeric() { &right } else { &left }, site)),
    };
    let result = match op {
        "<" => ordering.is_lt(),
        "<=" => ordering.is_le(),
        ">" => ordering.is_gt(),
        ">=" => ordering.is_ge(),
        _ => unreachable!(),
    };
    Ok(Value::Bool(result))
}

fn bitwise(op: &str, left: Value, right: Value, site: &Token) -> Result<Value, RuntimeError> {
    let (Value::Int(a), Value::Int(b)) = (&left, &right) else {
        return Err(type_error("two ints", if matches!(left, Value::Int(_)) { &right } else { &left }, site));
    };
    let result = match op {
        "&" => a & b,
        "|" => a | b,
        "^" => a ^ b,
        "<<" => a.wrapping_shl(*b as u32),
        ">>" => a.wrapping_shr(*b as u32),
        // Logical shift: fills with zero bits regardless of sign,
        // unlike `>>`'s sign-preserving arithmetic shift.
        ">>>" => ((*a as u64) >> (*b as u32 & 63)) as i64,
        _ => unreachable!(),
    };
    Ok(Value::Int(result))
}
