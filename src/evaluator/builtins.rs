//! Built-in functions available without an `import`.

use super::error::{RuntimeError, RuntimeErrorKind};
use crate::token::Span;
use crate::value::Value;
use std::io::Write;
use std::rc::Rc;

/// Dispatches `name(args)` to a builtin, or returns `None` if `name`
/// does not name one (the caller then falls back to the user-defined
/// function/void tables).
pub fn call(name: &str, args: &[Value], span: Span, file: &Rc<str>) -> Option<Result<Value, RuntimeError>> {
    let result = match name {
        "print" => print_builtin(args, span, file).map(|()| Value::Null),
        "println" => println_builtin(args, span, file).map(|()| Value::Null),
        "length" => length(args, span, file),
        "yeet" => yeet(args, span, file),
        "isAlphabetic" => single_char(args, span, file, |c| c.is_alphabetic()),
        "isUpperCase" => single_char(args, span, file, |c| c.is_uppercase()),
        "isLowerCase" => single_char(args, span, file, |c| c.is_lowercase()),
        "toUpperCase" => map_string(args, span, file, str::to_uppercase),
        "toLowerCase" => map_string(args, span, file, str::to_lowercase),
        "input" => input(args, span, file),
        "rand" => rand_builtin(args, span, file),
        "clock" => clock(args, span, file),
        _ => return None,
    };
    Some(result)
}

fn expect_arity(args: &[Value], n: usize, name: &str, span: Span, file: &Rc<str>) -> Result<(), RuntimeError> {
    if args.len() == n {
        Ok(())
    } else {
        Err(RuntimeError::new(
            RuntimeErrorKind::ArityMismatch,
            format!("'{}' expects {} argument(s), got {}", name, n, args.len()),
            span,
            file.clone(),
        ))
    }
}

fn print_builtin(args: &[Value], span: Span, file: &Rc<str>) -> Result<(), RuntimeError> {
    expect_arity(args, 1, "print", span, file)?;
    print!("{}", args[0].display_string());
    let _ = std::io::stdout().flush();
    Ok(())
}

/// `println()` prints a bare newline; `println(x)` prints `x` then a
/// newline.
fn println_builtin(args: &[Value], span: Span, file: &Rc<str>) -> Result<(), RuntimeError> {
    match args.len() {
        0 => println!(),
        1 => println!("{}", args[0].display_string()),
        n => {
            return Err(RuntimeError::new(
                RuntimeErrorKind::ArityMismatch,
                format!("'println' expects 0 or 1 arguments, got {}", n),
                span,
                file.clone(),
            ));
        }
    }
    Ok(())
}

/// Length of a string or list; `-1` for any other value rather than a
/// type error, matching this dialect's permissive `length`.
fn length(args: &[Value], span: Span, file: &Rc<str>) -> Result<Value, RuntimeError> {
    expect_arity(args, 1, "length", span, file)?;
    let n = match &args[0] {
        Value::Str(s) => s.chars().count() as i64,
        Value::List(items) => items.borrow().len() as i64,
        _ => -1,
    };
    Ok(Value::Int(n))
}

/// Removes the element/character at index `i`, mutating a list in place
/// (through its shared `Rc<RefCell<_>>`) and returning the removed
/// element, or building a shortened copy of a string and returning it
/// (strings have no aliasable identity to mutate through).
fn yeet(args: &[Value], span: Span, file: &Rc<str>) -> Result<Value, RuntimeError> {
    expect_arity(args, 2, "yeet", span, file)?;
    let i = args[1]
        .to_int()
        .map_err(|e| RuntimeError::new(RuntimeErrorKind::CoercionError, e, span, file.clone()))?;
    match &args[0] {
        Value::List(items) => {
            let mut borrowed = items.borrow_mut();
            let len = borrowed.len() as i64;
            if i < 0 || i >= len {
                return Err(RuntimeError::new(
                    RuntimeErrorKind::IndexOutOfBounds,
                    format!("index {} out of bounds for length {}", i, len),
                    span,
                    file.clone(),
                ));
            }
            Ok(borrowed.remove(i as usize))
        }
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            let len = chars.len() as i64;
            if i < 0 || i >= len {
                return Err(RuntimeError::new(
                    RuntimeErrorKind::IndexOutOfBounds,
                    format!("index {} out of bounds for length {}", i, len),
                    span,
                    file.clone(),
                ));
            }
            let idx = i as usize;
            let mut out = String::new();
            out.extend(chars[..idx].iter());
            out.extend(chars[idx + 1..].iter());
            Ok(Value::string(out))
        }
        other => Err(type_error("a list or string", other, span, file)),
    }
}

fn single_char(args: &[Value], span: Span, file: &Rc<str>, predicate: impl Fn(char) -> bool) -> Result<Value, RuntimeError> {
    expect_arity(args, 1, "isAlphabetic/isUpperCase/isLowerCase", span, file)?;
    match &args[0] {
        Value::Str(s) => Ok(Value::Bool(s.chars().next().is_some_and(predicate))),
        other => Err(type_error("a string", other, span, file)),
    }
}

fn map_string(args: &[Value], span: Span, file: &Rc<str>, transform: impl Fn(&str) -> String) -> Result<Value, RuntimeError> {
    expect_arity(args, 1, "toUpperCase/toLowerCase", span, file)?;
    match &args[0] {
        Value::Str(s) => Ok(Value::string(transform(s))),
        other => Err(type_error("a string", other, span, file)),
    }
}

fn input(args: &[Value], span: Span, file: &Rc<str>) -> Result<Value, RuntimeError> {
    expect_arity(args, 0, "input", span, file)?;
    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .map_err(|e| RuntimeError::new(RuntimeErrorKind::TypeError, format!("failed to read stdin: {}", e), span, file.clone()))?;
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(Value::string(line))
}

fn rand_builtin(args: &[Value], span: Span, file: &Rc<str>) -> Result<Value, RuntimeError> {
    expect_arity(args, 0, "rand", span, file)?;
    Ok(Value::Double(rand::random::<f64>()))
}

fn clock(args: &[Value], span: Span, file: &Rc<str>) -> Result<Value, RuntimeError> {
    expect_arity(args, 0, "clock", span, file)?;
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default();
    Ok(Value::Int(now.as_millis() as i64))
}

fn type_error(expected: &str, got: &Value, span: Span, file: &Rc<str>) -> RuntimeError {
    RuntimeError::new(
        RuntimeErrorKind::TypeError,
        format!("expected {}, got a {}", expected, got.type_name()),
        span,
        file.clone(),
    )
}
