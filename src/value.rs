//! The runtime value domain and its coercions.
//!
//! Values are represented as a tagged union, never as a type-erased
//! pointer, so every coercion below is a total function over a closed
//! set of variants. Lists are a mutable reference-typed handle
//! (`Rc<RefCell<Vec<Value>>>`) so that `a[i] = x` and `a + x` mutate the
//! same underlying sequence observable through every alias of `a`.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A cflat runtime value.
#[derive(Debug, Clone)]
pub enum Value {
    Int(i64),
    Double(f64),
    Bool(bool),
    Str(Rc<str>),
    List(Rc<RefCell<Vec<Value>>>),
    Null,
}

impl Value {
    pub fn string(s: impl Into<Rc<str>>) -> Value {
        Value::Str(s.into())
    }

    pub fn list(items: Vec<Value>) -> Value {
        Value::List(Rc::new(RefCell::new(items)))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Null => "null",
        }
    }

    /// The default textual rendering used by `print`/`println` and by
    /// string coercion/concatenation.
    pub fn display_string(&self) -> String {
        match self {
            Value::Int(n) => n.to_string(),
            Value::Double(d) => format_double(*d),
            Value::Bool(b) => b.to_string(),
            Value::Str(s) => s.to_string(),
            Value::Null => "null".to_string(),
            Value::List(items) => {
                let items = items.borrow();
                let rendered: Vec<String> = items.iter().map(Value::display_string).collect();
                format!("[{}]", rendered.join(", "))
            }
        }
    }

    /// `bln` coercion. The integer rule is a deliberately preserved
    /// source quirk: an integer is truthy only when **odd**, not when
    /// nonzero. Do not "fix" this without also updating the design
    /// documentation — downstream programs may depend on it.
    pub fn to_bool(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(n) => n.rem_euclid(2) == 1,
            Value::Double(d) => *d > 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Null => false,
            Value::List(items) => !items.borrow().is_empty(),
        }
    }

    /// `int` coercion.
    pub fn to_int(&self) -> Result<i64, String> {
        match self {
            Value::Bool(b) => Ok(if *b { 1 } else { 0 }),
            Value::Int(n) => Ok(*n),
            Value::Double(d) => Ok(*d as i64),
            Value::Str(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("cannot coerce \"{}\" to int", s)),
            Value::Null => Err("cannot coerce null to int".to_string()),
            Value::List(_) => Err("cannot coerce a list to int".to_string()),
        }
    }

    /// `dbl` coercion.
    pub fn to_double(&self) -> Result<f64, String> {
        match self {
            Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::Int(n) => Ok(*n as f64),
            Value::Double(d) => Ok(*d),
            Value::Str(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("cannot coerce \"{}\" to double", s)),
            Value::Null => Err("cannot coerce null to double".to_string()),
            Value::List(_) => Err("cannot coerce a list to double".to_string()),
        }
    }

    /// `str` coercion. Always succeeds; this is just `display_string`
    /// exposed as the named coercion.
    pub fn to_cflat_string(&self) -> Rc<str> {
        Rc::from(self.display_string())
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Double(_))
    }
}

/// Renders a double the way the dialect's `str` coercion does: integral
/// doubles print with a trailing `.0` so `1.0` round-trips distinctly
/// from `1`.
fn format_double(d: f64) -> String {
    if d.fract() == 0.0 && d.is_finite() {
        format!("{:.1}", d)
    } else {
        d.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_string())
    }
}

impl PartialEq for Value {
    /// Structural equality for scalars; reference identity for lists,
    /// matching the dialect's equality rule.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::Int(a), Value::Double(b)) | (Value::Double(b), Value::Int(a)) => {
                *a as f64 == *b
            }
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Null, Value::Null) => true,
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odd_int_is_truthy() {
        assert!(Value::Int(3).to_bool());
        assert!(!Value::Int(4).to_bool());
        assert!(!Value::Int(0).to_bool());
        assert!(Value::Int(-1).to_bool());
    }

    #[test]
    fn test_string_truthiness() {
        assert!(!Value::string("").to_bool());
        assert!(Value::string("x").to_bool());
    }

    #[test]
    fn test_int_to_string_round_trip() {
        let v = Value::Int(42);
        assert_eq!(v.to_cflat_string().as_ref(), "42");
    }

    #[test]
    fn test_double_display_keeps_trailing_zero() {
        assert_eq!(Value::Double(3.0).display_string(), "3.0");
        assert_eq!(Value::Double(3.5).display_string(), "3.5");
    }

    #[test]
    fn test_list_equality_is_reference_identity() {
        let a = Value::list(vec![Value::Int(1)]);
        let b = Value::list(vec![Value::Int(1)]);
        let c = a.clone();
        assert_ne!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_numeric_int_double_equal_by_value() {
        assert_eq!(Value::Int(2), Value::Double(2.0));
    }

    #[test]
    fn test_str_to_int_coercion() {
        assert_eq!(Value::string("42").to_int().unwrap(), 42);
        assert!(Value::string("nope").to_int().is_err());
    }
}
