//! Value coercion engine
//!
//! Checks a raw literal against the scalar kind an attribute declares.
//! An integer attribute truncates a float literal, but `1` is never a
//! float and `"1"` is never an integer.

use marginalia_ast::{ArrayKey, ScalarKind, Value};
use thiserror::Error;

/// A raw scalar literal as written in the comment
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    /// A quoted string or a bare identifier
    String(String),
}

impl Literal {
    pub fn into_value(self) -> Value {
        match self {
            Literal::Null => Value::Null,
            Literal::Bool(b) => Value::Bool(b),
            Literal::Int(i) => Value::Int(i),
            Literal::Float(x) => Value::Float(x),
            Literal::String(s) => Value::String(s),
        }
    }

    /// Normalize a literal used as an array key
    ///
    /// Booleans become 1/0, `null` the empty string, floats are truncated.
    pub fn into_key(self) -> ArrayKey {
        match self {
            Literal::Null => ArrayKey::String(String::new()),
            Literal::Bool(b) => ArrayKey::Int(i64::from(b)),
            Literal::Int(i) => ArrayKey::Int(i),
            Literal::Float(x) => ArrayKey::Int(x.trunc() as i64),
            Literal::String(s) => ArrayKey::String(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("value {value} is not a valid {expected}")]
pub struct ValueError {
    /// The offending literal as written
    pub value: String,
    pub expected: ScalarKind,
}

/// Coerce a raw literal to the declared scalar kind
///
/// `text` is the literal as written in the comment. A STRING attribute
/// given a number or boolean keeps that text verbatim (`007`, `1e3`).
pub fn coerce(literal: Literal, text: &str, expected: ScalarKind) -> Result<Value, ValueError> {
    match (expected, literal) {
        (ScalarKind::Mixed, literal) => Ok(literal.into_value()),
        (ScalarKind::String, Literal::String(s)) => Ok(Value::String(s)),
        (ScalarKind::String, Literal::Bool(_) | Literal::Int(_) | Literal::Float(_)) => {
            Ok(Value::String(text.to_string()))
        }
        (ScalarKind::Integer, Literal::Int(i)) => Ok(Value::Int(i)),
        // Floats truncate toward zero
        (ScalarKind::Integer, Literal::Float(x)) if fits_i64(x) => Ok(Value::Int(x.trunc() as i64)),
        (ScalarKind::Float, Literal::Float(x)) => Ok(Value::Float(x)),
        (ScalarKind::Bool, Literal::Bool(b)) => Ok(Value::Bool(b)),
        (expected, _) => Err(ValueError {
            value: text.to_string(),
            expected,
        }),
    }
}

/// Finite and within `i64` once truncated
fn fits_i64(x: f64) -> bool {
    // 2^63 is exact as f64; i64::MAX is not
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    x.is_finite() && x.trunc() >= -LIMIT && x.trunc() < LIMIT
}
