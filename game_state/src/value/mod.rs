//! Scalar values stored in the state bag.
//!
//! Scripts never declare types; a value's type is decided at the point a
//! raw token enters the state. The coercion rules here are deliberate and
//! written out in full - they are the contract the instruction language
//! exposes through its loose `==` operand, its truthiness checks and its
//! arithmetic, not an accident of the host language.

use serde::{Deserialize, Serialize};

/// A scalar value held in the state bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Free-form text.
    Str(String),
    /// 64-bit signed integer.
    Int(i64),
    /// Boolean flag.
    Bool(bool),
}

impl Value {
    /// Ingest a raw script token as a typed value.
    ///
    /// Integer-looking tokens become [`Value::Int`], the literals `true`
    /// and `false` become [`Value::Bool`], everything else stays a string.
    /// Every place a token turns into a stored or compared value goes
    /// through this single rule, so a value written by `SET x 1` and one
    /// written by `ROLL` compare identically under every operand.
    pub fn from_token(token: &str) -> Self {
        if let Ok(number) = token.parse::<i64>() {
            return Value::Int(number);
        }
        match token {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => Value::Str(token.to_string()),
        }
    }

    /// Falsy values are `0`, the empty string and `false`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Str(text) => !text.is_empty(),
            Value::Int(number) => *number != 0,
            Value::Bool(flag) => *flag,
        }
    }

    /// Numeric view of the value.
    ///
    /// Integers are themselves, booleans map to 0/1, strings go through a
    /// full-token integer parse. Non-numeric strings have no numeric view.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            Value::Int(number) => Some(*number),
            Value::Bool(flag) => Some(i64::from(*flag)),
            Value::Str(text) => text.parse().ok(),
        }
    }

    /// Loose, type-coercing equality - the `==` operand.
    ///
    /// Same-variant values compare directly. An integer and a string are
    /// loosely equal when the string parses to the same integer; a string
    /// with no numeric view is never loosely equal to an integer. Booleans
    /// coerce to 0/1 first and then compare loosely.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Str(text)) | (Value::Str(text), Value::Int(a)) => {
                text.parse::<i64>().map(|b| *a == b).unwrap_or(false)
            }
            (Value::Bool(flag), other) | (other, Value::Bool(flag)) => {
                Value::Int(i64::from(*flag)).loose_eq(other)
            }
        }
    }

    /// Ordering used by the relational operands.
    ///
    /// Two strings compare lexicographically; any other pairing compares
    /// through the numeric view. A side with no numeric view yields no
    /// ordering, which the relational operands report as false.
    pub fn loose_cmp(&self, other: &Value) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => Some(a.cmp(&b)),
                _ => None,
            },
        }
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Value::Int(number)
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Value::Bool(flag)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Str(text.to_string())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Str(text)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Str(text) => write!(f, "{}", text),
            Value::Int(number) => write!(f, "{}", number),
            Value::Bool(flag) => write!(f, "{}", flag),
        }
    }
}
