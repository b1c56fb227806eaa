//! Comparison semantics for JSON field values.
//!
//! Equality is numeric-aware: integer `2` and float `2.0` are the same
//! number. Ordering is defined within numbers, within strings, and within
//! booleans; across types there is no ordering, and callers treat that as
//! "does not match" rather than as an error.

use serde_json::Value;
use std::cmp::Ordering;

/// Loose equality: numbers compare by numeric value, everything else by
/// structural equality.
pub(crate) fn loosely_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => x == y,
        },
        _ => a == b,
    }
}

/// Native ordering of two values, when one exists.
pub(crate) fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64()?.partial_cmp(&y.as_f64()?),
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        (Value::Bool(x), Value::Bool(y)) => Some(x.cmp(y)),
        _ => None,
    }
}
