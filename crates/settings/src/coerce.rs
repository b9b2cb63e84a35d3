//! Defensive value coercion.
//!
//! Setting rows come back loosely typed: booleans written by older builds
//! are the strings `"true"` or `"1"`, strings may be JSON `null`. Readers
//! coerce instead of trusting the declared type so a stale row can never
//! wedge a screen.

use serde_json::Value;

/// `true`, `"true"` and `"1"` are true; **everything** else is false
/// (including `null`, `"0"`, `"false"`, numbers and objects).
pub fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s == "true" || s == "1",
        _ => false,
    }
}

/// Strings pass through; `null` becomes `""` (avoids feeding a text input a
/// non-string); numbers and booleans render via `to_string`.
pub fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Integers from numbers or numeric strings; anything else keeps `default`.
pub fn coerce_int(value: &Value, default: i64) -> i64 {
    match value {
        Value::Number(n) => n.as_i64().unwrap_or(default),
        Value::String(s) => s.trim().parse().unwrap_or(default),
        _ => default,
    }
}
