//! Lenient readers for loosely-typed upstream JSON.
//!
//! Government and partner feeds send numbers as strings, nulls where arrays
//! belong, and the occasional `NaN`. These helpers turn such values into
//! safe defaults instead of failing.

use serde_json::Value;

/// Reads a finite number from a JSON number or numeric string.
#[must_use]
pub fn number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|v| v.is_finite())
}

/// Like [`number`], but missing or non-numeric values become `0.0`.
#[must_use]
pub fn number_or_zero(value: Option<&Value>) -> f64 {
    value.and_then(number).unwrap_or(0.0)
}

/// Reads a whole number (e.g. a year) from a JSON number or numeric string.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
pub fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Reads a non-empty trimmed string. Numbers are rendered as text so ids like
/// `123` and `"123"` compare equal.
#[must_use]
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_owned())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// First key of `keys` present on `object` with a non-null value.
#[must_use]
pub fn first_field<'a>(object: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| object.get(*k))
        .find(|v| !v.is_null())
}

/// Array items, or an empty slice when `value` is missing or not an array.
#[must_use]
pub fn array(value: Option<&Value>) -> &[Value] {
    value
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}
