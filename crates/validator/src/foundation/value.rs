//! JSON value helpers shared by the engine and the rule library.

use serde_json::Value;

/// The value every missing property reads as.
pub(crate) static NULL: Value = Value::Null;

/// Returns true if the value is falsy under JavaScript truthiness rules:
/// `null`, `false`, `0`, `NaN` and the empty string.
#[must_use]
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_none_or(|f| f == 0.0 || f.is_nan()),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Returns a short type name for the value, used in error messages.
#[must_use]
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Reads `key` from `object`.
///
/// Objects are looked up by key, arrays by a decimal index. Anything else
/// (including `null`) reads as an empty object, so every lookup yields `null`.
#[must_use]
pub fn property<'a>(object: &'a Value, key: &str) -> &'a Value {
    match object {
        Value::Object(map) => map.get(key).unwrap_or(&NULL),
        Value::Array(items) => array_index(key)
            .and_then(|index| items.get(index))
            .unwrap_or(&NULL),
        _ => &NULL,
    }
}

/// Parses a canonical decimal array index: no sign, no leading zeros.
fn array_index(key: &str) -> Option<usize> {
    let canonical = key == "0"
        || (key.starts_with(|c: char| matches!(c, '1'..='9'))
            && key.bytes().all(|b| b.is_ascii_digit()));
    if canonical { key.parse().ok() } else { None }
}

/// Renders a value for human-readable messages.
///
/// Strings are written raw, objects and arrays as compact JSON, everything
/// else through its JSON display form. Whole floats drop their fraction
/// (`16.0` renders as `16`).
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => n.as_f64().map_or_else(|| n.to_string(), display_float),
        other => other.to_string(),
    }
}

fn display_float(f: f64) -> String {
    if f == 0.0 {
        String::from("0")
    } else if f.fract() == 0.0 && f.abs() < 1e21 {
        format!("{f:.0}")
    } else {
        Value::from(f).to_string()
    }
}
