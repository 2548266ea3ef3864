//! Typed field extraction from parsed JSON lines.
//!
//! Every accessor names the field it failed on, so a bad line reports exactly
//! which value was missing or had the wrong shape.

use super::error::FieldError;
use serde_json::{Map, Value};

pub type JsonObject = Map<String, Value>;

/// Parse one newline-delimited JSON line into an object.
pub fn parse_object(line: &str) -> Result<JsonObject, String> {
    match serde_json::from_str::<Value>(line) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(other) => Err(format!("expected a JSON object, found {}", kind_of(&other))),
        Err(e) => Err(format!("invalid JSON: {}", e)),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn present<'a>(object: &'a JsonObject, field: &'static str) -> Option<&'a Value> {
    object.get(field).filter(|v| !v.is_null())
}

fn mismatch(field: &'static str, expected: &str, found: &Value) -> FieldError {
    FieldError::new(field, format!("expected {}, found {}", expected, kind_of(found)))
}

pub fn required_str(object: &JsonObject, field: &'static str) -> Result<String, FieldError> {
    optional_str(object, field)?.ok_or_else(|| FieldError::new(field, "missing"))
}

pub fn optional_str(object: &JsonObject, field: &'static str) -> Result<Option<String>, FieldError> {
    match present(object, field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(mismatch(field, "a string", other)),
    }
}

pub fn required_f64(object: &JsonObject, field: &'static str) -> Result<f64, FieldError> {
    optional_f64(object, field)?.ok_or_else(|| FieldError::new(field, "missing"))
}

pub fn optional_f64(object: &JsonObject, field: &'static str) -> Result<Option<f64>, FieldError> {
    match present(object, field) {
        None => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| FieldError::new(field, format!("{} is not a finite number", n))),
        Some(other) => Err(mismatch(field, "a number", other)),
    }
}

/// Integer field. Numeric strings ("39") are accepted, as activity logs store
/// some ids that way.
pub fn required_i64(object: &JsonObject, field: &'static str) -> Result<i64, FieldError> {
    match present(object, field) {
        None => Err(FieldError::new(field, "missing")),
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| FieldError::new(field, format!("{} is not an integer", n))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| FieldError::new(field, format!("\"{}\" is not an integer", s))),
        Some(other) => Err(mismatch(field, "an integer", other)),
    }
}

pub fn required_i32(object: &JsonObject, field: &'static str) -> Result<i32, FieldError> {
    let value = required_i64(object, field)?;
    i32::try_from(value)
        .map_err(|_| FieldError::new(field, format!("{} is out of range", value)))
}
