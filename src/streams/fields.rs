//! Field coercion helpers for record mappers
//!
//! Every helper requires the key to be present on the node. Null and the
//! empty string both read as `None`.

use crate::decode::{FieldError, RawNode};
use crate::types::{JsonObject, JsonValue};
use rust_decimal::Decimal;
use serde::Serialize;
use std::str::FromStr;

fn is_blank(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Read a text field. Numbers and booleans are rendered as text.
pub fn text(node: &RawNode, key: &str) -> Result<Option<String>, FieldError> {
    let value = node.require(key)?;
    if is_blank(value) {
        return Ok(None);
    }
    match value {
        JsonValue::String(s) => Ok(Some(s.clone())),
        JsonValue::Number(n) => Ok(Some(n.to_string())),
        JsonValue::Bool(b) => Ok(Some(b.to_string())),
        other => Err(FieldError::conversion(key, other, "expected text")),
    }
}

/// Read a decimal amount. The API sends amounts as strings (`"4.99"`).
pub fn decimal(node: &RawNode, key: &str) -> Result<Option<Decimal>, FieldError> {
    let value = node.require(key)?;
    if is_blank(value) {
        return Ok(None);
    }
    let raw = match value {
        JsonValue::String(s) => s.trim().to_string(),
        JsonValue::Number(n) => n.to_string(),
        other => return Err(FieldError::conversion(key, other, "expected a decimal")),
    };
    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .map(Some)
        .map_err(|e| FieldError::conversion(key, value, e.to_string()))
}

/// Read a boolean. `"true"`/`"false"` strings are accepted.
pub fn boolean(node: &RawNode, key: &str) -> Result<Option<bool>, FieldError> {
    let value = node.require(key)?;
    if is_blank(value) {
        return Ok(None);
    }
    match value {
        JsonValue::Bool(b) => Ok(Some(*b)),
        JsonValue::String(s) if s.eq_ignore_ascii_case("true") => Ok(Some(true)),
        JsonValue::String(s) if s.eq_ignore_ascii_case("false") => Ok(Some(false)),
        other => Err(FieldError::conversion(key, other, "expected a boolean")),
    }
}

/// Serialize a typed record into a JSON object
pub fn to_record<T: Serialize>(record: &T) -> Result<JsonObject, FieldError> {
    match serde_json::to_value(record) {
        Ok(JsonValue::Object(map)) => Ok(map),
        Ok(other) => Err(FieldError::conversion(
            "record",
            &other,
            "record did not serialize to an object",
        )),
        Err(e) => Err(FieldError::conversion("record", &JsonValue::Null, e.to_string())),
    }
}
