//! Raw node type
//!
//! A `RawNode` is one flattened API edge. Record mappers read fields out of it
//! by dotted path and report problems as `FieldError`.

use super::flatten::flatten;
use crate::types::{JsonObject, JsonValue};
use thiserror::Error;

/// Field-level failure raised by a record mapper
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    /// The node has no such key
    #[error("missing key '{key}'")]
    Missing { key: String },

    /// The value could not be coerced to the declared type
    #[error("cannot convert '{key}' value {value}: {message}")]
    Conversion {
        key: String,
        value: String,
        message: String,
    },
}

impl FieldError {
    /// Create a missing key error
    pub fn missing(key: impl Into<String>) -> Self {
        Self::Missing { key: key.into() }
    }

    /// Create a conversion error
    pub fn conversion(key: impl Into<String>, value: &JsonValue, message: impl Into<String>) -> Self {
        Self::Conversion {
            key: key.into(),
            value: value.to_string(),
            message: message.into(),
        }
    }
}

/// One flattened edge
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawNode {
    fields: JsonObject,
}

impl RawNode {
    /// Wrap already-flattened fields
    pub fn new(fields: JsonObject) -> Self {
        Self { fields }
    }

    /// Flatten a response edge
    pub fn from_edge(edge: &JsonObject) -> Self {
        Self::new(flatten(edge))
    }

    /// Get a field by dotted path
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.fields.get(key)
    }

    /// Get a field that must be present (it may still be null)
    pub fn require(&self, key: &str) -> Result<&JsonValue, FieldError> {
        self.fields.get(key).ok_or_else(|| FieldError::missing(key))
    }

    /// Whether the node has a key
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of flattened keys
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the node has no keys
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Borrow the flattened fields
    pub fn fields(&self) -> &JsonObject {
        &self.fields
    }
}

impl From<JsonObject> for RawNode {
    fn from(fields: JsonObject) -> Self {
        Self::new(fields)
    }
}

impl std::fmt::Display for RawNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", JsonValue::Object(self.fields.clone()))
    }
}
