//! Message types
//!
//! Messages follow the Singer wire format:
//! `{"type": "SCHEMA", "stream": ..., "schema": {...}, "key_properties": [...]}`,
//! `{"type": "RECORD", "stream": ..., "record": {...}, "time_extracted": ...}`
//! and `{"type": "STATE", "value": {...}}`.

use crate::types::{JsonObject, JsonValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message emitted during sync
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Record layout, sent before the first record of a stream
    Schema {
        /// Stream id
        stream: String,
        /// JSON schema of the stream's records
        schema: JsonObject,
        /// Primary key fields
        key_properties: Vec<String>,
        /// Fields the bookmark is read from
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        bookmark_properties: Vec<String>,
    },
    /// One normalized record
    Record {
        /// Stream id
        stream: String,
        /// The record
        record: JsonObject,
        /// When the record was extracted
        time_extracted: DateTime<Utc>,
    },
    /// Checkpointed state document
    State {
        /// Full state document
        value: JsonValue,
    },
}

impl Message {
    /// Create a schema message
    pub fn schema<S: Into<String>>(
        stream: impl Into<String>,
        schema: JsonObject,
        key_properties: impl IntoIterator<Item = S>,
        bookmark_properties: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::Schema {
            stream: stream.into(),
            schema,
            key_properties: key_properties.into_iter().map(Into::into).collect(),
            bookmark_properties: bookmark_properties.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a record message stamped with the current time
    pub fn record(stream: impl Into<String>, record: JsonObject) -> Self {
        Self::record_at(stream, record, Utc::now())
    }

    /// Create a record message with an explicit extraction time
    pub fn record_at(
        stream: impl Into<String>,
        record: JsonObject,
        time_extracted: DateTime<Utc>,
    ) -> Self {
        Self::Record {
            stream: stream.into(),
            record,
            time_extracted,
        }
    }

    /// Create a state message
    pub fn state(value: JsonValue) -> Self {
        Self::State { value }
    }

    /// Check if this is a schema message
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }

    /// Check if this is a record message
    pub fn is_record(&self) -> bool {
        matches!(self, Self::Record { .. })
    }

    /// Check if this is a state message
    pub fn is_state(&self) -> bool {
        matches!(self, Self::State { .. })
    }

    /// Stream of a schema or record message
    pub fn stream(&self) -> Option<&str> {
        match self {
            Self::Schema { stream, .. } | Self::Record { stream, .. } => Some(stream),
            Self::State { .. } => None,
        }
    }
}
