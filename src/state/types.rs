//! State types for tracking sync progress
//!
//! These types are serialized to JSON and persisted between runs:
//!
//! ```json
//! {
//!   "bookmarks": {
//!     "shopify_partners_app_credit": { "start_date": "2024-01-02T00:00:00.100000Z" }
//!   },
//!   "currently_syncing": "shopify_partners_app_credit"
//! }
//! ```

use crate::types::JsonObject;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Microsecond marker left by a window lower bound
pub const ZERO_MICROS_SUFFIX: &str = "000000Z";

/// Replacement marker that puts the next lower bound just past the last one
pub const NUDGED_MICROS_SUFFIX: &str = "100000Z";

/// Whole state document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncState {
    /// Per-stream progress, keyed by stream id
    #[serde(default)]
    pub bookmarks: BTreeMap<String, StreamState>,

    /// Stream in progress, if a run was interrupted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currently_syncing: Option<String>,

    /// Unrecognized top-level keys, kept as-is
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl SyncState {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get state for a stream
    pub fn get_stream(&self, stream: &str) -> Option<&StreamState> {
        self.bookmarks.get(stream)
    }

    /// Get mutable state for a stream, creating if needed
    pub fn get_stream_mut(&mut self, stream: &str) -> &mut StreamState {
        self.bookmarks.entry(stream.to_string()).or_default()
    }

    /// Stored bookmark for a stream
    pub fn start_date(&self, stream: &str) -> Option<&str> {
        self.bookmarks.get(stream)?.start_date.as_deref()
    }

    /// Rewrite every stream's all-zero microsecond marker to the nudged one.
    ///
    /// Applies to all streams, not only the one being checkpointed.
    pub fn nudge_start_dates(&mut self) {
        for stream in self.bookmarks.values_mut() {
            if let Some(start) = stream.start_date.as_mut() {
                if start.contains(ZERO_MICROS_SUFFIX) {
                    *start = start.replace(ZERO_MICROS_SUFFIX, NUDGED_MICROS_SUFFIX);
                }
            }
        }
    }
}

/// State for a single stream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamState {
    /// Replication position (ISO-8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,

    /// Unrecognized keys, kept as-is
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl StreamState {
    /// Stream state positioned at a start date
    pub fn at(start_date: impl Into<String>) -> Self {
        Self {
            start_date: Some(start_date.into()),
            extra: JsonObject::new(),
        }
    }
}
