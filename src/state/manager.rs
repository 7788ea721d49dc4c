//! State store implementation
//!
//! Owns the single state document for a run and persists it with atomic
//! writes after every checkpoint.

use super::types::{StreamState, SyncState};
use crate::error::{Error, Result};
use crate::streams::{StreamDefinition, BOOKMARK_KEY};
use crate::types::{get_path, scalar_to_string, JsonObject, JsonValue, OptionStringExt};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// State store for loading, updating, and persisting bookmarks
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    /// Path to the state file, `None` in memory
    path: Option<PathBuf>,
    /// Current document
    state: SyncState,
}

impl StateStore {
    /// Create a store around an existing document (no file persistence)
    pub fn new(state: SyncState) -> Self {
        Self { path: None, state }
    }

    /// Create an empty in-memory store
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Create a store from a file, loading existing state if present
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| Error::state(format!("Failed to read state file: {e}")))?;
            parse_state(&contents)
                .map_err(|e| Error::state(format!("Failed to parse state file: {e}")))?
        } else {
            SyncState::new()
        };

        Ok(Self {
            path: Some(path),
            state,
        })
    }

    /// Create a store from an inline JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let state = parse_state(json)
            .map_err(|e| Error::state(format!("Failed to parse state JSON: {e}")))?;
        Ok(Self::new(state))
    }

    /// Persist to a file on every checkpoint
    #[must_use]
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// State file path, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Check if using in-memory mode
    pub fn is_in_memory(&self) -> bool {
        self.path.is_none()
    }

    /// Current document
    pub fn state(&self) -> &SyncState {
        &self.state
    }

    /// Current document as JSON
    pub fn to_value(&self) -> Result<JsonValue> {
        serde_json::to_value(&self.state)
            .map_err(|e| Error::state(format!("Failed to serialize state: {e}")))
    }

    /// Progress for a stream, seeded with `default_start` when nothing is stored
    pub fn stream_state(&self, stream: &str, default_start: &str) -> StreamState {
        match self.state.get_stream(stream) {
            Some(stored) if stored.start_date.is_some() => stored.clone(),
            Some(stored) => StreamState {
                start_date: Some(default_start.to_string()),
                extra: stored.extra.clone(),
            },
            None => StreamState::at(default_start),
        }
    }

    /// Mark a stream as in progress
    pub fn set_currently_syncing(&mut self, stream: &str) {
        self.state.currently_syncing = Some(stream.to_string());
    }

    /// Clear the in-progress marker
    pub fn clear_currently_syncing(&mut self) {
        self.state.currently_syncing = None;
    }

    /// Stream marked as in progress
    pub fn currently_syncing(&self) -> Option<&str> {
        self.state.currently_syncing.as_deref()
    }

    /// Bookmark candidate carried by an emitted record.
    ///
    /// Absent, null, or empty replication values yield no candidate.
    pub fn propose_bookmark(stream: &StreamDefinition, record: &JsonObject) -> Option<String> {
        let key = stream.replication_key;
        let (head, rest) = key.split_once('.').unwrap_or((key, ""));
        let value = record.get(head)?;
        let value = if rest.is_empty() {
            value
        } else {
            get_path(value, rest)?
        };
        scalar_to_string(value).none_if_empty()
    }

    /// Checkpoint a bookmark for a stream.
    ///
    /// Clears `currently_syncing`, nudges every stream's start date past its
    /// zero-microsecond boundary, records the bookmark unless it would move
    /// the stream backwards, persists, then clears `currently_syncing` again.
    /// Returns false when the candidate was behind the stored bookmark.
    pub async fn apply_bookmark(&mut self, stream: &str, value: &str) -> Result<bool> {
        self.clear_currently_syncing();
        self.state.nudge_start_dates();

        let entry = self.state.get_stream_mut(stream);
        let behind = entry
            .start_date
            .as_deref()
            .is_some_and(|current| value < current);
        if behind {
            warn!(
                "Ignoring bookmark {stream}.{BOOKMARK_KEY} = {value}: behind {:?}",
                entry.start_date
            );
        } else {
            entry.start_date = Some(value.to_string());
        }

        self.save().await?;
        self.clear_currently_syncing();

        debug!("Checkpoint {stream}.{BOOKMARK_KEY} = {value}");
        Ok(!behind)
    }

    /// Save the current document to file (no-op in memory)
    pub async fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let contents = serde_json::to_string_pretty(&self.state)
            .map_err(|e| Error::state(format!("Failed to serialize state: {e}")))?;

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents)
            .await
            .map_err(|e| Error::state(format!("Failed to write state file: {e}")))?;

        tokio::fs::rename(&temp_path, path)
            .await
            .map_err(|e| Error::state(format!("Failed to rename state file: {e}")))?;

        Ok(())
    }
}

/// Parse a state document; blank input is an empty state
fn parse_state(contents: &str) -> std::result::Result<SyncState, serde_json::Error> {
    if contents.trim().is_empty() {
        return Ok(SyncState::new());
    }
    serde_json::from_str(contents)
}
