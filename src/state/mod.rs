//! State management module
//!
//! Handles bookmarks, the `currently_syncing` marker, and checkpointing.
//! State is persisted between sync runs to enable incremental syncs.
//!
//! # Overview
//!
//! The state module provides:
//! - `SyncState` - The state document with per-stream bookmarks
//! - `StateStore` - File-backed persistence and the checkpoint protocol
//! - Bookmark proposal from emitted records

mod manager;
mod types;

pub use manager::StateStore;
pub use types::{StreamState, SyncState, NUDGED_MICROS_SUFFIX, ZERO_MICROS_SUFFIX};
