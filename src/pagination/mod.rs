//! Pagination module
//!
//! Cursor pagination within one date window.
//!
//! # Overview
//!
//! A `PageFetcher` runs a small state machine per window:
//! `Fetching("")` → (`hasNextPage` with a cursor) → `Fetching(cursor)` → ... → `Done`.
//! Responses without `pageInfo` are a single page. An empty page always ends
//! pagination, whatever `hasNextPage` claims.

mod fetcher;
mod types;

pub use fetcher::{ApiSource, PageFetcher};
pub use types::{PageCursor, PageState};
