//! # Shopify Partners tap
//!
//! Incremental extractor for the Shopify Partners GraphQL API. Each stream
//! is read one calendar day at a time, paginated within the day, mapped to
//! flat records, and checkpointed after every record carrying a replication
//! value, so a later run resumes where the last one stopped.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use partners_tap::{
//!     config::Config, engine::SyncEngine, http::HttpClient, output::JsonLinesSink,
//!     pagination::ApiSource, state::StateStore, streams::StreamRegistry,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> partners_tap::Result<()> {
//!     let config = Config::from_file("config.json")?;
//!     let streams: Vec<_> = StreamRegistry::builtin().iter().copied().collect();
//!
//!     let source = ApiSource::new(Arc::new(HttpClient::new()?), config.endpoint()?)
//!         .with_throttle(config.throttle())
//!         .with_vars(config.template_vars());
//!
//!     let mut engine = SyncEngine::new(
//!         source,
//!         StateStore::from_file("state.json")?,
//!         JsonLinesSink::stdout(),
//!         config.sync_config(),
//!     );
//!     engine.sync_all(&streams).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          SyncEngine                          │
//! │   streams in order → records → bookmark → STATE checkpoint   │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴──────┬────────────┬───────────┐
//! │  Window  │ Paginate  │    Decode    │  Streams   │   State   │
//! ├──────────┼───────────┼──────────────┼────────────┼───────────┤
//! │ Day      │ Cursor    │ Flatten      │ Registry   │ Bookmarks │
//! │ bounds   │ Throttle  │ Page/edges   │ Mappers    │ Nudge     │
//! └──────────┴───────────┴──────────────┴────────────┴───────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the tap
pub mod error;

/// Common types and type aliases
pub mod types;

/// Calendar-day windows
pub mod window;

/// Query template interpolation
pub mod template;

/// HTTP transport, endpoint, and request throttle
pub mod http;

/// Response decoding and edge flattening
pub mod decode;

/// Cursor pagination within a window
pub mod pagination;

/// Stream registry and record mappers
pub mod streams;

/// Bookmark state and checkpointing
pub mod state;

/// Protocol messages and sinks
pub mod output;

/// Stream runner and sync engine
pub mod engine;

/// Catalog-based stream selection
pub mod catalog;

/// Tap configuration
pub mod config;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
