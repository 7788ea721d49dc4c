//! Output module
//!
//! Protocol messages and where they are written.
//!
//! # Overview
//!
//! This module provides:
//! - `Message` - `RECORD` and `STATE` messages, serialized with a `type` tag
//! - `MessageSink` - Destination for emitted messages
//! - `JsonLinesSink` - One JSON document per line on any writer (stdout in the CLI)
//! - `MemorySink` - Collects messages in memory

mod sink;
mod types;

pub use sink::{JsonLinesSink, MemorySink, MessageSink};
pub use types::Message;

#[cfg(test)]
mod tests;
