//! CLI module
//!
//! Command-line interface for running the tap.
//!
//! # Commands
//!
//! - `sync` - Extract selected streams, writing messages to stdout
//! - `discover` - Print a catalog with every stream selected
//! - `streams` - List stream ids (lightweight)

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
