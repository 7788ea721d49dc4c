//! Stream registry module
//!
//! Static table of every stream the tap can extract.
//!
//! # Overview
//!
//! Each `StreamDefinition` bundles:
//! - the GraphQL query template (embedded from `queries/`)
//! - the response path holding the connection (`data.transactions`, ...)
//! - the replication key read out of emitted records
//! - a pure record mapper turning a flattened node into a record
//! - the JSON schema of the records (embedded from `schemas/`)
//!
//! Stream ids are resolved through `StreamRegistry`; an unknown id is a
//! configuration error raised before any request is made.

mod fields;
mod mappers;
mod queries;
mod registry;
mod schemas;

pub use fields::{boolean, decimal, text, to_record};
pub use registry::{RecordMapper, StreamDefinition, StreamRegistry, BOOKMARK_KEY};

#[cfg(test)]
mod tests;
