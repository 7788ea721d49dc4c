//! Response decoding module
//!
//! Turns GraphQL response bodies into pages of flattened nodes.
//!
//! # Overview
//!
//! The decode module provides:
//! - `flatten` - Collapse a nested edge into dotted-path keys
//! - `RawNode` - One flattened edge handed to a record mapper
//! - `extract_page` - Pull edges, `hasNextPage`, and the last cursor out of a response

mod flatten;
mod page;
mod types;

pub use flatten::{flatten, flatten_into};
pub use page::{extract_page, Page};
pub(crate) use page::graphql_error_message;
pub use types::{FieldError, RawNode};
