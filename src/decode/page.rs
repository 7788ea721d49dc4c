//! Page extraction
//!
//! Reads one GraphQL connection out of a response body:
//! `{ data: { <root>: { edges: [ { node, cursor? } ], pageInfo?: { hasNextPage } } } }`.

use super::types::RawNode;
use crate::error::{Error, Result};
use crate::types::{get_path, JsonValue};
use tracing::warn;

/// One decoded page of results
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Flattened edges in response order
    pub nodes: Vec<RawNode>,
    /// `pageInfo.hasNextPage`, false when the response has no `pageInfo`
    pub has_next: bool,
    /// Whether the response carried pagination metadata at all
    pub paginated: bool,
    /// Cursor of the last edge, if any
    pub end_cursor: Option<String>,
}

impl Page {
    /// Number of edges on the page
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the page has no edges
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Decode a page from a parsed response body
pub fn extract_page(body: &JsonValue, root_path: &str) -> Result<Page> {
    check_graphql_errors(body)?;

    let root = match get_path(body, root_path) {
        Some(JsonValue::Object(root)) => root,
        Some(_) | None => {
            return Err(Error::decode(format!(
                "response has no object at '{root_path}'"
            )))
        }
    };

    let edges = root
        .get("edges")
        .and_then(JsonValue::as_array)
        .ok_or_else(|| Error::decode(format!("response has no '{root_path}.edges' array")))?;

    let mut nodes = Vec::with_capacity(edges.len());
    let mut end_cursor = None;
    for (index, edge) in edges.iter().enumerate() {
        let edge = edge.as_object().ok_or_else(|| {
            Error::decode(format!("edge {index} at '{root_path}' is not an object"))
        })?;
        end_cursor = edge
            .get("cursor")
            .and_then(JsonValue::as_str)
            .filter(|c| !c.is_empty())
            .map(ToString::to_string);
        nodes.push(RawNode::from_edge(edge));
    }

    let page_info = root.get("pageInfo").filter(|v| !v.is_null());
    let has_next = match page_info.and_then(|info| info.get("hasNextPage")) {
        None | Some(JsonValue::Null) => false,
        Some(JsonValue::Bool(b)) => *b,
        Some(JsonValue::String(s)) if s.eq_ignore_ascii_case("true") => true,
        Some(JsonValue::String(s)) if s.eq_ignore_ascii_case("false") => false,
        Some(other) => {
            return Err(Error::decode(format!(
                "unexpected hasNextPage value: {other}"
            )))
        }
    };

    Ok(Page {
        nodes,
        has_next,
        paginated: page_info.is_some(),
        end_cursor,
    })
}

/// Fail on a GraphQL error document that carries no data.
///
/// Errors next to data are logged and the page is kept.
fn check_graphql_errors(body: &JsonValue) -> Result<()> {
    let Some(message) = graphql_error_message(body) else {
        return Ok(());
    };
    if body.get("data").is_some_and(|d| !d.is_null()) {
        warn!("Partial GraphQL response: {message}");
        return Ok(());
    }
    Err(Error::GraphQl { message })
}

/// Joined `errors[].message` values, `None` when there are no errors
pub(crate) fn graphql_error_message(body: &JsonValue) -> Option<String> {
    let errors = body.get("errors").and_then(JsonValue::as_array)?;
    if errors.is_empty() {
        return None;
    }
    let message = errors
        .iter()
        .map(|e| {
            e.get("message")
                .and_then(JsonValue::as_str)
                .map_or_else(|| e.to_string(), ToString::to_string)
        })
        .collect::<Vec<_>>()
        .join("; ");
    Some(message)
}
