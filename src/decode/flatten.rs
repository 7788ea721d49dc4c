//! Structural flattening of nested JSON
//!
//! `{"node": {"a": {"b": 1}, "c": [10, 20]}}` becomes
//! `{"node.a.b": 1, "node.c.0": 10, "node.c.1": 20}`.

use crate::types::{JsonObject, JsonValue};

/// Separator between path segments
pub const SEPARATOR: char = '.';

/// Flatten a JSON object into dotted-path keys.
///
/// Objects recurse with `parent.child`, arrays recurse with the element index
/// as the key, and scalars (including null) become leaves. Empty objects and
/// empty arrays contribute no keys.
pub fn flatten(value: &JsonObject) -> JsonObject {
    let mut out = JsonObject::new();
    for (key, child) in value {
        flatten_into(&mut out, key, child);
    }
    out
}

/// Flatten `value` under `prefix` into `out`
pub fn flatten_into(out: &mut JsonObject, prefix: &str, value: &JsonValue) {
    match value {
        JsonValue::Object(map) => {
            for (key, child) in map {
                flatten_into(out, &join(prefix, key), child);
            }
        }
        JsonValue::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(out, &join(prefix, &index.to_string()), child);
            }
        }
        scalar => {
            out.insert(prefix.to_string(), scalar.clone());
        }
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}{SEPARATOR}{key}")
    }
}
