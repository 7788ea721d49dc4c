//! Stream selection
//!
//! Reads a Singer-style catalog and resolves the selected streams against
//! the registry. A stream is selected when its root-breadcrumb metadata
//! (or its schema) carries `"selected": true`.

use crate::error::{Error, Result};
use crate::streams::{StreamDefinition, StreamRegistry};
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Catalog document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Entries in catalog order
    #[serde(default)]
    pub streams: Vec<CatalogEntry>,
}

/// One catalog stream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stream id
    pub tap_stream_id: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<String>,
    /// JSON schema of the stream's records
    #[serde(default)]
    pub schema: JsonObject,
    /// Primary key fields
    #[serde(default)]
    pub key_properties: Vec<String>,
    /// Replication key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_key: Option<String>,
    /// Breadcrumb metadata
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
}

/// Breadcrumb metadata entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// Path into the schema; empty for the stream itself
    #[serde(default)]
    pub breadcrumb: Vec<String>,
    /// Metadata values
    #[serde(default)]
    pub metadata: JsonObject,
}

impl CatalogEntry {
    /// Whether the stream is selected
    pub fn is_selected(&self) -> bool {
        let from_metadata = self
            .metadata
            .iter()
            .find(|m| m.breadcrumb.is_empty())
            .and_then(|m| m.metadata.get("selected"))
            .and_then(JsonValue::as_bool);
        let from_schema = self.schema.get("selected").and_then(JsonValue::as_bool);
        from_metadata.or(from_schema).unwrap_or(false)
    }
}

impl Catalog {
    /// Load a catalog from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read catalog {}: {e}", path.display()))
        })?;
        Self::from_json(&contents)
    }

    /// Parse a catalog from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Catalog listing every registered stream, all selected
    pub fn from_registry(registry: &StreamRegistry) -> Result<Self> {
        let streams = registry
            .iter()
            .map(|def| {
                let mut selected = JsonObject::new();
                selected.insert("selected".to_string(), JsonValue::Bool(true));
                selected.insert(
                    "forced-replication-method".to_string(),
                    JsonValue::String("INCREMENTAL".to_string()),
                );
                Ok(CatalogEntry {
                    tap_stream_id: def.id.to_string(),
                    stream: Some(def.id.to_string()),
                    schema: def.schema()?,
                    key_properties: def.key_properties.iter().map(ToString::to_string).collect(),
                    replication_key: Some(def.replication_key.to_string()),
                    metadata: vec![MetadataEntry {
                        breadcrumb: Vec::new(),
                        metadata: selected,
                    }],
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { streams })
    }

    /// Ids of selected streams in catalog order
    pub fn selected_ids(&self) -> Vec<&str> {
        self.streams
            .iter()
            .filter(|s| s.is_selected())
            .map(|s| s.tap_stream_id.as_str())
            .collect()
    }

    /// Resolve selected streams against the registry.
    ///
    /// An unknown selected id is an error.
    pub fn select(&self, registry: &StreamRegistry) -> Result<Vec<StreamDefinition>> {
        registry.select(&self.selected_ids())
    }
}
