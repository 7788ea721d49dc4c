//! Built-in stream definitions
//!
//! The registry is a fixed table compiled into the binary. Lookups by id
//! replace any name-based dispatch.

use super::{mappers, queries, schemas};
use crate::decode::{FieldError, RawNode};
use crate::error::{Error, Result};
use crate::template;
use crate::types::JsonObject;

/// Pure function turning one flattened node into a record
pub type RecordMapper = fn(&RawNode) -> std::result::Result<JsonObject, FieldError>;

/// Key under which every stream's bookmark is stored in state
pub const BOOKMARK_KEY: &str = "start_date";

/// Static description of one stream
#[derive(Debug, Clone, Copy)]
pub struct StreamDefinition {
    /// Stream id (`shopify_partners_app_credit`, ...)
    pub id: &'static str,
    /// GraphQL query template with `:name:` placeholders
    pub query_template: &'static str,
    /// Record mapper
    pub mapper: RecordMapper,
    /// Record field whose value becomes the bookmark
    pub replication_key: &'static str,
    /// Dotted response path of the connection holding `edges`
    pub root_path: &'static str,
    /// Primary key fields of emitted records
    pub key_properties: &'static [&'static str],
    /// JSON schema of emitted records
    pub record_schema: &'static str,
}

impl StreamDefinition {
    /// Map a node, attaching the stream id and the node to any failure
    pub fn map(&self, node: &RawNode) -> Result<JsonObject> {
        (self.mapper)(node).map_err(|e| match e {
            FieldError::Missing { key } => Error::Mapping {
                stream: self.id.to_string(),
                key,
                node: node.to_string(),
            },
            FieldError::Conversion {
                key,
                value,
                message,
            } => Error::Conversion {
                stream: self.id.to_string(),
                field: key,
                value,
                message,
            },
        })
    }

    /// Parsed record schema
    pub fn schema(&self) -> Result<JsonObject> {
        serde_json::from_str(self.record_schema).map_err(|e| {
            Error::config(format!("Invalid schema for stream {}: {e}", self.id))
        })
    }

    /// Whether the query template uses the given placeholder
    pub fn uses_placeholder(&self, name: &str) -> bool {
        template::placeholders(self.query_template)
            .iter()
            .any(|p| p == name)
    }
}

/// Built-in streams in catalog order
static BUILTIN_STREAMS: [StreamDefinition; 5] = [
    StreamDefinition {
        id: "shopify_partners_app_subscription_sale",
        query_template: queries::APP_SUBSCRIPTION_SALE,
        mapper: mappers::app_subscription_sale,
        replication_key: "createdAt",
        root_path: "data.transactions",
        key_properties: &["id"],
        record_schema: schemas::APP_SUBSCRIPTION_SALE,
    },
    StreamDefinition {
        id: "shopify_partners_app_sale_adjustment",
        query_template: queries::APP_SALE_ADJUSTMENT,
        mapper: mappers::app_sale_adjustment,
        replication_key: "createdAt",
        root_path: "data.transactions",
        key_properties: &["id"],
        record_schema: schemas::APP_SALE_ADJUSTMENT,
    },
    StreamDefinition {
        id: "shopify_partners_app_credit",
        query_template: queries::APP_CREDIT,
        mapper: mappers::app_credit,
        replication_key: "occurredAt",
        root_path: "data.app.events",
        key_properties: &["appCreditId"],
        record_schema: schemas::APP_CREDIT,
    },
    StreamDefinition {
        id: "shopify_partners_app_relationship",
        query_template: queries::APP_RELATIONSHIP,
        mapper: mappers::app_relationship,
        replication_key: "occurredAt",
        root_path: "data.app.events",
        key_properties: &["shopId", "occurredAt", "type"],
        record_schema: schemas::APP_RELATIONSHIP,
    },
    StreamDefinition {
        id: "shopify_partners_app_subscription_charge",
        query_template: queries::APP_SUBSCRIPTION_CHARGE,
        mapper: mappers::app_subscription_charge,
        replication_key: "occurredAt",
        root_path: "data.app.events",
        key_properties: &["id", "occurredAt", "type"],
        record_schema: schemas::APP_SUBSCRIPTION_CHARGE,
    },
];

/// Lookup table from stream id to definition
#[derive(Debug, Clone)]
pub struct StreamRegistry {
    streams: Vec<StreamDefinition>,
}

impl StreamRegistry {
    /// Registry of every built-in stream
    pub fn builtin() -> Self {
        Self::new(BUILTIN_STREAMS.to_vec())
    }

    /// Registry over custom definitions
    pub fn new(streams: Vec<StreamDefinition>) -> Self {
        Self { streams }
    }

    /// Look up a stream by id
    pub fn get(&self, id: &str) -> Result<&StreamDefinition> {
        self.streams
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| Error::unknown_stream(id))
    }

    /// Whether a stream id is registered
    pub fn contains(&self, id: &str) -> bool {
        self.streams.iter().any(|s| s.id == id)
    }

    /// All definitions in registry order
    pub fn iter(&self) -> impl Iterator<Item = &StreamDefinition> {
        self.streams.iter()
    }

    /// All stream ids in registry order
    pub fn ids(&self) -> Vec<&'static str> {
        self.streams.iter().map(|s| s.id).collect()
    }

    /// Resolve a list of ids, keeping the given order.
    ///
    /// Fails on the first unknown id.
    pub fn select<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<StreamDefinition>> {
        ids.iter()
            .map(|id| self.get(id.as_ref()).copied())
            .collect()
    }
}

impl Default for StreamRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
