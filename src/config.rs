//! Tap configuration
//!
//! Loaded from a JSON file (YAML when the extension is `.yaml`/`.yml`) or
//! inline JSON. Required keys are checked before any request is made.

use crate::engine::SyncConfig;
use crate::error::{Error, Result, ResultExt};
use crate::http::{Endpoint, HttpClientConfig, RequestThrottle};
use crate::streams::StreamDefinition;
use crate::template::{TemplateContext, APP_ID};
use crate::types::{scalar_to_string, JsonValue, OptionStringExt};
use crate::window::parse_start_date;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Default Partner API version
pub const DEFAULT_API_VERSION: &str = "2022-01";

/// Default Partner API host
pub const DEFAULT_BASE_URL: &str = "https://partners.shopify.com";

/// Default delay before each request, in milliseconds
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 2000;

/// Default request timeout, in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Validated configuration
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Partner organization id
    pub organization_id: String,
    /// Partner API access token
    pub access_token: String,
    /// Start date for streams without a bookmark
    pub start_date: String,
    /// App id substituted into app event queries
    pub app_id: Option<String>,
    /// API version path segment
    pub api_version: String,
    /// API host
    pub base_url: String,
    /// Fixed delay before each request
    pub request_delay_ms: u64,
    /// Request timeout
    pub request_timeout_secs: u64,
}

/// Config as read from disk, before validation
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    organization_id: Option<JsonValue>,
    #[serde(default, alias = "shopify_partners_server_token")]
    access_token: Option<String>,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    app_id: Option<JsonValue>,
    #[serde(default)]
    api_version: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
    #[serde(default)]
    request_delay_ms: Option<u64>,
    #[serde(default)]
    request_timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;

        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

        if is_yaml {
            Self::from_yaml(&contents)
        } else {
            Self::from_json(&contents)
        }
    }

    /// Parse config from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(json)?;
        Self::validate(raw)
    }

    /// Parse config from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let raw: RawConfig = serde_yaml::from_str(yaml)?;
        Self::validate(raw)
    }

    fn validate(raw: RawConfig) -> Result<Self> {
        let organization_id = raw
            .organization_id
            .as_ref()
            .and_then(scalar_to_string)
            .none_if_empty()
            .ok_or_else(|| Error::missing_field("organization_id"))?;
        let access_token = raw
            .access_token
            .none_if_empty()
            .ok_or_else(|| Error::missing_field("access_token"))?;
        let start_date = raw
            .start_date
            .none_if_empty()
            .ok_or_else(|| Error::missing_field("start_date"))?;

        parse_start_date(&start_date).map_err(|e| Error::InvalidConfigValue {
            field: "start_date".to_string(),
            message: e.to_string(),
        })?;

        let timeout = raw
            .request_timeout_secs
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if timeout == 0 {
            return Err(Error::InvalidConfigValue {
                field: "request_timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            organization_id,
            access_token,
            start_date,
            app_id: raw.app_id.as_ref().and_then(scalar_to_string).none_if_empty(),
            api_version: raw
                .api_version
                .none_if_empty()
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            base_url: raw
                .base_url
                .none_if_empty()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            request_delay_ms: raw.request_delay_ms.unwrap_or(DEFAULT_REQUEST_DELAY_MS),
            request_timeout_secs: timeout,
        })
    }

    /// GraphQL endpoint for the organization
    pub fn endpoint(&self) -> Result<Endpoint> {
        Endpoint::new(
            &self.base_url,
            &self.organization_id,
            &self.api_version,
            &self.access_token,
        )
    }

    /// Fixed inter-request delay
    pub fn throttle(&self) -> RequestThrottle {
        RequestThrottle::new(Duration::from_millis(self.request_delay_ms))
    }

    /// HTTP client settings
    pub fn http_config(&self) -> HttpClientConfig {
        HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.request_timeout_secs))
            .build()
    }

    /// Static query template variables
    pub fn template_vars(&self) -> TemplateContext {
        let mut vars = TemplateContext::new();
        if let Some(app_id) = &self.app_id {
            vars.set(APP_ID, app_id.clone());
        }
        vars
    }

    /// Sync settings
    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig::new(self.start_date.clone())
    }

    /// Check that every placeholder the selected streams need is configured
    pub fn check_streams(&self, streams: &[StreamDefinition]) -> Result<()> {
        if self.app_id.is_none() {
            if let Some(stream) = streams.iter().find(|s| s.uses_placeholder(APP_ID)) {
                return Err(Error::InvalidConfigValue {
                    field: "app_id".to_string(),
                    message: format!("required by stream {}", stream.id),
                });
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("organization_id", &self.organization_id)
            .field("access_token", &"[REDACTED]")
            .field("start_date", &self.start_date)
            .field("app_id", &self.app_id)
            .field("api_version", &self.api_version)
            .field("base_url", &self.base_url)
            .field("request_delay_ms", &self.request_delay_ms)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
