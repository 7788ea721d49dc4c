//! Error types for the Partners tap
//!
//! Every failure in a sync run is fatal: nothing is retried and nothing is
//! downgraded to a warning. Errors propagate to the top of the run and the
//! process exits non-zero. Checkpoints written before the failure stay valid.

use thiserror::Error;

/// The main error type for the tap
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Unknown stream: {stream}")]
    UnknownStream { stream: String },

    // ============================================================================
    // Date Errors
    // ============================================================================
    #[error("Invalid start date '{input}': {message}")]
    InvalidDate { input: String, message: String },

    // ============================================================================
    // Remote API Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote request failed with HTTP {status}: {body}")]
    RemoteRequest { status: u16, body: String },

    #[error("GraphQL error: {message}")]
    GraphQl { message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Record Errors
    // ============================================================================
    #[error("Stream '{stream}': node is missing key '{key}' (node: {node})")]
    Mapping {
        stream: String,
        key: String,
        node: String,
    },

    #[error("Stream '{stream}': could not convert field '{field}' value {value}: {message}")]
    Conversion {
        stream: String,
        field: String,
        value: String,
        message: String,
    },

    // ============================================================================
    // State Errors
    // ============================================================================
    #[error("State error: {message}")]
    State { message: String },

    // ============================================================================
    // Template Errors
    // ============================================================================
    #[error("Undefined variable in query template: {variable}")]
    UndefinedVariable { variable: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid date error
    pub fn invalid_date(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDate {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Create a remote request error from a non-2xx response
    pub fn remote_request(status: u16, body: impl Into<String>) -> Self {
        Self::RemoteRequest {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an unknown stream error
    pub fn unknown_stream(stream: impl Into<String>) -> Self {
        Self::UnknownStream {
            stream: stream.into(),
        }
    }

    /// Create an undefined variable error
    pub fn undefined_var(variable: impl Into<String>) -> Self {
        Self::UndefinedVariable {
            variable: variable.into(),
        }
    }

    /// Create a state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::State {
            message: message.into(),
        }
    }

    /// HTTP status carried by the error, if it came from the remote API
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RemoteRequest { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for the tap
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
