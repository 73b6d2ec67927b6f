//! Error types for the payaction dispatcher.
//!
//! Errors fall into two tiers. Pre-flight errors ([`ValidationError`],
//! [`MalformedInputError`], [`ConfigError`]) are raised locally before any
//! request leaves the process. Request errors ([`TransportError`],
//! [`NetworkError`]) originate from the remote call. [`NodeError`] is the
//! classified form handed back to the caller once the continuation policy
//! has run.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// The main error type returned by operation handlers.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// A field failed a validation rule.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// A field could not be parsed into the expected shape.
    #[error("{0}")]
    MalformedInput(#[from] MalformedInputError),

    /// Options or credentials are unusable.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// The remote call failed.
    #[error("{0}")]
    Request(#[from] RequestError),
}

impl DispatchError {
    /// Whether this error carries a response (status and body) from the
    /// remote service.
    #[must_use]
    pub const fn has_transport_metadata(&self) -> bool {
        matches!(self, Self::Request(RequestError::Transport(_)))
    }

    /// The HTTP status attached to the error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Request(RequestError::Transport(err)) => Some(err.status),
            _ => None,
        }
    }
}

/// Error raised when a field fails a validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ValidationError {
    /// The label of the offending field.
    pub field: String,
    /// Human-readable message naming the field and the violated rule.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error raised when raw input cannot be parsed, e.g. a non-JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct MalformedInputError {
    /// The field that could not be parsed.
    pub field: String,
    /// Description of the parse failure.
    pub message: String,
}

impl MalformedInputError {
    /// Creates a new malformed input error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error raised for unusable execution options or credentials.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An option value lies outside its permitted range.
    #[error("Option '{name}' must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// Option name.
        name: String,
        /// Rejected value.
        value: u64,
        /// Lower bound (inclusive).
        min: u64,
        /// Upper bound (inclusive).
        max: u64,
    },

    /// No credentials are available for the provider.
    #[error("No credentials found for '{provider}'")]
    MissingCredentials {
        /// Provider name that was looked up.
        provider: String,
    },

    /// The credentials exist but are unusable.
    #[error("Invalid credentials: {reason}")]
    InvalidCredentials {
        /// Why the credentials were rejected.
        reason: String,
    },
}

/// Failure of a remote call after the retry budget is spent.
#[derive(Debug, Clone, Error)]
pub enum RequestError {
    /// The service answered with a non-success status.
    #[error("{0}")]
    Transport(#[from] TransportError),

    /// No status was obtained at all.
    #[error("{0}")]
    Network(#[from] NetworkError),
}

impl RequestError {
    /// Status used for retry decisions. Calls that never obtained a status
    /// count as 500.
    #[must_use]
    pub const fn retry_status(&self) -> u16 {
        match self {
            Self::Transport(err) => err.status,
            Self::Network(_) => 500,
        }
    }
}

/// The remote service returned a non-success status.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Request failed with status code {status}: {}", summarize_body(.body))]
pub struct TransportError {
    /// HTTP status code.
    pub status: u16,
    /// Response body as returned by the service.
    pub body: serde_json::Value,
}

impl TransportError {
    /// Creates a new transport error.
    #[must_use]
    pub const fn new(status: u16, body: serde_json::Value) -> Self {
        Self { status, body }
    }
}

/// The call could not complete (DNS, connect, timeout before a status).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{method} {url} failed: {message}")]
pub struct NetworkError {
    /// HTTP method of the failed call.
    pub method: String,
    /// Fully resolved URL of the failed call.
    pub url: String,
    /// Underlying failure.
    pub message: String,
}

impl NetworkError {
    /// Creates a new network error.
    #[must_use]
    pub fn new(
        method: impl Into<String>,
        url: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            message: message.into(),
        }
    }
}

/// Pulls a message out of an API error body, falling back to the raw JSON.
fn summarize_body(body: &serde_json::Value) -> String {
    match body {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Object(map) => map
            .get("messages")
            .or_else(|| map.get("message"))
            .and_then(serde_json::Value::as_str)
            .map_or_else(|| body.to_string(), ToString::to_string),
        serde_json::Value::Null => "no response body".to_string(),
        other => other.to_string(),
    }
}

/// A classified error as surfaced to the invoking workflow.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NodeError {
    /// The fault originated from the remote service.
    #[error("{message}")]
    Api {
        /// Error message.
        message: String,
        /// HTTP status, when one was obtained.
        status: Option<u16>,
        /// Response body, when one was obtained.
        body: Option<serde_json::Value>,
        /// Index of the request that failed.
        item_index: usize,
    },

    /// No response was obtained: local validation, malformed input,
    /// configuration, or a call that failed before any status arrived.
    #[error("{message}")]
    Operation {
        /// Error message.
        message: String,
        /// Index of the request that failed.
        item_index: usize,
    },
}

impl NodeError {
    /// Creates an operation error.
    #[must_use]
    pub fn operation(message: impl Into<String>, item_index: usize) -> Self {
        Self::Operation {
            message: message.into(),
            item_index,
        }
    }

    /// Whether the error came from the remote service.
    #[must_use]
    pub const fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// Index of the request that failed.
    #[must_use]
    pub const fn item_index(&self) -> usize {
        match self {
            Self::Api { item_index, .. } | Self::Operation { item_index, .. } => *item_index,
        }
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();

        match self {
            Self::Api {
                status,
                body,
                item_index,
                ..
            } => {
                map.insert("type".to_string(), serde_json::json!("ApiError"));
                if let Some(status) = status {
                    map.insert("status".to_string(), serde_json::json!(status));
                }
                if let Some(body) = body {
                    map.insert("body".to_string(), body.clone());
                }
                map.insert("item_index".to_string(), serde_json::json!(item_index));
            }
            Self::Operation { item_index, .. } => {
                map.insert("type".to_string(), serde_json::json!("OperationError"));
                map.insert("item_index".to_string(), serde_json::json!(item_index));
            }
        }

        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map
    }
}
