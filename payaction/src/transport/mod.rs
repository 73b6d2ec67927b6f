//! The authenticated transport seam.
//!
//! The executor never talks to the network directly. It hands a fully
//! resolved [`PreparedRequest`] to a [`Transport`] and interprets the
//! [`TransportFailure`] it gets back.

#[cfg(feature = "http")]
mod reqwest_transport;

#[cfg(feature = "http")]
pub use reqwest_transport::ReqwestTransport;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// HTTP methods used by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// GET.
    Get,
    /// POST.
    Post,
}

impl HttpMethod {
    /// Returns the method name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single HTTP request with its URL and headers fully resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute URL without the query string.
    pub url: String,
    /// Request headers.
    pub headers: BTreeMap<String, String>,
    /// Query string pairs.
    pub query: Vec<(String, String)>,
    /// JSON body.
    pub body: Option<serde_json::Value>,
}

impl PreparedRequest {
    /// Returns a header value by exact name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// Why a single transport attempt failed.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportFailure {
    /// The service answered with a non-success status.
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: serde_json::Value,
    },
    /// No status was obtained.
    Network(String),
}

/// Performs one HTTP request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and returns the decoded JSON body of a 2xx response.
    async fn send(&self, request: &PreparedRequest) -> Result<serde_json::Value, TransportFailure>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_names() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(
            serde_json::to_value(HttpMethod::Post).unwrap(),
            serde_json::json!("POST")
        );
    }

    #[test]
    fn test_header_lookup() {
        let request = PreparedRequest {
            method: HttpMethod::Get,
            url: "https://api.example.com/balance".to_string(),
            headers: BTreeMap::from([("Accept".to_string(), "application/json".to_string())]),
            query: Vec::new(),
            body: None,
        };

        assert_eq!(request.header("Accept"), Some("application/json"));
        assert_eq!(request.header("Authorization"), None);
    }
}
