//! `reqwest`-backed transport.

use async_trait::async_trait;
use std::time::Duration;

use super::{HttpMethod, PreparedRequest, Transport, TransportFailure};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Transport that performs real HTTP calls.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a 30 second timeout.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a transport with a custom request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("payaction/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Wraps an existing client.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
    }
}

/// Decodes a response body, keeping non-JSON text as a JSON string.
fn decode_body(text: &str) -> serde_json::Value {
    if text.trim().is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &PreparedRequest) -> Result<serde_json::Value, TransportFailure> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportFailure::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportFailure::Network(e.to_string()))?;
        let body = decode_body(&text);

        if !status.is_success() {
            return Err(TransportFailure::Status {
                status: status.as_u16(),
                body,
            });
        }

        if body.is_null() {
            return Ok(serde_json::json!({}));
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_body() {
        assert_eq!(decode_body(""), serde_json::Value::Null);
        assert_eq!(decode_body(r#"{"statusCode": 200}"#), json!({"statusCode": 200}));
        assert_eq!(decode_body("Bad Gateway"), json!("Bad Gateway"));
    }

    #[test]
    fn test_method_mapping() {
        assert_eq!(to_reqwest_method(HttpMethod::Get), reqwest::Method::GET);
        assert_eq!(to_reqwest_method(HttpMethod::Post), reqwest::Method::POST);
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_failure() {
        let transport = ReqwestTransport::with_timeout(Duration::from_secs(2)).unwrap();
        let request = PreparedRequest {
            method: HttpMethod::Get,
            url: "http://127.0.0.1:9/balance".to_string(),
            headers: Default::default(),
            query: Vec::new(),
            body: None,
        };

        let result = transport.send(&request).await;
        assert!(matches!(result, Err(TransportFailure::Network(_))));
    }
}
