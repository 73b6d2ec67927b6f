//! Request executor with bounded retry.

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

use super::{HttpCallSpec, RetryDecision, RetryPolicy};
use crate::config::Credentials;
use crate::errors::{NetworkError, RequestError, TransportError};
use crate::transport::{PreparedRequest, Transport, TransportFailure};

/// Joins a base URL and a path with exactly one slash between them.
#[must_use]
pub fn resolve_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Executes API calls through a [`Transport`], retrying transient failures.
#[derive(Clone)]
pub struct RequestExecutor {
    transport: Arc<dyn Transport>,
}

impl RequestExecutor {
    /// Creates an executor over a transport.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Resolves the URL and headers of a call.
    #[must_use]
    pub fn prepare(&self, spec: HttpCallSpec, credentials: &Credentials) -> PreparedRequest {
        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        for (name, value) in spec.headers {
            if !name.eq_ignore_ascii_case("authorization") {
                headers.insert(name, value);
            }
        }
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", credentials.api_key),
        );

        PreparedRequest {
            method: spec.method,
            url: resolve_url(credentials.base_url(), &spec.path),
            headers,
            query: spec.query,
            body: spec.body,
        }
    }

    /// Executes a call, retrying retryable statuses with linear backoff.
    ///
    /// Attempts run strictly one after another. A failure that is not
    /// retryable, or that occurs once the budget is spent, is returned
    /// unchanged.
    pub async fn execute(
        &self,
        spec: HttpCallSpec,
        policy: &RetryPolicy,
        credentials: &Credentials,
    ) -> Result<serde_json::Value, RequestError> {
        let request = self.prepare(spec, credentials);
        let mut attempt: u32 = 0;

        loop {
            let error = match self.transport.send(&request).await {
                Ok(body) => {
                    debug!(
                        method = %request.method,
                        url = %request.url,
                        retries = attempt,
                        "Request succeeded"
                    );
                    return Ok(body);
                }
                Err(failure) => into_request_error(&request, failure),
            };

            let status = error.retry_status();
            match policy.decide(attempt, status) {
                RetryDecision::Retry(delay) => {
                    attempt += 1;
                    warn!(
                        method = %request.method,
                        url = %request.url,
                        status,
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %error,
                        "Retrying after error"
                    );
                    tokio::time::sleep(delay).await;
                }
                RetryDecision::GiveUp | RetryDecision::NotRetryable => {
                    debug!(
                        method = %request.method,
                        url = %request.url,
                        status,
                        retries = attempt,
                        error = %error,
                        "Request failed"
                    );
                    return Err(error);
                }
            }
        }
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor").finish_non_exhaustive()
    }
}

fn into_request_error(request: &PreparedRequest, failure: TransportFailure) -> RequestError {
    match failure {
        TransportFailure::Status { status, body } => TransportError::new(status, body).into(),
        TransportFailure::Network(message) => {
            NetworkError::new(request.method.as_str(), &request.url, message).into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{HttpMethod, MockTransport};
    use serde_json::json;

    fn credentials() -> Credentials {
        Credentials::new("test-key").with_base_url("https://api.example.com/hl/v1/")
    }

    #[test]
    fn test_resolve_url_trims_slashes() {
        assert_eq!(
            resolve_url("https://api.example.com/v1/", "/balance"),
            "https://api.example.com/v1/balance"
        );
        assert_eq!(
            resolve_url("https://api.example.com/v1", "balance"),
            "https://api.example.com/v1/balance"
        );
        assert_eq!(
            resolve_url("https://api.example.com/v1//", "//invoice/abc"),
            "https://api.example.com/v1/invoice/abc"
        );
    }

    #[test]
    fn test_prepare_attaches_bearer_and_keeps_it() {
        let executor = RequestExecutor::new(Arc::new(MockTransport::new()));
        let spec = HttpCallSpec::get("/balance")
            .with_header("authorization", "Bearer spoofed")
            .with_header("X-Request-Id", "req-1");

        let request = executor.prepare(spec, &credentials());

        assert_eq!(request.url, "https://api.example.com/hl/v1/balance");
        assert_eq!(request.header("Authorization"), Some("Bearer test-key"));
        assert_eq!(request.header("authorization"), None);
        assert_eq!(request.header("X-Request-Id"), Some("req-1"));
        assert_eq!(request.header("Accept"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_execute_returns_body() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| {
                request.method == HttpMethod::Post
                    && request.url == "https://api.example.com/hl/v1/customer/create"
                    && request.body == Some(json!({"name": "Alice"}))
            })
            .times(1)
            .returning(|_| Ok(json!({"statusCode": 200})));

        let executor = RequestExecutor::new(Arc::new(transport));
        let result = executor
            .execute(
                HttpCallSpec::post("customer/create", json!({"name": "Alice"})),
                &RetryPolicy::none(),
                &credentials(),
            )
            .await
            .unwrap();

        assert_eq!(result, json!({"statusCode": 200}));
    }

    #[tokio::test]
    async fn test_non_retryable_status_fails_once() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(1).returning(|_| {
            Err(TransportFailure::Status {
                status: 400,
                body: json!({"messages": "bad request"}),
            })
        });

        let executor = RequestExecutor::new(Arc::new(transport));
        let err = executor
            .execute(
                HttpCallSpec::get("/balance"),
                &RetryPolicy::new(5, 0),
                &credentials(),
            )
            .await
            .unwrap_err();

        match err {
            RequestError::Transport(err) => {
                assert_eq!(err.status, 400);
                assert_eq!(err.body, json!({"messages": "bad request"}));
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_network_failure_retries_as_500() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(2)
            .returning(|_| Err(TransportFailure::Network("connection reset".to_string())));

        let executor = RequestExecutor::new(Arc::new(transport));
        let err = executor
            .execute(
                HttpCallSpec::get("/balance"),
                &RetryPolicy::new(1, 50),
                &credentials(),
            )
            .await
            .unwrap_err();

        match err {
            RequestError::Network(err) => {
                assert_eq!(err.method, "GET");
                assert_eq!(err.url, "https://api.example.com/hl/v1/balance");
                assert_eq!(err.message, "connection reset");
            }
            other => panic!("expected network error, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_network_failure_not_retried_without_500() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Err(TransportFailure::Network("dns".to_string())));

        let executor = RequestExecutor::new(Arc::new(transport));
        let policy = RetryPolicy::new(3, 10).with_retryable_status_codes([429]);
        let result = executor
            .execute(HttpCallSpec::get("/balance"), &policy, &credentials())
            .await;

        assert!(matches!(result, Err(RequestError::Network(_))));
    }
}
