//! The invocation entry point.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{CredentialStore, Credentials, ExecutionOptions};
use crate::continuation::{self, Continuation};
use crate::dispatcher::{CallContext, Dispatcher};
use crate::errors::{DispatchError, NodeError};
use crate::executor::{RequestExecutor, RetryPolicy};
use crate::models::OperationRequest;
use crate::transport::Transport;

/// Provider name used for credential lookup unless overridden.
pub const DEFAULT_PROVIDER: &str = "mayarApi";

/// One output record, paired with the index of the request that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputItem {
    /// Response JSON, or an `{error}` record.
    pub json: serde_json::Value,
    /// Index of the originating request.
    pub paired_item: usize,
}

impl OutputItem {
    /// Creates an output item.
    #[must_use]
    pub const fn new(json: serde_json::Value, paired_item: usize) -> Self {
        Self { json, paired_item }
    }

    /// Whether this item is an `{error}` record.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.json
            .as_object()
            .is_some_and(|map| map.len() == 1 && map.contains_key("error"))
    }
}

/// Runs batches of operation requests against the payment API.
#[derive(Clone)]
pub struct ActionNode {
    dispatcher: Dispatcher,
    credentials: Arc<dyn CredentialStore>,
    provider: String,
}

impl ActionNode {
    /// Creates a node over a transport and a credential store.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            dispatcher: Dispatcher::new(RequestExecutor::new(transport)),
            credentials,
            provider: DEFAULT_PROVIDER.to_string(),
        }
    }

    /// Creates a node that performs real HTTP calls with credentials from
    /// the environment.
    #[cfg(feature = "http")]
    pub fn from_env() -> Result<Self, reqwest::Error> {
        let transport = crate::transport::ReqwestTransport::new()?;
        Ok(Self::new(
            Arc::new(transport),
            Arc::new(crate::config::EnvCredentials::new()),
        ))
    }

    /// Sets the provider name used for credential lookup.
    #[must_use]
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// Executes requests in input order.
    ///
    /// Options and credentials are checked once, before any request runs. A
    /// failure there goes through the continuation policy like any handler
    /// failure: with `continue_on_fail` every request yields an `{error}`
    /// item, otherwise the batch aborts with an operation error. An empty
    /// batch returns no items without looking up credentials.
    pub async fn execute(
        &self,
        requests: &[OperationRequest],
        options: &ExecutionOptions,
    ) -> Result<Vec<OutputItem>, NodeError> {
        if requests.is_empty() {
            return Ok(Vec::new());
        }

        let (policy, credentials) = match self.prepare(options) {
            Ok(prepared) => prepared,
            Err(err) => {
                warn!(provider = %self.provider, error = %err, "Invocation setup failed");
                return Self::fail_all(requests.len(), &err, options.continue_on_fail);
            }
        };

        info!(
            provider = %self.provider,
            requests = requests.len(),
            max_retries = policy.max_retries,
            continue_on_fail = options.continue_on_fail,
            "Executing requests"
        );

        let ctx = CallContext {
            policy: &policy,
            credentials: &credentials,
            debug: options.debug,
        };

        let mut output = Vec::with_capacity(requests.len());
        for (index, request) in requests.iter().enumerate() {
            let result = self.dispatcher.dispatch(request, ctx).await;
            if let Err(ref err) = result {
                warn!(
                    index,
                    resource = %request.resource,
                    operation = %request.operation,
                    error = %err,
                    "Operation failed"
                );
            }

            match continuation::resolve(result, options.continue_on_fail, index) {
                Continuation::Emit(json) => output.push(OutputItem::new(json, index)),
                Continuation::Abort(err) => return Err(err),
            }
        }

        Ok(output)
    }

    fn prepare(
        &self,
        options: &ExecutionOptions,
    ) -> Result<(RetryPolicy, Credentials), DispatchError> {
        let policy = options.retry_policy()?;
        let credentials = self.credentials.credentials(&self.provider)?;
        Ok((policy, credentials))
    }

    /// Applies the continuation policy to a failure shared by every request.
    fn fail_all(
        count: usize,
        err: &DispatchError,
        continue_on_fail: bool,
    ) -> Result<Vec<OutputItem>, NodeError> {
        (0..count)
            .map(|index| {
                continuation::resolve(Err(err.clone()), continue_on_fail, index)
                    .into_result()
                    .map(|json| OutputItem::new(json, index))
            })
            .collect()
    }
}

impl std::fmt::Debug for ActionNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionNode")
            .field("dispatcher", &self.dispatcher)
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Credentials, StaticCredentials};
    use crate::models::Resource;
    use crate::transport::{MockTransport, TransportFailure};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn node(transport: MockTransport) -> ActionNode {
        ActionNode::new(
            Arc::new(transport),
            Arc::new(StaticCredentials::new(Credentials::new("secret"))),
        )
    }

    #[test]
    fn test_output_item_is_error() {
        assert!(OutputItem::new(json!({"error": "x"}), 0).is_error());
        assert!(!OutputItem::new(json!({"error": "x", "data": 1}), 0).is_error());
        assert!(!OutputItem::new(json!([1]), 0).is_error());
    }

    #[tokio::test]
    async fn test_items_are_paired_in_order() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(2)
            .returning(|request| Ok(json!({"url": request.url})));

        let requests = vec![
            OperationRequest::new(Resource::Balance, "get"),
            OperationRequest::new(Resource::Coupon, "getAll"),
        ];
        let output = node(transport)
            .execute(&requests, &ExecutionOptions::default())
            .await
            .unwrap();

        assert_eq!(
            output,
            vec![
                OutputItem::new(json!({"url": "https://api.mayar.id/hl/v1/balance"}), 0),
                OutputItem::new(json!({"url": "https://api.mayar.id/hl/v1/coupon"}), 1),
            ]
        );
    }

    #[tokio::test]
    async fn test_continue_on_fail_keeps_going() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Ok(json!({"statusCode": 200})));

        let requests = vec![
            OperationRequest::new(Resource::Invoice, "get"),
            OperationRequest::new(Resource::Balance, "get"),
        ];
        let options = ExecutionOptions::new().with_continue_on_fail(true);
        let output = node(transport).execute(&requests, &options).await.unwrap();

        assert_eq!(output[0], OutputItem::new(json!({"error": "Invoice ID is required"}), 0));
        assert_eq!(output[1], OutputItem::new(json!({"statusCode": 200}), 1));
    }

    #[tokio::test]
    async fn test_failure_aborts_batch() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(1).returning(|_| {
            Err(TransportFailure::Status {
                status: 404,
                body: json!({"messages": "not found"}),
            })
        });

        let requests = vec![
            OperationRequest::new(Resource::Balance, "get"),
            OperationRequest::new(Resource::Balance, "get"),
        ];
        let err = node(transport)
            .execute(&requests, &ExecutionOptions::default())
            .await
            .unwrap_err();

        assert!(err.is_api());
        assert_eq!(err.item_index(), 0);
    }

    fn no_calls() -> MockTransport {
        let mut transport = MockTransport::new();
        transport.expect_send().times(0);
        transport
    }

    fn balance_requests(count: usize) -> Vec<OperationRequest> {
        vec![OperationRequest::new(Resource::Balance, "get"); count]
    }

    #[tokio::test]
    async fn test_out_of_range_options_abort_without_continue_on_fail() {
        let options = ExecutionOptions::new().with_max_retries(9);
        let err = node(no_calls())
            .execute(&balance_requests(1), &options)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            NodeError::operation("Option 'maxRetries' must be between 0 and 5, got 9", 0)
        );
    }

    #[tokio::test]
    async fn test_out_of_range_options_with_continue_on_fail_yield_items() {
        let options = ExecutionOptions::new()
            .with_max_retries(6)
            .with_continue_on_fail(true);
        let output = node(no_calls())
            .execute(&balance_requests(2), &options)
            .await
            .unwrap();

        let message = "Option 'maxRetries' must be between 0 and 5, got 6";
        assert_eq!(
            output,
            vec![
                OutputItem::new(json!({"error": message}), 0),
                OutputItem::new(json!({"error": message}), 1),
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_credentials_abort_without_continue_on_fail() {
        let node = ActionNode::new(
            Arc::new(no_calls()),
            Arc::new(StaticCredentials::new(Credentials::new(""))),
        );

        let err = node
            .execute(&balance_requests(1), &ExecutionOptions::default())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            NodeError::operation("Invalid credentials: API key is empty", 0)
        );
    }

    #[tokio::test]
    async fn test_invalid_credentials_with_continue_on_fail_yield_items() {
        let node = ActionNode::new(
            Arc::new(no_calls()),
            Arc::new(StaticCredentials::new(Credentials::new(""))),
        );

        let output = node
            .execute(
                &balance_requests(1),
                &ExecutionOptions::new().with_continue_on_fail(true),
            )
            .await
            .unwrap();

        assert_eq!(output.len(), 1);
        assert!(output[0].is_error());
        assert_eq!(output[0].json["error"], "Invalid credentials: API key is empty");
    }

    #[tokio::test]
    async fn test_empty_batch_skips_setup() {
        let node = ActionNode::new(
            Arc::new(no_calls()),
            Arc::new(StaticCredentials::new(Credentials::new(""))),
        );

        let output = node
            .execute(&[], &ExecutionOptions::new().with_max_retries(9))
            .await
            .unwrap();

        assert!(output.is_empty());
    }
}
