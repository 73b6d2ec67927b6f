//! Resilient request execution.
//!
//! This module provides:
//! - [`HttpCallSpec`], the per-call request shape built by handlers
//! - [`RetryPolicy`] with linear backoff over a retryable status set
//! - [`RequestExecutor`], which resolves, authorizes and retries calls

mod call;
mod request_executor;
mod retry;

pub use call::HttpCallSpec;
pub use request_executor::{resolve_url, RequestExecutor};
pub use retry::{default_retryable_status_codes, RetryDecision, RetryPolicy};
