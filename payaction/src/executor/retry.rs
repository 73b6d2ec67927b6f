//! Retry policy with linear backoff.
//!
//! The delay before retry `k` is `retry_delay_ms * k`. Only statuses in the
//! retryable set are retried; everything else fails on the first attempt.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

/// Statuses retried unless configured otherwise.
#[must_use]
pub fn default_retryable_status_codes() -> HashSet<u16> {
    [429, 500, 502, 503, 504].into_iter().collect()
}

/// Retry configuration shared read-only across all attempts of one call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Base delay in milliseconds.
    pub retry_delay_ms: u64,
    /// Statuses that trigger a retry.
    pub retryable_status_codes: HashSet<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            retry_delay_ms: 500,
            retryable_status_codes: default_retryable_status_codes(),
        }
    }
}

/// Outcome of a retry decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryDecision {
    /// Retry after the specified delay.
    Retry(Duration),
    /// The status is retryable but the budget is spent.
    GiveUp,
    /// The status is not retryable.
    NotRetryable,
}

impl RetryPolicy {
    /// Creates a policy with the default retryable statuses.
    #[must_use]
    pub fn new(max_retries: u32, retry_delay_ms: u64) -> Self {
        Self {
            max_retries,
            retry_delay_ms,
            retryable_status_codes: default_retryable_status_codes(),
        }
    }

    /// A policy that never retries.
    #[must_use]
    pub fn none() -> Self {
        Self::new(0, 0)
    }

    /// Replaces the retryable status set.
    #[must_use]
    pub fn with_retryable_status_codes(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.retryable_status_codes = codes.into_iter().collect();
        self
    }

    /// Whether a status triggers a retry.
    #[must_use]
    pub fn is_retryable(&self, status: u16) -> bool {
        self.retryable_status_codes.contains(&status)
    }

    /// Delay before the given 1-based retry.
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        Duration::from_millis(self.retry_delay_ms.saturating_mul(u64::from(retry)))
    }

    /// Decides what to do after `attempt` retries have already been made and
    /// the latest attempt failed with `status`.
    #[must_use]
    pub fn decide(&self, attempt: u32, status: u16) -> RetryDecision {
        if !self.is_retryable(status) {
            return RetryDecision::NotRetryable;
        }
        if attempt >= self.max_retries {
            return RetryDecision::GiveUp;
        }
        RetryDecision::Retry(self.delay_for_retry(attempt + 1))
    }
}
