//! Options recognized at the invocation level.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::errors::ConfigError;
use crate::executor::{default_retryable_status_codes, RetryPolicy};

/// Upper bound for `maxRetries`.
pub const MAX_RETRIES_LIMIT: u32 = 5;
/// Upper bound for `retryDelayMs`.
pub const RETRY_DELAY_LIMIT_MS: u64 = 30_000;

/// Options applied to every request of one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionOptions {
    /// Convert failures into `{error}` records instead of aborting.
    #[serde(default)]
    pub continue_on_fail: bool,
    /// Retries after the first attempt (0-5).
    #[serde(default)]
    pub max_retries: u32,
    /// Base backoff delay in milliseconds (0-30000).
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Attach request metadata to every response.
    #[serde(default)]
    pub debug: bool,
    /// Statuses that trigger a retry.
    #[serde(default = "default_retryable_status_codes")]
    pub retryable_status_codes: HashSet<u16>,
}

const fn default_retry_delay_ms() -> u64 {
    500
}

impl Default for ExecutionOptions {
    fn default() -> Self {
        Self {
            continue_on_fail: false,
            max_retries: 0,
            retry_delay_ms: default_retry_delay_ms(),
            debug: false,
            retryable_status_codes: default_retryable_status_codes(),
        }
    }
}

impl ExecutionOptions {
    /// Creates options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets continue-on-fail.
    #[must_use]
    pub fn with_continue_on_fail(mut self, enabled: bool) -> Self {
        self.continue_on_fail = enabled;
        self
    }

    /// Sets the retry budget.
    #[must_use]
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Sets the base backoff delay.
    #[must_use]
    pub fn with_retry_delay_ms(mut self, delay: u64) -> Self {
        self.retry_delay_ms = delay;
        self
    }

    /// Enables debug metadata.
    #[must_use]
    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug = enabled;
        self
    }

    /// Replaces the retryable status set.
    #[must_use]
    pub fn with_retryable_status_codes(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.retryable_status_codes = codes.into_iter().collect();
        self
    }

    /// Builds the retry policy, rejecting out-of-range values.
    pub fn retry_policy(&self) -> Result<RetryPolicy, ConfigError> {
        if self.max_retries > MAX_RETRIES_LIMIT {
            return Err(ConfigError::OutOfRange {
                name: "maxRetries".to_string(),
                value: u64::from(self.max_retries),
                min: 0,
                max: u64::from(MAX_RETRIES_LIMIT),
            });
        }
        if self.retry_delay_ms > RETRY_DELAY_LIMIT_MS {
            return Err(ConfigError::OutOfRange {
                name: "retryDelayMs".to_string(),
                value: self.retry_delay_ms,
                min: 0,
                max: RETRY_DELAY_LIMIT_MS,
            });
        }

        Ok(RetryPolicy::new(self.max_retries, self.retry_delay_ms)
            .with_retryable_status_codes(self.retryable_status_codes.iter().copied()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let options = ExecutionOptions::default();
        assert!(!options.continue_on_fail);
        assert_eq!(options.max_retries, 0);
        assert_eq!(options.retry_delay_ms, 500);
        assert!(!options.debug);
        assert_eq!(options.retryable_status_codes.len(), 5);
    }

    #[test]
    fn test_deserialize_camel_case_with_defaults() {
        let options: ExecutionOptions =
            serde_json::from_value(json!({"continueOnFail": true, "maxRetries": 3})).unwrap();

        assert!(options.continue_on_fail);
        assert_eq!(options.max_retries, 3);
        assert_eq!(options.retry_delay_ms, 500);
        assert!(options.retryable_status_codes.contains(&429));
    }

    #[test]
    fn test_retry_policy_accepts_bounds() {
        let policy = ExecutionOptions::new()
            .with_max_retries(5)
            .with_retry_delay_ms(30_000)
            .retry_policy()
            .unwrap();

        assert_eq!(policy.max_retries, 5);
        assert_eq!(policy.retry_delay_ms, 30_000);
    }

    #[test]
    fn test_retry_policy_rejects_out_of_range() {
        let err = ExecutionOptions::new().with_max_retries(6).retry_policy().unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { ref name, .. } if name == "maxRetries"));

        let err = ExecutionOptions::new()
            .with_retry_delay_ms(30_001)
            .retry_policy()
            .unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { ref name, .. } if name == "retryDelayMs"));
    }

    #[test]
    fn test_custom_status_codes_flow_into_policy() {
        let policy = ExecutionOptions::new()
            .with_retryable_status_codes([408, 503])
            .retry_policy()
            .unwrap();

        assert!(policy.is_retryable(408));
        assert!(!policy.is_retryable(500));
    }
}
