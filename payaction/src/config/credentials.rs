//! Credential lookup.

use std::fmt;

use crate::errors::ConfigError;

/// Base URL used when the credentials do not name one.
pub const DEFAULT_BASE_URL: &str = "https://api.mayar.id/hl/v1";
/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "PAYACTION_API_KEY";
/// Environment variable overriding the base URL.
pub const BASE_URL_ENV: &str = "PAYACTION_BASE_URL";

/// A pre-resolved bearer credential.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// API key sent as a bearer token.
    pub api_key: String,
    /// Base URL override.
    pub base_url: Option<String>,
}

impl Credentials {
    /// Creates credentials for the default base URL.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
        }
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// The base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Source of credentials, keyed by provider name.
pub trait CredentialStore: Send + Sync {
    /// Looks up the credentials for a provider.
    fn credentials(&self, provider: &str) -> Result<Credentials, ConfigError>;
}

/// A store that always returns the same credentials.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Wraps fixed credentials.
    #[must_use]
    pub const fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl CredentialStore for StaticCredentials {
    fn credentials(&self, _provider: &str) -> Result<Credentials, ConfigError> {
        if self.credentials.api_key.trim().is_empty() {
            return Err(ConfigError::InvalidCredentials {
                reason: "API key is empty".to_string(),
            });
        }
        Ok(self.credentials.clone())
    }
}

/// A store that reads credentials from environment variables.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    api_key_var: String,
    base_url_var: String,
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::with_vars(API_KEY_ENV, BASE_URL_ENV)
    }
}

impl EnvCredentials {
    /// Reads `PAYACTION_API_KEY` and `PAYACTION_BASE_URL`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads from custom variable names.
    #[must_use]
    pub fn with_vars(api_key_var: impl Into<String>, base_url_var: impl Into<String>) -> Self {
        Self {
            api_key_var: api_key_var.into(),
            base_url_var: base_url_var.into(),
        }
    }
}

impl CredentialStore for EnvCredentials {
    fn credentials(&self, provider: &str) -> Result<Credentials, ConfigError> {
        let api_key = std::env::var(&self.api_key_var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingCredentials {
                provider: provider.to_string(),
            })?;

        let mut credentials = Credentials::new(api_key);
        if let Ok(base_url) = std::env::var(&self.base_url_var) {
            if !base_url.trim().is_empty() {
                credentials = credentials.with_base_url(base_url);
            }
        }
        Ok(credentials)
    }
}
