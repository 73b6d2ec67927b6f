//! Invocation options and credential lookup.

mod credentials;
mod options;

pub use credentials::{
    CredentialStore, Credentials, EnvCredentials, StaticCredentials, API_KEY_ENV, BASE_URL_ENV,
    DEFAULT_BASE_URL,
};
pub use options::ExecutionOptions;
