//! # Payaction
//!
//! A validated, retrying action dispatcher for a payment-platform REST API.
//!
//! Payaction turns `(resource, operation, parameters)` requests into
//! authenticated HTTP calls with:
//!
//! - **Pre-flight validation**: nothing reaches the network until every field passes
//! - **Bounded retry**: linear backoff over an allow-list of transient statuses
//! - **Closed dispatch**: every supported pair is a variant of [`dispatcher::Action`]
//! - **Error classification**: failures surface as API or operation errors, or
//!   as `{error}` records when continue-on-fail is set
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use payaction::prelude::*;
//!
//! let node = ActionNode::from_env()?;
//! let requests = vec![OperationRequest::new(Resource::Balance, "get")];
//! let options = ExecutionOptions::new().with_max_retries(2);
//!
//! let items = node.execute(&requests, &options).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod continuation;
pub mod dispatcher;
pub mod errors;
pub mod executor;
pub mod models;
pub mod node;
pub mod observability;
pub mod testing;
pub mod transport;
pub mod validation;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{
        CredentialStore, Credentials, EnvCredentials, ExecutionOptions, StaticCredentials,
    };
    pub use crate::dispatcher::{Action, DispatchResponse, Dispatcher};
    pub use crate::errors::{
        ConfigError, DispatchError, MalformedInputError, NetworkError, NodeError,
        TransportError, ValidationError,
    };
    pub use crate::executor::{RequestExecutor, RetryPolicy};
    pub use crate::models::{OperationRequest, ParameterSource, Resource};
    pub use crate::node::{ActionNode, OutputItem};
    pub use crate::transport::{HttpMethod, Transport};

    #[cfg(feature = "http")]
    pub use crate::transport::ReqwestTransport;
}
