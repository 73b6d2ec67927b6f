//! Error classification and the continue-on-fail policy.
//!
//! Handler failures either collapse into an `{error}` record, letting the
//! batch proceed, or are classified into a [`NodeError`] that aborts it.

use crate::dispatcher::DispatchResponse;
use crate::errors::{DispatchError, NodeError, RequestError};

/// Classifies a handler failure.
///
/// Only a response from the service (a status and body) makes a
/// [`NodeError::Api`]. Everything else, including calls that never obtained a
/// response, becomes [`NodeError::Operation`].
#[must_use]
pub fn classify(error: DispatchError, item_index: usize) -> NodeError {
    let message = error.to_string();

    match error {
        DispatchError::Request(RequestError::Transport(err)) => NodeError::Api {
            message,
            status: Some(err.status),
            body: Some(err.body),
            item_index,
        },
        DispatchError::Request(RequestError::Network(_))
        | DispatchError::Validation(_)
        | DispatchError::MalformedInput(_)
        | DispatchError::Config(_) => NodeError::operation(message, item_index),
    }
}

/// The record emitted in place of a failed request.
#[must_use]
pub fn error_record(message: &str) -> serde_json::Value {
    serde_json::json!({ "error": message })
}

/// Outcome of applying the continuation policy to one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Continuation {
    /// Emit this JSON and move on.
    Emit(serde_json::Value),
    /// Stop the batch.
    Abort(NodeError),
}

impl Continuation {
    /// Converts the outcome into a `Result`.
    pub fn into_result(self) -> Result<serde_json::Value, NodeError> {
        match self {
            Self::Emit(json) => Ok(json),
            Self::Abort(err) => Err(err),
        }
    }
}

/// Applies the continuation policy to a handler result.
#[must_use]
pub fn resolve(
    result: Result<DispatchResponse, DispatchError>,
    continue_on_fail: bool,
    item_index: usize,
) -> Continuation {
    match result {
        Ok(response) => Continuation::Emit(response.to_json()),
        Err(err) if continue_on_fail => Continuation::Emit(error_record(&err.to_string())),
        Err(err) => Continuation::Abort(classify(err, item_index)),
    }
}
