//! Operation dispatch.
//!
//! A request is resolved to an [`Action`], the action's handler validates the
//! parameters and assembles an [`HttpCallSpec`], and only then is the call
//! handed to the [`RequestExecutor`]. Validation failures never reach the
//! network.

mod action;
mod balance;
mod coupon;
mod customer;
mod invoice;
mod response;

pub use action::Action;
pub use response::{DispatchResponse, RequestDebug};

use serde::Serialize;
use tracing::debug;

use crate::config::Credentials;
use crate::errors::{DispatchError, MalformedInputError};
use crate::executor::{HttpCallSpec, RequestExecutor, RetryPolicy};
use crate::models::{OperationRequest, ParameterSource};

/// Per-invocation settings shared by every dispatched call.
#[derive(Debug, Clone, Copy)]
pub struct CallContext<'a> {
    /// Retry policy for the executor.
    pub policy: &'a RetryPolicy,
    /// Bearer credentials.
    pub credentials: &'a Credentials,
    /// Attach request metadata to responses.
    pub debug: bool,
}

/// Validates parameters and assembles the call for an action.
pub fn build_call<P: ParameterSource>(
    action: Action,
    params: &P,
) -> Result<HttpCallSpec, DispatchError> {
    match action {
        Action::BalanceGet => Ok(balance::get()),
        Action::InvoiceCreate => invoice::create(params),
        Action::InvoiceGet => invoice::get(params),
        Action::InvoiceGetAll => Ok(invoice::get_all()),
        Action::CouponCreate => coupon::create(params),
        Action::CouponGet => coupon::get(params),
        Action::CouponGetAll => Ok(coupon::get_all()),
        Action::CustomerGetAll => customer::get_all(params),
        Action::CustomerCreate => customer::create(params),
        Action::CustomerUpdateEmail => customer::update_email(params),
    }
}

/// Routes operation requests to their handlers.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    executor: RequestExecutor,
}

impl Dispatcher {
    /// Creates a dispatcher over an executor.
    #[must_use]
    pub const fn new(executor: RequestExecutor) -> Self {
        Self { executor }
    }

    /// Dispatches one request.
    ///
    /// An unknown (resource, operation) pair yields
    /// [`DispatchResponse::no_operation`] rather than an error.
    pub async fn dispatch(
        &self,
        request: &OperationRequest,
        ctx: CallContext<'_>,
    ) -> Result<DispatchResponse, DispatchError> {
        let Some(action) = Action::resolve(request.resource, &request.operation) else {
            debug!(
                resource = %request.resource,
                operation = %request.operation,
                "No matching operation"
            );
            return Ok(DispatchResponse::no_operation());
        };

        let call = build_call(action, request)?;
        debug!(action = %action, method = %call.method, path = %call.path, "Dispatching operation");

        let debug_info = ctx.debug.then(|| RequestDebug::from_call(&call));
        let data = self.executor.execute(call, ctx.policy, ctx.credentials).await?;

        Ok(DispatchResponse {
            data,
            debug: debug_info,
        })
    }
}

/// Serializes a request body model.
fn to_body<T: Serialize>(field: &str, value: &T) -> Result<serde_json::Value, DispatchError> {
    serde_json::to_value(value)
        .map_err(|e| MalformedInputError::new(field, format!("Could not encode {field}: {e}")).into())
}

/// Trims a string, mapping blank values to `None`.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Builds a path with a percent-encoded trailing identifier.
fn path_with_id(prefix: &str, id: &str) -> String {
    format!("{prefix}/{}", urlencoding::encode(id.trim()))
}
