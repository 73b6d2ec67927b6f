//! Testing utilities.
//!
//! This module provides:
//! - A scripted transport that replays canned responses
//! - Request fixtures for every action
//! - Assertions over output items

mod assertions;
mod fixtures;
mod mocks;

pub use assertions::{
    assert_api_error, assert_error_item, assert_operation_error, assert_output_json,
};
pub use fixtures::{
    balance_get, coupon_create, customer_create, customer_update_email, invoice_create,
    invoice_get, test_credentials,
};
pub use mocks::{RecordedCall, ScriptedTransport};
