//! Assertions over output items and classified errors.

use crate::errors::NodeError;
use crate::node::OutputItem;

/// Asserts that the item is exactly `{error: message}`.
pub fn assert_error_item(item: &OutputItem, message: &str) {
    assert_eq!(
        item.json,
        serde_json::json!({ "error": message }),
        "Expected error record for item {}",
        item.paired_item
    );
}

/// Asserts the JSON of an item.
pub fn assert_output_json(item: &OutputItem, expected: &serde_json::Value) {
    assert_eq!(
        &item.json, expected,
        "Unexpected JSON for item {}",
        item.paired_item
    );
}

/// Asserts that the error came from the remote service with the given status.
pub fn assert_api_error(error: &NodeError, expected_status: Option<u16>) {
    match error {
        NodeError::Api { status, .. } => assert_eq!(
            *status, expected_status,
            "Expected API error with status {expected_status:?}, got {status:?}"
        ),
        NodeError::Operation { message, .. } => {
            panic!("Expected API error, got operation error: {message}")
        }
    }
}

/// Asserts that the error is a local operation error with the given message.
pub fn assert_operation_error(error: &NodeError, expected_message: &str) {
    match error {
        NodeError::Operation { message, .. } => assert_eq!(
            message, expected_message,
            "Unexpected operation error message"
        ),
        NodeError::Api { message, .. } => {
            panic!("Expected operation error, got API error: {message}")
        }
    }
}
