//! Request fixtures.

use serde_json::json;

use crate::config::Credentials;
use crate::models::{OperationRequest, Resource};

/// Credentials pointing at a placeholder host.
#[must_use]
pub fn test_credentials() -> Credentials {
    Credentials::new("test-api-key").with_base_url("https://api.example.com/hl/v1")
}

/// `balance.get`.
#[must_use]
pub fn balance_get() -> OperationRequest {
    OperationRequest::new(Resource::Balance, "get")
}

/// A valid `invoice.create` request with one line item.
#[must_use]
pub fn invoice_create() -> OperationRequest {
    OperationRequest::new(Resource::Invoice, "create")
        .with_param("name", json!("Alice"))
        .with_param("email", json!("alice@example.com"))
        .with_param("mobile", json!("08123456789"))
        .with_param("description", json!("Order #42"))
        .with_param(
            "items",
            json!([{"quantity": 2, "rate": 15000, "description": "T-shirt"}]),
        )
}

/// `invoice.get` for the given id.
#[must_use]
pub fn invoice_get(id: &str) -> OperationRequest {
    OperationRequest::new(Resource::Invoice, "get").with_param("invoiceId", json!(id))
}

/// A valid `coupon.create` request.
#[must_use]
pub fn coupon_create() -> OperationRequest {
    OperationRequest::new(Resource::Coupon, "create")
        .with_param("name", json!("Launch promo"))
        .with_param("discount", json!({"value": 10, "totalCoupons": 100}))
        .with_param("coupon", json!({"code": "LAUNCH10"}))
        .with_param("products", json!("[]"))
}

/// A valid `customer.create` request.
#[must_use]
pub fn customer_create() -> OperationRequest {
    OperationRequest::new(Resource::Customer, "create")
        .with_param("name", json!("Bob"))
        .with_param("email", json!("bob@example.com"))
        .with_param("mobile", json!("+628123456789"))
}

/// `customer.updateEmail` between two addresses.
#[must_use]
pub fn customer_update_email(from: &str, to: &str) -> OperationRequest {
    OperationRequest::new(Resource::Customer, "updateEmail")
        .with_param("fromEmail", json!(from))
        .with_param("toEmail", json!(to))
}
