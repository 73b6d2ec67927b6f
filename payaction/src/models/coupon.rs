//! Coupon payloads.

use serde::{Deserialize, Serialize};

use crate::errors::MalformedInputError;

fn default_discount_type() -> String {
    "monetary".to_string()
}

fn default_eligible_customer_type() -> String {
    "all".to_string()
}

fn default_coupon_type() -> String {
    "reusable".to_string()
}

/// Discount terms of a coupon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountSpec {
    /// `monetary` or `percentage`.
    #[serde(default = "default_discount_type")]
    pub discount_type: String,
    /// Which customers may redeem the coupon.
    #[serde(default = "default_eligible_customer_type")]
    pub eligible_customer_type: String,
    /// Minimum purchase amount for the coupon to apply.
    #[serde(default)]
    pub minimum_purchase: f64,
    /// Discount value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Number of coupons that can be redeemed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_coupons: Option<i64>,
}

impl Default for DiscountSpec {
    fn default() -> Self {
        Self {
            discount_type: default_discount_type(),
            eligible_customer_type: default_eligible_customer_type(),
            minimum_purchase: 0.0,
            value: None,
            total_coupons: None,
        }
    }
}

/// Redemption code of a coupon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponCode {
    /// The code customers enter.
    #[serde(default)]
    pub code: String,
    /// `reusable` or `onetime`.
    #[serde(rename = "type", default = "default_coupon_type")]
    pub kind: String,
}

impl Default for CouponCode {
    fn default() -> Self {
        Self {
            code: String::new(),
            kind: default_coupon_type(),
        }
    }
}

/// Body of a coupon creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponSpec {
    /// Coupon name.
    pub name: String,
    /// ISO-8601 expiry timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expired_at: Option<String>,
    /// Discount terms.
    pub discount: DiscountSpec,
    /// Redemption code.
    pub coupon: CouponCode,
    /// Products the coupon applies to, passed through untouched.
    pub products: Vec<serde_json::Value>,
}

impl CouponSpec {
    /// Parses the raw JSON-encoded `products` field. Blank input means no
    /// products.
    pub fn parse_products(raw: &str) -> Result<Vec<serde_json::Value>, MalformedInputError> {
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(serde_json::Value::Array(products)) => Ok(products),
            Ok(_) => Err(MalformedInputError::new(
                "Products",
                "Products must be a JSON array",
            )),
            Err(e) => Err(MalformedInputError::new(
                "Products",
                format!("Products must be valid JSON: {e}"),
            )),
        }
    }
}
