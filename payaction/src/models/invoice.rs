//! Invoice payloads.

use serde::{Deserialize, Serialize};

/// A single invoice line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    /// Number of units.
    pub quantity: i64,
    /// Price per unit.
    pub rate: f64,
    /// Line description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of an invoice creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSpec {
    /// Customer name.
    pub name: String,
    /// Customer email.
    pub email: String,
    /// Customer mobile number.
    pub mobile: String,
    /// Invoice description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Where the customer lands after paying.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    /// ISO-8601 expiry timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expired_at: Option<String>,
    /// Line items; never empty once validated.
    pub items: Vec<InvoiceItem>,
}
