//! Field validators that gate every operation.
//!
//! Each validator is a pure check over one labeled value. Handlers call them
//! in field declaration order so the first failing field is the one reported.

use chrono::{DateTime, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;

use crate::errors::ValidationError;
use crate::models::InvoiceItem;

const MIN_ITEM_QUANTITY: i64 = 1;
const MIN_ITEM_RATE: f64 = 0.01;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("email pattern is valid")
    })
}

fn mobile_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\+?[0-9]{8,15}$").expect("mobile pattern is valid"))
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Fails if the value is absent, empty or whitespace-only.
pub fn require_non_empty_string(label: &str, value: Option<&str>) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::new(label, format!("{label} is required")));
    }
    Ok(())
}

/// Fails unless the value looks like `local@domain.tld`.
pub fn require_email(label: &str, value: Option<&str>) -> Result<(), ValidationError> {
    require_non_empty_string(label, value)?;
    let value = value.unwrap_or_default().trim();

    if !email_pattern().is_match(value) {
        return Err(ValidationError::new(
            label,
            format!("{label} must be a valid email address"),
        ));
    }
    Ok(())
}

/// Fails unless the value is 8 to 15 digits with an optional leading `+`.
pub fn require_mobile(label: &str, value: Option<&str>) -> Result<(), ValidationError> {
    require_non_empty_string(label, value)?;
    let value = value.unwrap_or_default().trim();

    if !mobile_pattern().is_match(value) {
        return Err(ValidationError::new(
            label,
            format!("{label} must be a valid mobile number"),
        ));
    }
    Ok(())
}

/// No-op for an empty value; otherwise requires a complete ISO-8601 timestamp.
///
/// Accepts RFC 3339 (`2025-01-31T10:00:00Z`, `2025-01-31T10:00:00.000+07:00`)
/// and naive date-times (`2025-01-31T10:00:00`). A bare date is rejected.
pub fn require_optional_iso_date(label: &str, value: Option<&str>) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Ok(());
    }
    let value = value.unwrap_or_default().trim();

    let parsed = DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").is_ok();

    if !parsed {
        return Err(ValidationError::new(
            label,
            format!("{label} must be a valid ISO 8601 date"),
        ));
    }
    Ok(())
}

/// Fails if `value < min`, or if `max` is given and `value > max`.
pub fn require_number_range(
    label: &str,
    value: f64,
    min: f64,
    max: Option<f64>,
) -> Result<(), ValidationError> {
    if value.is_nan() || value < min {
        return Err(ValidationError::new(
            label,
            format!("{label} must be at least {min}"),
        ));
    }
    if let Some(max) = max {
        if value > max {
            return Err(ValidationError::new(
                label,
                format!("{label} must be at most {max}"),
            ));
        }
    }
    Ok(())
}

/// Fails if the list is empty or any item has quantity < 1 or rate < 0.01.
pub fn require_invoice_items(items: &[InvoiceItem]) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::new(
            "Items",
            "Invoice must have at least one item",
        ));
    }

    for (index, item) in items.iter().enumerate() {
        let position = index + 1;
        if item.quantity < MIN_ITEM_QUANTITY {
            return Err(ValidationError::new(
                "Items",
                format!("Item {position}: quantity must be at least {MIN_ITEM_QUANTITY}"),
            ));
        }
        if item.rate.is_nan() || item.rate < MIN_ITEM_RATE {
            return Err(ValidationError::new(
                "Items",
                format!("Item {position}: rate must be at least {MIN_ITEM_RATE}"),
            ));
        }
    }

    Ok(())
}
