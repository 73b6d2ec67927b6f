//! Invoice handlers.

use serde::Deserialize;

use super::{non_blank, path_with_id, to_body};
use crate::errors::{DispatchError, MalformedInputError};
use crate::executor::HttpCallSpec;
use crate::models::{InvoiceItem, InvoiceSpec, ParameterSource};
use crate::validation::{
    require_email, require_invoice_items, require_mobile, require_non_empty_string,
    require_optional_iso_date,
};

/// Line item as supplied by callers; quantities may arrive as `2.0`.
#[derive(Debug, Deserialize)]
struct RawItem {
    quantity: f64,
    rate: f64,
    #[serde(default)]
    description: Option<String>,
}

fn malformed_items(detail: impl std::fmt::Display) -> MalformedInputError {
    MalformedInputError::new("Items", format!("Items must be a list of line items: {detail}"))
}

/// Reads the `items` parameter: a JSON array, a JSON string encoding one, or
/// an object wrapping the array under `item`.
fn read_items<P: ParameterSource>(params: &P) -> Result<Vec<InvoiceItem>, MalformedInputError> {
    let raw = match params.parameter("items") {
        None | Some(serde_json::Value::Null) => return Ok(Vec::new()),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => return Ok(Vec::new()),
        Some(serde_json::Value::String(s)) => serde_json::from_str(s).map_err(malformed_items)?,
        Some(serde_json::Value::Object(map)) if map.contains_key("item") => map["item"].clone(),
        Some(other) => other.clone(),
    };

    let items: Vec<RawItem> = serde_json::from_value(raw).map_err(malformed_items)?;

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            if item.quantity.fract() != 0.0 {
                return Err(MalformedInputError::new(
                    "Items",
                    format!("Item {}: quantity must be a whole number", index + 1),
                ));
            }
            #[allow(clippy::cast_possible_truncation)]
            let quantity = item.quantity as i64;
            Ok(InvoiceItem {
                quantity,
                rate: item.rate,
                description: non_blank(item.description),
            })
        })
        .collect()
}

/// `POST /invoice/create`
///
/// Validates name, email, mobile, expiry and items, in that order.
pub(super) fn create<P: ParameterSource>(params: &P) -> Result<HttpCallSpec, DispatchError> {
    let name = params.string("name")?;
    require_non_empty_string("Name", name.as_deref())?;

    let email = params.string("email")?;
    require_email("Email", email.as_deref())?;

    let mobile = params.string("mobile")?;
    require_mobile("Mobile", mobile.as_deref())?;

    let expired_at = params.string("expiredAt")?;
    require_optional_iso_date("Expired At", expired_at.as_deref())?;

    let items = read_items(params)?;
    require_invoice_items(&items)?;

    let spec = InvoiceSpec {
        name: name.unwrap_or_default().trim().to_string(),
        email: email.unwrap_or_default().trim().to_string(),
        mobile: mobile.unwrap_or_default().trim().to_string(),
        description: non_blank(params.string("description")?),
        redirect_url: non_blank(params.string("redirectUrl")?),
        expired_at: non_blank(expired_at),
        items,
    };

    Ok(HttpCallSpec::post("/invoice/create", to_body("invoice", &spec)?))
}

/// `GET /invoice/{id}`
pub(super) fn get<P: ParameterSource>(params: &P) -> Result<HttpCallSpec, DispatchError> {
    let id = params.string("invoiceId")?;
    require_non_empty_string("Invoice ID", id.as_deref())?;

    Ok(HttpCallSpec::get(path_with_id(
        "/invoice",
        &id.unwrap_or_default(),
    )))
}

/// `GET /invoice`
pub(super) fn get_all() -> HttpCallSpec {
    HttpCallSpec::get("/invoice")
}
