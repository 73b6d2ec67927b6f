//! Customer handlers.

use serde_json::json;

use crate::errors::{DispatchError, MalformedInputError, ValidationError};
use crate::executor::HttpCallSpec;
use crate::models::ParameterSource;
use crate::validation::{require_email, require_mobile, require_non_empty_string, require_number_range};

const DEFAULT_PAGE: f64 = 1.0;
const DEFAULT_PAGE_SIZE: f64 = 10.0;
const MAX_PAGE_SIZE: f64 = 100.0;

fn whole_number(label: &str, value: f64) -> Result<u64, MalformedInputError> {
    if value.fract() != 0.0 {
        return Err(MalformedInputError::new(
            label,
            format!("{label} must be a whole number"),
        ));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let whole = value as u64;
    Ok(whole)
}

/// `GET /customer?page&pageSize`
pub(super) fn get_all<P: ParameterSource>(params: &P) -> Result<HttpCallSpec, DispatchError> {
    let page = params.number("page")?.unwrap_or(DEFAULT_PAGE);
    require_number_range("Page", page, 1.0, None)?;

    let page_size = params.number("pageSize")?.unwrap_or(DEFAULT_PAGE_SIZE);
    require_number_range("Page Size", page_size, 1.0, Some(MAX_PAGE_SIZE))?;

    Ok(HttpCallSpec::get("/customer")
        .with_query("page", whole_number("Page", page)?)
        .with_query("pageSize", whole_number("Page Size", page_size)?))
}

/// `POST /customer/create`
pub(super) fn create<P: ParameterSource>(params: &P) -> Result<HttpCallSpec, DispatchError> {
    let name = params.string("name")?;
    require_non_empty_string("Name", name.as_deref())?;

    let email = params.string("email")?;
    require_email("Email", email.as_deref())?;

    let mobile = params.string("mobile")?;
    require_mobile("Mobile", mobile.as_deref())?;

    Ok(HttpCallSpec::post(
        "/customer/create",
        json!({
            "name": name.unwrap_or_default().trim(),
            "email": email.unwrap_or_default().trim(),
            "mobile": mobile.unwrap_or_default().trim(),
        }),
    ))
}

/// `POST /customer/update`
///
/// Both addresses must be valid and must differ once trimmed. A change of
/// case alone is a valid update.
pub(super) fn update_email<P: ParameterSource>(params: &P) -> Result<HttpCallSpec, DispatchError> {
    let from_email = params.string("fromEmail")?;
    require_email("From Email", from_email.as_deref())?;

    let to_email = params.string("toEmail")?;
    require_email("To Email", to_email.as_deref())?;

    let from_email = from_email.unwrap_or_default().trim().to_string();
    let to_email = to_email.unwrap_or_default().trim().to_string();

    if from_email == to_email {
        return Err(ValidationError::new(
            "To Email",
            "From Email and To Email must be different",
        )
        .into());
    }

    Ok(HttpCallSpec::post(
        "/customer/update",
        json!({
            "fromEmail": from_email,
            "toEmail": to_email,
        }),
    ))
}
