//! Coupon handlers.

use super::{non_blank, path_with_id, to_body};
use crate::errors::{DispatchError, MalformedInputError};
use crate::executor::HttpCallSpec;
use crate::models::{CouponCode, CouponSpec, DiscountSpec, ParameterSource};
use crate::validation::{require_non_empty_string, require_number_range, require_optional_iso_date};

const MIN_DISCOUNT_VALUE: f64 = 0.01;
const MIN_TOTAL_COUPONS: f64 = 1.0;

/// Reads `products`: a raw JSON string, or an array passed through as is.
fn read_products<P: ParameterSource>(
    params: &P,
) -> Result<Vec<serde_json::Value>, MalformedInputError> {
    match params.parameter("products") {
        None | Some(serde_json::Value::Null) => Ok(Vec::new()),
        Some(serde_json::Value::Array(products)) => Ok(products.clone()),
        Some(serde_json::Value::String(raw)) => CouponSpec::parse_products(raw),
        Some(_) => Err(MalformedInputError::new(
            "Products",
            "Products must be a JSON array",
        )),
    }
}

/// `POST /coupon/create`
///
/// Validates name, expiry, discount value and total coupons, then parses the
/// products list.
pub(super) fn create<P: ParameterSource>(params: &P) -> Result<HttpCallSpec, DispatchError> {
    let name = params.string("name")?;
    require_non_empty_string("Name", name.as_deref())?;

    let expired_at = params.string("expiredAt")?;
    require_optional_iso_date("Expired At", expired_at.as_deref())?;

    let discount: DiscountSpec = params.decode("discount")?.unwrap_or_default();
    if let Some(value) = discount.value {
        require_number_range("Discount Value", value, MIN_DISCOUNT_VALUE, None)?;
    }
    if let Some(total) = discount.total_coupons {
        #[allow(clippy::cast_precision_loss)]
        let total = total as f64;
        require_number_range("Total Coupons", total, MIN_TOTAL_COUPONS, None)?;
    }

    let coupon: CouponCode = params.decode("coupon")?.unwrap_or_default();
    let products = read_products(params)?;

    let spec = CouponSpec {
        name: name.unwrap_or_default().trim().to_string(),
        expired_at: non_blank(expired_at),
        discount,
        coupon,
        products,
    };

    Ok(HttpCallSpec::post("/coupon/create", to_body("coupon", &spec)?))
}

/// `GET /coupon/{id}`
pub(super) fn get<P: ParameterSource>(params: &P) -> Result<HttpCallSpec, DispatchError> {
    let id = params.string("couponId")?;
    require_non_empty_string("Coupon ID", id.as_deref())?;

    Ok(HttpCallSpec::get(path_with_id("/coupon", &id.unwrap_or_default())))
}

/// `GET /coupon`
pub(super) fn get_all() -> HttpCallSpec {
    HttpCallSpec::get("/coupon")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OperationRequest, Resource};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn valid_request() -> OperationRequest {
        OperationRequest::new(Resource::Coupon, "create")
            .with_param("name", json!("Launch promo"))
            .with_param("expiredAt", json!("2030-06-30T23:59:59+07:00"))
            .with_param(
                "discount",
                json!({
                    "discountType": "percentage",
                    "eligibleCustomerType": "all",
                    "minimumPurchase": 50000,
                    "value": 10,
                    "totalCoupons": 100
                }),
            )
            .with_param("coupon", json!({"code": "LAUNCH10", "type": "reusable"}))
            .with_param("products", json!(r#"[{"id": "prod-1"}]"#))
    }

    #[test]
    fn test_create_builds_body() {
        let call = create(&valid_request()).unwrap();

        assert_eq!(call.path, "/coupon/create");
        assert_eq!(
            call.body,
            Some(json!({
                "name": "Launch promo",
                "expiredAt": "2030-06-30T23:59:59+07:00",
                "discount": {
                    "discountType": "percentage",
                    "eligibleCustomerType": "all",
                    "minimumPurchase": 50000.0,
                    "value": 10.0,
                    "totalCoupons": 100
                },
                "coupon": {"code": "LAUNCH10", "type": "reusable"},
                "products": [{"id": "prod-1"}]
            }))
        );
    }

    #[test]
    fn test_create_malformed_products() {
        let request = valid_request().with_param("products", json!("not-json"));
        let err = create(&request).unwrap_err();

        assert!(matches!(err, DispatchError::MalformedInput(ref e) if e.field == "Products"));
    }

    #[test]
    fn test_create_products_defaults_to_empty() {
        let mut request = valid_request();
        request.params.remove("products");
        let call = create(&request).unwrap();

        assert_eq!(call.body.unwrap()["products"], json!([]));
    }

    #[test]
    fn test_create_discount_bounds() {
        let request = valid_request().with_param("discount", json!({"value": 0}));
        let err = create(&request).unwrap_err();
        assert_eq!(err.to_string(), "Discount Value must be at least 0.01");

        let request = valid_request().with_param("discount", json!({"value": 5, "totalCoupons": 0}));
        let err = create(&request).unwrap_err();
        assert_eq!(err.to_string(), "Total Coupons must be at least 1");
    }

    #[test]
    fn test_create_unset_discount_fields_are_not_validated() {
        let request = valid_request().with_param("discount", json!({}));
        let call = create(&request).unwrap();
        let body = call.body.unwrap();

        assert_eq!(body["discount"]["discountType"], json!("monetary"));
        assert!(body["discount"].get("value").is_none());
    }

    #[test]
    fn test_create_name_checked_before_products() {
        let request = valid_request()
            .with_param("name", json!(""))
            .with_param("products", json!("not-json"));

        let err = create(&request).unwrap_err();
        assert!(matches!(err, DispatchError::Validation(_)));
        assert_eq!(err.to_string(), "Name is required");
    }

    #[test]
    fn test_get_and_get_all() {
        let request = OperationRequest::new(Resource::Coupon, "get")
            .with_param("couponId", json!("cp-9"));
        assert_eq!(get(&request).unwrap().path, "/coupon/cp-9");

        let request = OperationRequest::new(Resource::Coupon, "get");
        assert_eq!(get(&request).unwrap_err().to_string(), "Coupon ID is required");

        assert_eq!(get_all().path, "/coupon");
    }
}
