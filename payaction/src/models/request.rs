//! Operation requests and parameter access.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::MalformedInputError;

/// Top-level entity category an operation acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    /// Account balance.
    Balance,
    /// Invoices.
    Invoice,
    /// Discount coupons.
    Coupon,
    /// Customers.
    Customer,
}

impl Resource {
    /// Returns the wire name of the resource.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Balance => "balance",
            Self::Invoice => "invoice",
            Self::Coupon => "coupon",
            Self::Customer => "customer",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = MalformedInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "balance" => Ok(Self::Balance),
            "invoice" => Ok(Self::Invoice),
            "coupon" => Ok(Self::Coupon),
            "customer" => Ok(Self::Customer),
            other => Err(MalformedInputError::new(
                "resource",
                format!("Unknown resource '{other}'"),
            )),
        }
    }
}

/// Read access to already type-coerced parameter values.
///
/// Typed helpers return `Ok(None)` for absent or `null` values and a
/// [`MalformedInputError`] when the value has the wrong JSON type.
pub trait ParameterSource {
    /// Returns the raw value of a parameter.
    fn parameter(&self, name: &str) -> Option<&serde_json::Value>;

    /// Reads a string parameter. Numbers and booleans are rendered as text.
    fn string(&self, name: &str) -> Result<Option<String>, MalformedInputError> {
        match self.parameter(name) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(serde_json::Value::String(s)) => Ok(Some(s.clone())),
            Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
            Some(serde_json::Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(_) => Err(MalformedInputError::new(
                name,
                format!("Parameter '{name}' must be a string"),
            )),
        }
    }

    /// Reads a numeric parameter. Numeric strings are accepted.
    fn number(&self, name: &str) -> Result<Option<f64>, MalformedInputError> {
        let invalid = || MalformedInputError::new(name, format!("Parameter '{name}' must be a number"));

        match self.parameter(name) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(serde_json::Value::Number(n)) => n.as_f64().map(Some).ok_or_else(invalid),
            Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(serde_json::Value::String(s)) => {
                s.trim().parse::<f64>().map(Some).map_err(|_| invalid())
            }
            Some(_) => Err(invalid()),
        }
    }

    /// Reads a parameter and deserializes it into `T`.
    fn decode<T>(&self, name: &str) -> Result<Option<T>, MalformedInputError>
    where
        T: serde::de::DeserializeOwned,
    {
        match self.parameter(name) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone()).map(Some).map_err(|e| {
                MalformedInputError::new(name, format!("Parameter '{name}' is malformed: {e}"))
            }),
        }
    }
}

/// A (resource, operation) selection plus its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRequest {
    /// The selected resource.
    pub resource: Resource,
    /// The operation name, e.g. `getAll`.
    pub operation: String,
    /// Parameter values keyed by field name.
    #[serde(default)]
    pub params: serde_json::Map<String, serde_json::Value>,
}

impl OperationRequest {
    /// Creates a request with no parameters.
    #[must_use]
    pub fn new(resource: Resource, operation: impl Into<String>) -> Self {
        Self {
            resource,
            operation: operation.into(),
            params: serde_json::Map::new(),
        }
    }

    /// Adds a parameter.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.params.insert(name.into(), value);
        self
    }
}

impl ParameterSource for OperationRequest {
    fn parameter(&self, name: &str) -> Option<&serde_json::Value> {
        self.params.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resource_round_trips_through_str() {
        assert_eq!("coupon".parse::<Resource>().unwrap(), Resource::Coupon);
        assert_eq!(Resource::Customer.to_string(), "customer");

        let err = "payout".parse::<Resource>().unwrap_err();
        assert_eq!(err.message, "Unknown resource 'payout'");
    }

    #[test]
    fn test_request_deserializes_from_json() {
        let request: OperationRequest = serde_json::from_value(json!({
            "resource": "invoice",
            "operation": "get",
            "params": {"invoiceId": "inv-1"}
        }))
        .unwrap();

        assert_eq!(request.resource, Resource::Invoice);
        assert_eq!(request.string("invoiceId").unwrap(), Some("inv-1".to_string()));
    }

    #[test]
    fn test_string_coerces_scalars() {
        let request = OperationRequest::new(Resource::Customer, "create")
            .with_param("mobile", json!(628123456789_u64))
            .with_param("name", json!(null))
            .with_param("tags", json!(["a"]));

        assert_eq!(request.string("mobile").unwrap(), Some("628123456789".to_string()));
        assert_eq!(request.string("name").unwrap(), None);
        assert_eq!(request.string("missing").unwrap(), None);
        assert!(request.string("tags").is_err());
    }

    #[test]
    fn test_number_accepts_numeric_strings() {
        let request = OperationRequest::new(Resource::Customer, "getAll")
            .with_param("page", json!(2))
            .with_param("pageSize", json!(" 25 "))
            .with_param("blank", json!(""))
            .with_param("bad", json!("ten"));

        assert_eq!(request.number("page").unwrap(), Some(2.0));
        assert_eq!(request.number("pageSize").unwrap(), Some(25.0));
        assert_eq!(request.number("blank").unwrap(), None);

        let err = request.number("bad").unwrap_err();
        assert_eq!(err.field, "bad");
    }

    #[test]
    fn test_decode_reports_field() {
        #[derive(Debug, Deserialize)]
        struct Shape {
            #[allow(dead_code)]
            code: String,
        }

        let request = OperationRequest::new(Resource::Coupon, "create")
            .with_param("coupon", json!({"code": 5}));

        let err = request.decode::<Shape>("coupon").unwrap_err();
        assert_eq!(err.field, "coupon");
        assert!(err.message.starts_with("Parameter 'coupon' is malformed"));
    }
}
