//! The closed table of (resource, operation) pairs.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Resource;

/// Every supported (resource, operation) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// `GET /balance`
    BalanceGet,
    /// `POST /invoice/create`
    InvoiceCreate,
    /// `GET /invoice/{id}`
    InvoiceGet,
    /// `GET /invoice`
    InvoiceGetAll,
    /// `POST /coupon/create`
    CouponCreate,
    /// `GET /coupon/{id}`
    CouponGet,
    /// `GET /coupon`
    CouponGetAll,
    /// `GET /customer?page&pageSize`
    CustomerGetAll,
    /// `POST /customer/create`
    CustomerCreate,
    /// `POST /customer/update`
    CustomerUpdateEmail,
}

impl Action {
    /// All actions, in table order.
    pub const ALL: [Self; 10] = [
        Self::BalanceGet,
        Self::InvoiceCreate,
        Self::InvoiceGet,
        Self::InvoiceGetAll,
        Self::CouponCreate,
        Self::CouponGet,
        Self::CouponGetAll,
        Self::CustomerGetAll,
        Self::CustomerCreate,
        Self::CustomerUpdateEmail,
    ];

    /// Looks up the action for a resource and operation name.
    #[must_use]
    pub fn resolve(resource: Resource, operation: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.resource() == resource && action.operation() == operation)
    }

    /// The resource this action belongs to.
    #[must_use]
    pub const fn resource(&self) -> Resource {
        match self {
            Self::BalanceGet => Resource::Balance,
            Self::InvoiceCreate | Self::InvoiceGet | Self::InvoiceGetAll => Resource::Invoice,
            Self::CouponCreate | Self::CouponGet | Self::CouponGetAll => Resource::Coupon,
            Self::CustomerGetAll | Self::CustomerCreate | Self::CustomerUpdateEmail => {
                Resource::Customer
            }
        }
    }

    /// The operation name as selected by callers.
    #[must_use]
    pub const fn operation(&self) -> &'static str {
        match self {
            Self::BalanceGet | Self::InvoiceGet | Self::CouponGet => "get",
            Self::InvoiceCreate | Self::CouponCreate | Self::CustomerCreate => "create",
            Self::InvoiceGetAll | Self::CouponGetAll | Self::CustomerGetAll => "getAll",
            Self::CustomerUpdateEmail => "updateEmail",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource(), self.operation())
    }
}
