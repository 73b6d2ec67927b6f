//! Request and payload models.
//!
//! This module provides:
//! - The per-invocation [`OperationRequest`] and its [`Resource`] selector
//! - The [`ParameterSource`] collaborator trait
//! - Invoice and coupon payload shapes

mod coupon;
mod invoice;
mod request;

pub use coupon::{CouponCode, CouponSpec, DiscountSpec};
pub use invoice::{InvoiceItem, InvoiceSpec};
pub use request::{OperationRequest, ParameterSource, Resource};
