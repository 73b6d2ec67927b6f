//! Balance handlers.

use crate::executor::HttpCallSpec;

/// `GET /balance`
pub(super) fn get() -> HttpCallSpec {
    HttpCallSpec::get("/balance")
}
