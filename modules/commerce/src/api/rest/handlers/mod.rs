//! REST handlers, one module per resource family. Every handler follows
//! the same linear shape: validate inputs, make exactly one service call,
//! map the outcome.

pub mod categories;
pub mod customers;
pub mod invoice_items;
pub mod invoices;
pub mod price_history;
pub mod products;
pub mod regions;
pub mod settlements;

use axum::response::{IntoResponse, Response};
use serde::Serialize;

use api_core::outcome::{self, ServiceOutcome};
use api_core::pagination::PageQuery;
use api_core::{problem, PageRequest, ValidationError};

use crate::contract::error::ServiceError;

/// Create result to response: 201, or 409 for uniqueness conflicts,
/// or 500 for anything else the service reports.
pub(crate) fn create_response<T: Serialize>(
    entity: &str,
    res: Result<T, ServiceError>,
) -> Response {
    match res {
        Err(ServiceError::Conflict { message }) => problem::conflict(message).into_response(),
        other => outcome::created(entity, ServiceOutcome::from_result(other)),
    }
}

/// Validated page window for endpoints that take bare page/size parameters.
pub(crate) fn page_from(
    page: Option<i64>,
    size: Option<i64>,
) -> Result<PageRequest, ValidationError> {
    PageQuery {
        page,
        size,
        sort: None,
        direction: None,
    }
    .page_request()
}

/// Required query parameter with a literal message.
pub(crate) fn required_param<T>(value: Option<T>, message: &str) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::new(message))
}
