use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::Response,
    Extension, Json,
};
use chrono::NaiveDate;

use api_core::outcome::{self, BulkVerb, ServiceOutcome};
use api_core::pagination::PageQuery;
use api_core::{validate, ValidationError};

use crate::api::rest::dto::{
    CreateInvoiceReq, DateRangeQuery, InvoiceDto, SearchQuery, UpdateInvoiceReq,
};
use crate::api::rest::handlers::{create_response, page_from, required_param};
use crate::api::rest::routes::CommerceServices;
use crate::contract::model::{Invoice, NewInvoice};

const NUMBER_LIMIT: usize = 50;

fn dtos(rows: Vec<Invoice>) -> Vec<InvoiceDto> {
    rows.into_iter().map(InvoiceDto::from).collect()
}

pub async fn list(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Query(q): Query<PageQuery>,
) -> Result<Response, ValidationError> {
    let page = q.page_request()?;
    let res = svc.invoices.list(page, q.sort_spec()).await.map(dtos);
    Ok(outcome::listed("Invoices", ServiceOutcome::from_result(res)))
}

pub async fn get(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(id): Path<i64>,
) -> Result<Response, ValidationError> {
    let id = validate::id(id, "invoice")?;
    let res = svc
        .invoices
        .find_by_id(id)
        .await
        .map(|i| i.map(InvoiceDto::from));
    Ok(outcome::fetched(
        "Invoice",
        ServiceOutcome::from_optional(res),
    ))
}

pub async fn create(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Json(req): Json<CreateInvoiceReq>,
) -> Result<Response, ValidationError> {
    let number = validate::required_str(&req.number, "Number")?;
    validate::max_len(&number, "Number", NUMBER_LIMIT)?;
    let customer_id = validate::id(req.customer_id, "customer")?;
    let total = validate::positive_decimal(req.total, "Total")?;
    let res = svc
        .invoices
        .create(NewInvoice {
            number,
            customer_id,
            issued_on: req.issued_on,
            total,
        })
        .await
        .map(InvoiceDto::from);
    Ok(create_response("Invoice", res))
}

pub async fn update(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateInvoiceReq>,
) -> Result<Response, ValidationError> {
    let id = validate::id(id, "invoice")?;
    if req.id.is_some_and(|body_id| body_id != id) {
        return Err(ValidationError::new("ID in path does not match ID in body"));
    }
    let number = validate::required_str(&req.number, "Number")?;
    validate::max_len(&number, "Number", NUMBER_LIMIT)?;
    let customer_id = validate::id(req.customer_id, "customer")?;
    let total = validate::positive_decimal(req.total, "Total")?;
    let res = svc
        .invoices
        .update(Invoice {
            id,
            number,
            customer_id,
            issued_on: req.issued_on,
            total,
        })
        .await
        .map(|i| i.map(InvoiceDto::from));
    Ok(outcome::updated(
        "Invoice",
        ServiceOutcome::from_optional(res),
    ))
}

pub async fn remove(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(id): Path<i64>,
) -> Result<Response, ValidationError> {
    let id = validate::id(id, "invoice")?;
    Ok(outcome::deleted(
        "Invoice",
        id,
        ServiceOutcome::from_result(svc.invoices.delete(id).await),
    ))
}

pub async fn search(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Query(q): Query<SearchQuery>,
) -> Result<Response, ValidationError> {
    let term = validate::required_str(q.q.as_deref().unwrap_or(""), "Search query")?;
    let page = page_from(q.page, q.size)?;
    let res = svc.invoices.search(&term, page).await.map(dtos);
    Ok(outcome::listed("Invoices", ServiceOutcome::from_result(res)))
}

pub async fn date_range(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Query(q): Query<DateRangeQuery>,
) -> Result<Response, ValidationError> {
    let from = required_param(q.from, "Start date is required")?;
    let to = required_param(q.to, "End date is required")?;
    let range = validate::range(from, to, "date")?;
    let page = page_from(q.page, q.size)?;
    let res = svc.invoices.date_range(range, page).await.map(dtos);
    Ok(outcome::listed("Invoices", ServiceOutcome::from_result(res)))
}

/// DELETE /invoices/before/{date} — bulk delete with a text summary.
pub async fn delete_before(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(date): Path<NaiveDate>,
) -> Response {
    outcome::bulk(
        BulkVerb::Deleted,
        "Invoices",
        ServiceOutcome::from_result(svc.invoices.delete_before(date).await),
    )
}

pub async fn count(Extension(svc): Extension<Arc<CommerceServices>>) -> Response {
    outcome::counted(
        "Invoices",
        ServiceOutcome::from_result(svc.invoices.count().await),
    )
}
