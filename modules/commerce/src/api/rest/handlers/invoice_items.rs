use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::Response,
    Extension, Json,
};

use api_core::outcome::{self, ServiceOutcome};
use api_core::pagination::PageQuery;
use api_core::{validate, ValidationError};

use crate::api::rest::dto::{
    CreateInvoiceItemReq, IntRangeQuery, InvoiceItemDto, LimitQuery, TopSellerDto,
    UpdateInvoiceItemReq,
};
use crate::api::rest::handlers::{create_response, page_from, required_param};
use crate::api::rest::routes::CommerceServices;
use crate::contract::model::{InvoiceItem, NewInvoiceItem};

const DEFAULT_TOP_LIMIT: i64 = 10;

fn dtos(rows: Vec<InvoiceItem>) -> Vec<InvoiceItemDto> {
    rows.into_iter().map(InvoiceItemDto::from).collect()
}

fn validated_fields(req_quantity: i64, req_price: f64) -> Result<(i64, f64), ValidationError> {
    if req_quantity < 1 {
        return Err(ValidationError::new("Quantity must be greater than 0"));
    }
    let price = validate::positive_decimal(req_price, "Unit price")?;
    Ok((req_quantity, price))
}

pub async fn list(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Query(q): Query<PageQuery>,
) -> Result<Response, ValidationError> {
    let page = q.page_request()?;
    let res = svc.invoice_items.list(page, q.sort_spec()).await.map(dtos);
    Ok(outcome::listed(
        "Invoice items",
        ServiceOutcome::from_result(res),
    ))
}

pub async fn get(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(id): Path<i64>,
) -> Result<Response, ValidationError> {
    let id = validate::id(id, "invoice item")?;
    let res = svc
        .invoice_items
        .find_by_id(id)
        .await
        .map(|i| i.map(InvoiceItemDto::from));
    Ok(outcome::fetched(
        "Invoice item",
        ServiceOutcome::from_optional(res),
    ))
}

pub async fn create(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Json(req): Json<CreateInvoiceItemReq>,
) -> Result<Response, ValidationError> {
    let invoice_id = validate::id(req.invoice_id, "invoice")?;
    let product_id = validate::id(req.product_id, "product")?;
    let (quantity, unit_price) = validated_fields(req.quantity, req.unit_price)?;
    let res = svc
        .invoice_items
        .create(NewInvoiceItem {
            invoice_id,
            product_id,
            quantity,
            unit_price,
        })
        .await
        .map(InvoiceItemDto::from);
    Ok(create_response("Invoice item", res))
}

pub async fn update(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateInvoiceItemReq>,
) -> Result<Response, ValidationError> {
    let id = validate::id(id, "invoice item")?;
    if req.id.is_some_and(|body_id| body_id != id) {
        return Err(ValidationError::new("ID in path does not match ID in body"));
    }
    let invoice_id = validate::id(req.invoice_id, "invoice")?;
    let product_id = validate::id(req.product_id, "product")?;
    let (quantity, unit_price) = validated_fields(req.quantity, req.unit_price)?;
    let res = svc
        .invoice_items
        .update(InvoiceItem {
            id,
            invoice_id,
            product_id,
            quantity,
            unit_price,
        })
        .await
        .map(|i| i.map(InvoiceItemDto::from));
    Ok(outcome::updated(
        "Invoice item",
        ServiceOutcome::from_optional(res),
    ))
}

pub async fn remove(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(id): Path<i64>,
) -> Result<Response, ValidationError> {
    let id = validate::id(id, "invoice item")?;
    Ok(outcome::deleted(
        "Invoice item",
        id,
        ServiceOutcome::from_result(svc.invoice_items.delete(id).await),
    ))
}

pub async fn by_invoice(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(invoice_id): Path<i64>,
) -> Result<Response, ValidationError> {
    let invoice_id = validate::id(invoice_id, "invoice")?;
    let res = svc.invoice_items.by_invoice(invoice_id).await.map(dtos);
    Ok(outcome::listed(
        "Invoice items",
        ServiceOutcome::from_result(res),
    ))
}

/// GET /invoice-items/top-selling?limit= — limit is confined to [1,100].
pub async fn top_selling(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Query(q): Query<LimitQuery>,
) -> Result<Response, ValidationError> {
    let limit = validate::bounded_int(q.limit.unwrap_or(DEFAULT_TOP_LIMIT), 1, 100, "Limit")?;
    let res = svc
        .invoice_items
        .top_selling(limit as u64)
        .await
        .map(|rows| rows.into_iter().map(TopSellerDto::from).collect::<Vec<_>>());
    Ok(outcome::listed(
        "Invoice items",
        ServiceOutcome::from_result(res),
    ))
}

pub async fn quantity_range(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Query(q): Query<IntRangeQuery>,
) -> Result<Response, ValidationError> {
    let min = required_param(q.min, "Minimum quantity is required")?;
    let max = required_param(q.max, "Maximum quantity is required")?;
    let range = validate::range(min, max, "quantity")?;
    let page = page_from(q.page, q.size)?;
    let res = svc.invoice_items.quantity_range(range, page).await.map(dtos);
    Ok(outcome::listed(
        "Invoice items",
        ServiceOutcome::from_result(res),
    ))
}

pub async fn count(Extension(svc): Extension<Arc<CommerceServices>>) -> Response {
    outcome::counted(
        "Invoice items",
        ServiceOutcome::from_result(svc.invoice_items.count().await),
    )
}
