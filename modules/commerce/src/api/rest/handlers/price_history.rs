use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::Response,
    Extension, Json,
};
use chrono::Utc;

use api_core::outcome::{self, ServiceOutcome};
use api_core::pagination::PageQuery;
use api_core::{validate, ValidationError};

use crate::api::rest::dto::{CreatePriceRecordReq, DaysQuery, PriceRecordDto};
use crate::api::rest::handlers::create_response;
use crate::api::rest::routes::CommerceServices;
use crate::contract::model::{NewPriceRecord, PriceRecord};

const DEFAULT_RECENT_DAYS: i64 = 30;

fn dtos(rows: Vec<PriceRecord>) -> Vec<PriceRecordDto> {
    rows.into_iter().map(PriceRecordDto::from).collect()
}

pub async fn list(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Query(q): Query<PageQuery>,
) -> Result<Response, ValidationError> {
    let page = q.page_request()?;
    let res = svc.price_history.list(page, q.sort_spec()).await.map(dtos);
    Ok(outcome::listed(
        "Price records",
        ServiceOutcome::from_result(res),
    ))
}

pub async fn get(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(id): Path<i64>,
) -> Result<Response, ValidationError> {
    let id = validate::id(id, "price record")?;
    let res = svc
        .price_history
        .find_by_id(id)
        .await
        .map(|r| r.map(PriceRecordDto::from));
    Ok(outcome::fetched(
        "Price record",
        ServiceOutcome::from_optional(res),
    ))
}

pub async fn create(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Json(req): Json<CreatePriceRecordReq>,
) -> Result<Response, ValidationError> {
    let product_id = validate::id(req.product_id, "product")?;
    let price = validate::positive_decimal(req.price, "Price")?;
    let res = svc
        .price_history
        .create(NewPriceRecord {
            product_id,
            price,
            changed_at: req.changed_at.unwrap_or_else(Utc::now),
        })
        .await
        .map(PriceRecordDto::from);
    Ok(create_response("Price record", res))
}

pub async fn remove(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(id): Path<i64>,
) -> Result<Response, ValidationError> {
    let id = validate::id(id, "price record")?;
    Ok(outcome::deleted(
        "Price record",
        id,
        ServiceOutcome::from_result(svc.price_history.delete(id).await),
    ))
}

pub async fn by_product(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(product_id): Path<i64>,
) -> Result<Response, ValidationError> {
    let product_id = validate::id(product_id, "product")?;
    let res = svc.price_history.by_product(product_id).await.map(dtos);
    Ok(outcome::listed(
        "Price records",
        ServiceOutcome::from_result(res),
    ))
}

pub async fn latest_for_product(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(product_id): Path<i64>,
) -> Result<Response, ValidationError> {
    let product_id = validate::id(product_id, "product")?;
    let res = svc
        .price_history
        .latest_for_product(product_id)
        .await
        .map(|r| r.map(PriceRecordDto::from));
    Ok(outcome::fetched(
        "Price record",
        ServiceOutcome::from_optional(res),
    ))
}

/// GET /price-history/recent?days= — days is confined to [1,365].
pub async fn recent(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Query(q): Query<DaysQuery>,
) -> Result<Response, ValidationError> {
    let days = validate::bounded_int(q.days.unwrap_or(DEFAULT_RECENT_DAYS), 1, 365, "Days")?;
    let res = svc.price_history.recent(days as u64).await.map(dtos);
    Ok(outcome::listed(
        "Price records",
        ServiceOutcome::from_result(res),
    ))
}

pub async fn count(Extension(svc): Extension<Arc<CommerceServices>>) -> Response {
    outcome::counted(
        "Price records",
        ServiceOutcome::from_result(svc.price_history.count().await),
    )
}
