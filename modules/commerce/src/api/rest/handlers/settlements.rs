use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::Response,
    Extension, Json,
};

use api_core::outcome::{self, BulkVerb, ServiceOutcome};
use api_core::pagination::PageQuery;
use api_core::{validate, ValidationError};

use crate::api::rest::dto::{CreateSettlementReq, SearchQuery, SettlementDto, UpdateSettlementReq};
use crate::api::rest::handlers::{create_response, page_from};
use crate::api::rest::routes::CommerceServices;
use crate::contract::model::{NewSettlement, Settlement};

const NAME_LIMIT: usize = 100;

fn dtos(rows: Vec<Settlement>) -> Vec<SettlementDto> {
    rows.into_iter().map(SettlementDto::from).collect()
}

pub async fn list(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Query(q): Query<PageQuery>,
) -> Result<Response, ValidationError> {
    let page = q.page_request()?;
    let res = svc.settlements.list(page, q.sort_spec()).await.map(dtos);
    Ok(outcome::listed(
        "Settlements",
        ServiceOutcome::from_result(res),
    ))
}

pub async fn get(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(id): Path<i64>,
) -> Result<Response, ValidationError> {
    let id = validate::id(id, "settlement")?;
    let res = svc
        .settlements
        .find_by_id(id)
        .await
        .map(|s| s.map(SettlementDto::from));
    Ok(outcome::fetched(
        "Settlement",
        ServiceOutcome::from_optional(res),
    ))
}

pub async fn create(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Json(req): Json<CreateSettlementReq>,
) -> Result<Response, ValidationError> {
    let name = validate::required_str(&req.name, "Name")?;
    validate::max_len(&name, "Name", NAME_LIMIT)?;
    let region_id = validate::id(req.region_id, "region")?;
    let res = svc
        .settlements
        .create(NewSettlement {
            name,
            region_id,
            has_bank: req.has_bank,
            is_legal_entity: req.is_legal_entity,
        })
        .await
        .map(SettlementDto::from);
    Ok(create_response("Settlement", res))
}

pub async fn update(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateSettlementReq>,
) -> Result<Response, ValidationError> {
    let id = validate::id(id, "settlement")?;
    if req.id.is_some_and(|body_id| body_id != id) {
        return Err(ValidationError::new("ID in path does not match ID in body"));
    }
    let name = validate::required_str(&req.name, "Name")?;
    validate::max_len(&name, "Name", NAME_LIMIT)?;
    let region_id = validate::id(req.region_id, "region")?;
    let res = svc
        .settlements
        .update(Settlement {
            id,
            name,
            region_id,
            has_bank: req.has_bank,
            is_legal_entity: req.is_legal_entity,
        })
        .await
        .map(|s| s.map(SettlementDto::from));
    Ok(outcome::updated(
        "Settlement",
        ServiceOutcome::from_optional(res),
    ))
}

pub async fn remove(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(id): Path<i64>,
) -> Result<Response, ValidationError> {
    let id = validate::id(id, "settlement")?;
    Ok(outcome::deleted(
        "Settlement",
        id,
        ServiceOutcome::from_result(svc.settlements.delete(id).await),
    ))
}

pub async fn search(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Query(q): Query<SearchQuery>,
) -> Result<Response, ValidationError> {
    let term = validate::required_str(q.q.as_deref().unwrap_or(""), "Search query")?;
    let page = page_from(q.page, q.size)?;
    let res = svc.settlements.search(&term, page).await.map(dtos);
    Ok(outcome::listed(
        "Settlements",
        ServiceOutcome::from_result(res),
    ))
}

pub async fn by_region(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(region_id): Path<i64>,
) -> Result<Response, ValidationError> {
    let region_id = validate::id(region_id, "region")?;
    let res = svc.settlements.by_region(region_id).await.map(dtos);
    Ok(outcome::listed(
        "Settlements",
        ServiceOutcome::from_result(res),
    ))
}

/// Bulk flag flip: every settlement with a bank becomes a legal entity.
pub async fn mark_legal_entities(Extension(svc): Extension<Arc<CommerceServices>>) -> Response {
    outcome::bulk(
        BulkVerb::Updated,
        "Settlements",
        ServiceOutcome::from_result(svc.settlements.mark_legal_entities_with_bank().await),
    )
}

pub async fn count_with_bank(Extension(svc): Extension<Arc<CommerceServices>>) -> Response {
    outcome::counted(
        "Settlements",
        ServiceOutcome::from_result(svc.settlements.count_with_bank().await),
    )
}

pub async fn count(Extension(svc): Extension<Arc<CommerceServices>>) -> Response {
    outcome::counted(
        "Settlements",
        ServiceOutcome::from_result(svc.settlements.count().await),
    )
}
