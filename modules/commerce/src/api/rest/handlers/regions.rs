use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::Response,
    Extension, Json,
};

use api_core::outcome::{self, ServiceOutcome};
use api_core::pagination::PageQuery;
use api_core::{validate, ValidationError};

use crate::api::rest::dto::{CreateRegionReq, RegionDto, SearchQuery, UpdateRegionReq};
use crate::api::rest::handlers::{create_response, page_from};
use crate::api::rest::routes::CommerceServices;
use crate::contract::model::{NewRegion, Region};

const NAME_LIMIT: usize = 100;
const CODE_LIMIT: usize = 10;

fn dtos(rows: Vec<Region>) -> Vec<RegionDto> {
    rows.into_iter().map(RegionDto::from).collect()
}

fn validated_fields(name: &str, code: &str) -> Result<(String, String), ValidationError> {
    let name = validate::required_str(name, "Name")?;
    validate::max_len(&name, "Name", NAME_LIMIT)?;
    let code = validate::required_str(code, "Code")?;
    validate::max_len(&code, "Code", CODE_LIMIT)?;
    Ok((name, code))
}

pub async fn list(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Query(q): Query<PageQuery>,
) -> Result<Response, ValidationError> {
    let page = q.page_request()?;
    let res = svc.regions.list(page, q.sort_spec()).await.map(dtos);
    Ok(outcome::listed("Regions", ServiceOutcome::from_result(res)))
}

pub async fn get(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(id): Path<i64>,
) -> Result<Response, ValidationError> {
    let id = validate::id(id, "region")?;
    let res = svc
        .regions
        .find_by_id(id)
        .await
        .map(|r| r.map(RegionDto::from));
    Ok(outcome::fetched(
        "Region",
        ServiceOutcome::from_optional(res),
    ))
}

pub async fn create(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Json(req): Json<CreateRegionReq>,
) -> Result<Response, ValidationError> {
    let (name, code) = validated_fields(&req.name, &req.code)?;
    let res = svc
        .regions
        .create(NewRegion { name, code })
        .await
        .map(RegionDto::from);
    Ok(create_response("Region", res))
}

pub async fn update(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateRegionReq>,
) -> Result<Response, ValidationError> {
    let id = validate::id(id, "region")?;
    if req.id.is_some_and(|body_id| body_id != id) {
        return Err(ValidationError::new("ID in path does not match ID in body"));
    }
    let (name, code) = validated_fields(&req.name, &req.code)?;
    let res = svc
        .regions
        .update(Region { id, name, code })
        .await
        .map(|r| r.map(RegionDto::from));
    Ok(outcome::updated(
        "Region",
        ServiceOutcome::from_optional(res),
    ))
}

pub async fn rename(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(id): Path<i64>,
    body: String,
) -> Result<Response, ValidationError> {
    let id = validate::id(id, "region")?;
    let name = validate::required_str(&body, "Name")?;
    validate::max_len(&name, "Name", NAME_LIMIT)?;
    let res = svc
        .regions
        .rename(id, name)
        .await
        .map(|r| r.map(RegionDto::from));
    Ok(outcome::updated(
        "Region",
        ServiceOutcome::from_optional(res),
    ))
}

pub async fn remove(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(id): Path<i64>,
) -> Result<Response, ValidationError> {
    let id = validate::id(id, "region")?;
    Ok(outcome::deleted(
        "Region",
        id,
        ServiceOutcome::from_result(svc.regions.delete(id).await),
    ))
}

pub async fn search(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Query(q): Query<SearchQuery>,
) -> Result<Response, ValidationError> {
    let term = validate::required_str(q.q.as_deref().unwrap_or(""), "Search query")?;
    let page = page_from(q.page, q.size)?;
    let res = svc.regions.search(&term, page).await.map(dtos);
    Ok(outcome::listed("Regions", ServiceOutcome::from_result(res)))
}

pub async fn exists_by_name(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(name): Path<String>,
) -> Result<Response, ValidationError> {
    let name = validate::required_str(&name, "Name")?;
    Ok(outcome::exists(
        "Region",
        ServiceOutcome::from_result(svc.regions.exists_by_name(&name).await),
    ))
}

pub async fn count(Extension(svc): Extension<Arc<CommerceServices>>) -> Response {
    outcome::counted(
        "Regions",
        ServiceOutcome::from_result(svc.regions.count().await),
    )
}
