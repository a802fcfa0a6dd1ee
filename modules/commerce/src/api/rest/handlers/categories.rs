use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::Response,
    Extension, Json,
};

use api_core::outcome::{self, ServiceOutcome};
use api_core::pagination::PageQuery;
use api_core::{validate, ValidationError};

use crate::api::rest::dto::{CategoryDto, CreateCategoryReq, SearchQuery, UpdateCategoryReq};
use crate::api::rest::handlers::{create_response, page_from};
use crate::api::rest::routes::CommerceServices;
use crate::contract::model::{Category, NewCategory};

const NAME_LIMIT: usize = 100;

fn dtos(rows: Vec<Category>) -> Vec<CategoryDto> {
    rows.into_iter().map(CategoryDto::from).collect()
}

pub async fn list(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Query(q): Query<PageQuery>,
) -> Result<Response, ValidationError> {
    let page = q.page_request()?;
    let res = svc.categories.list(page, q.sort_spec()).await.map(dtos);
    Ok(outcome::listed(
        "Categories",
        ServiceOutcome::from_result(res),
    ))
}

pub async fn get(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(id): Path<i64>,
) -> Result<Response, ValidationError> {
    let id = validate::id(id, "category")?;
    let res = svc
        .categories
        .find_by_id(id)
        .await
        .map(|c| c.map(CategoryDto::from));
    Ok(outcome::fetched(
        "Category",
        ServiceOutcome::from_optional(res),
    ))
}

pub async fn create(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Json(req): Json<CreateCategoryReq>,
) -> Result<Response, ValidationError> {
    let name = validate::required_str(&req.name, "Name")?;
    validate::max_len(&name, "Name", NAME_LIMIT)?;
    let res = svc
        .categories
        .create(NewCategory {
            name,
            description: req.description,
        })
        .await
        .map(CategoryDto::from);
    Ok(create_response("Category", res))
}

pub async fn update(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateCategoryReq>,
) -> Result<Response, ValidationError> {
    let id = validate::id(id, "category")?;
    if req.id.is_some_and(|body_id| body_id != id) {
        return Err(ValidationError::new("ID in path does not match ID in body"));
    }
    let name = validate::required_str(&req.name, "Name")?;
    validate::max_len(&name, "Name", NAME_LIMIT)?;
    let res = svc
        .categories
        .update(Category {
            id,
            name,
            description: req.description,
        })
        .await
        .map(|c| c.map(CategoryDto::from));
    Ok(outcome::updated(
        "Category",
        ServiceOutcome::from_optional(res),
    ))
}

pub async fn rename(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(id): Path<i64>,
    body: String,
) -> Result<Response, ValidationError> {
    let id = validate::id(id, "category")?;
    let name = validate::required_str(&body, "Name")?;
    validate::max_len(&name, "Name", NAME_LIMIT)?;
    let res = svc
        .categories
        .rename(id, name)
        .await
        .map(|c| c.map(CategoryDto::from));
    Ok(outcome::updated(
        "Category",
        ServiceOutcome::from_optional(res),
    ))
}

pub async fn remove(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(id): Path<i64>,
) -> Result<Response, ValidationError> {
    let id = validate::id(id, "category")?;
    Ok(outcome::deleted(
        "Category",
        id,
        ServiceOutcome::from_result(svc.categories.delete(id).await),
    ))
}

pub async fn search(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Query(q): Query<SearchQuery>,
) -> Result<Response, ValidationError> {
    let term = validate::required_str(q.q.as_deref().unwrap_or(""), "Search query")?;
    let page = page_from(q.page, q.size)?;
    let res = svc.categories.search(&term, page).await.map(dtos);
    Ok(outcome::listed(
        "Categories",
        ServiceOutcome::from_result(res),
    ))
}

pub async fn exists_by_name(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(name): Path<String>,
) -> Result<Response, ValidationError> {
    let name = validate::required_str(&name, "Name")?;
    Ok(outcome::exists(
        "Category",
        ServiceOutcome::from_result(svc.categories.exists_by_name(&name).await),
    ))
}

pub async fn count(Extension(svc): Extension<Arc<CommerceServices>>) -> Response {
    outcome::counted(
        "Categories",
        ServiceOutcome::from_result(svc.categories.count().await),
    )
}
