use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::Response,
    Extension, Json,
};

use api_core::outcome::{self, ServiceOutcome};
use api_core::pagination::PageQuery;
use api_core::{validate, ValidationError};

use crate::api::rest::dto::{CreateCustomerReq, CustomerDto, SearchQuery, UpdateCustomerReq};
use crate::api::rest::handlers::{create_response, page_from};
use crate::api::rest::routes::CommerceServices;
use crate::contract::model::{Customer, NewCustomer};

const NAME_LIMIT: usize = 100;
const EMAIL_LIMIT: usize = 100;

fn dtos(rows: Vec<Customer>) -> Vec<CustomerDto> {
    rows.into_iter().map(CustomerDto::from).collect()
}

fn validated_fields(name: &str, email: &str) -> Result<(String, String), ValidationError> {
    let name = validate::required_str(name, "Name")?;
    validate::max_len(&name, "Name", NAME_LIMIT)?;
    let email = validate::required_str(email, "Email")?;
    validate::max_len(&email, "Email", EMAIL_LIMIT)?;
    Ok((name, email))
}

pub async fn list(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Query(q): Query<PageQuery>,
) -> Result<Response, ValidationError> {
    let page = q.page_request()?;
    let res = svc.customers.list(page, q.sort_spec()).await.map(dtos);
    Ok(outcome::listed(
        "Customers",
        ServiceOutcome::from_result(res),
    ))
}

pub async fn get(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(id): Path<i64>,
) -> Result<Response, ValidationError> {
    let id = validate::id(id, "customer")?;
    let res = svc
        .customers
        .find_by_id(id)
        .await
        .map(|c| c.map(CustomerDto::from));
    Ok(outcome::fetched(
        "Customer",
        ServiceOutcome::from_optional(res),
    ))
}

pub async fn create(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Json(req): Json<CreateCustomerReq>,
) -> Result<Response, ValidationError> {
    let (name, email) = validated_fields(&req.name, &req.email)?;
    let res = svc
        .customers
        .create(NewCustomer {
            name,
            email,
            region_id: req.region_id,
        })
        .await
        .map(CustomerDto::from);
    Ok(create_response("Customer", res))
}

pub async fn update(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateCustomerReq>,
) -> Result<Response, ValidationError> {
    let id = validate::id(id, "customer")?;
    if req.id.is_some_and(|body_id| body_id != id) {
        return Err(ValidationError::new("ID in path does not match ID in body"));
    }
    let (name, email) = validated_fields(&req.name, &req.email)?;
    let res = svc
        .customers
        .update(Customer {
            id,
            name,
            email,
            region_id: req.region_id,
        })
        .await
        .map(|c| c.map(CustomerDto::from));
    Ok(outcome::updated(
        "Customer",
        ServiceOutcome::from_optional(res),
    ))
}

pub async fn remove(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(id): Path<i64>,
) -> Result<Response, ValidationError> {
    let id = validate::id(id, "customer")?;
    Ok(outcome::deleted(
        "Customer",
        id,
        ServiceOutcome::from_result(svc.customers.delete(id).await),
    ))
}

pub async fn search(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Query(q): Query<SearchQuery>,
) -> Result<Response, ValidationError> {
    let term = validate::required_str(q.q.as_deref().unwrap_or(""), "Search query")?;
    let page = page_from(q.page, q.size)?;
    let res = svc.customers.search(&term, page).await.map(dtos);
    Ok(outcome::listed(
        "Customers",
        ServiceOutcome::from_result(res),
    ))
}

pub async fn by_letter(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(letter): Path<String>,
) -> Result<Response, ValidationError> {
    let letter = validate::single_letter(&letter)?;
    let res = svc
        .customers
        .by_letter(letter, Default::default())
        .await
        .map(dtos);
    Ok(outcome::listed(
        "Customers",
        ServiceOutcome::from_result(res),
    ))
}

pub async fn exists_by_email(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(email): Path<String>,
) -> Result<Response, ValidationError> {
    let email = validate::required_str(&email, "Email")?;
    Ok(outcome::exists(
        "Customer",
        ServiceOutcome::from_result(svc.customers.exists_by_email(&email).await),
    ))
}

pub async fn count(Extension(svc): Extension<Arc<CommerceServices>>) -> Response {
    outcome::counted(
        "Customers",
        ServiceOutcome::from_result(svc.customers.count().await),
    )
}
