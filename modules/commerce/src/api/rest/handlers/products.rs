use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::{IntoResponse, Response},
    Extension, Json,
};

use api_core::outcome::{self, ServiceOutcome};
use api_core::pagination::PageQuery;
use api_core::{problem, validate, ValidationError};

use crate::api::rest::dto::{
    CreateProductReq, NumericRangeQuery, ProductDto, SearchQuery, UpdateProductReq,
};
use crate::api::rest::handlers::{create_response, page_from, required_param};
use crate::api::rest::routes::CommerceServices;
use crate::contract::model::{NewProduct, Product};

const CODE_LIMIT: usize = 50;
const NAME_LIMIT: usize = 100;

fn dtos(rows: Vec<Product>) -> Vec<ProductDto> {
    rows.into_iter().map(ProductDto::from).collect()
}

pub async fn list(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Query(q): Query<PageQuery>,
) -> Result<Response, ValidationError> {
    let page = q.page_request()?;
    let res = svc.products.list(page, q.sort_spec()).await.map(dtos);
    Ok(outcome::listed("Products", ServiceOutcome::from_result(res)))
}

pub async fn get(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(id): Path<i64>,
) -> Result<Response, ValidationError> {
    let id = validate::id(id, "product")?;
    let res = svc
        .products
        .find_by_id(id)
        .await
        .map(|p| p.map(ProductDto::from));
    Ok(outcome::fetched(
        "Product",
        ServiceOutcome::from_optional(res),
    ))
}

pub async fn create(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Json(req): Json<CreateProductReq>,
) -> Result<Response, ValidationError> {
    let code = validate::required_str(&req.code, "Code")?;
    validate::max_len(&code, "Code", CODE_LIMIT)?;
    let name = validate::required_str(&req.name, "Name")?;
    validate::max_len(&name, "Name", NAME_LIMIT)?;
    let price = validate::positive_decimal(req.price, "Price")?;
    let category_id = validate::id(req.category_id, "category")?;

    // Existence probe runs first; a duplicate code never reaches save.
    match svc.products.exists_by_code(&code).await {
        Ok(true) => Ok(
            problem::conflict(format!("Product with code '{code}' already exists"))
                .into_response(),
        ),
        Ok(false) => {
            let res = svc
                .products
                .create(NewProduct {
                    code,
                    name,
                    price,
                    category_id,
                    quantity: req.quantity,
                })
                .await
                .map(ProductDto::from);
            Ok(create_response("Product", res))
        }
        Err(e) => Ok(outcome::created::<ProductDto>(
            "Product",
            ServiceOutcome::Failure(e.to_string()),
        )),
    }
}

pub async fn update(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateProductReq>,
) -> Result<Response, ValidationError> {
    let id = validate::id(id, "product")?;
    if req.id.is_some_and(|body_id| body_id != id) {
        return Err(ValidationError::new("ID in path does not match ID in body"));
    }
    let code = validate::required_str(&req.code, "Code")?;
    validate::max_len(&code, "Code", CODE_LIMIT)?;
    let name = validate::required_str(&req.name, "Name")?;
    validate::max_len(&name, "Name", NAME_LIMIT)?;
    let price = validate::positive_decimal(req.price, "Price")?;
    let category_id = validate::id(req.category_id, "category")?;
    let res = svc
        .products
        .update(Product {
            id,
            code,
            name,
            price,
            category_id,
            quantity: req.quantity,
        })
        .await
        .map(|p| p.map(ProductDto::from));
    Ok(outcome::updated(
        "Product",
        ServiceOutcome::from_optional(res),
    ))
}

/// PATCH /products/{id}/price with a raw decimal body.
pub async fn set_price(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(id): Path<i64>,
    body: String,
) -> Result<Response, ValidationError> {
    let id = validate::id(id, "product")?;
    let price: f64 = body
        .trim()
        .parse()
        .map_err(|_| ValidationError::new("Invalid price"))?;
    let price = validate::positive_decimal(price, "Price")?;
    let res = svc
        .products
        .set_price(id, price)
        .await
        .map(|p| p.map(ProductDto::from));
    Ok(outcome::updated(
        "Product",
        ServiceOutcome::from_optional(res),
    ))
}

pub async fn remove(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(id): Path<i64>,
) -> Result<Response, ValidationError> {
    let id = validate::id(id, "product")?;
    Ok(outcome::deleted(
        "Product",
        id,
        ServiceOutcome::from_result(svc.products.delete(id).await),
    ))
}

pub async fn search(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Query(q): Query<SearchQuery>,
) -> Result<Response, ValidationError> {
    let term = validate::required_str(q.q.as_deref().unwrap_or(""), "Search query")?;
    let page = page_from(q.page, q.size)?;
    let res = svc.products.search(&term, page).await.map(dtos);
    Ok(outcome::listed("Products", ServiceOutcome::from_result(res)))
}

pub async fn price_range(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Query(q): Query<NumericRangeQuery>,
) -> Result<Response, ValidationError> {
    let min = required_param(q.min, "Minimum price is required")?;
    let max = required_param(q.max, "Maximum price is required")?;
    let min = validate::positive_decimal(min, "Minimum price")?;
    let range = validate::range(min, max, "price")?;
    let page = page_from(q.page, q.size)?;
    let res = svc.products.price_range(range, page).await.map(dtos);
    Ok(outcome::listed("Products", ServiceOutcome::from_result(res)))
}

pub async fn exists_by_code(
    Extension(svc): Extension<Arc<CommerceServices>>,
    Path(code): Path<String>,
) -> Result<Response, ValidationError> {
    let code = validate::required_str(&code, "Code")?;
    Ok(outcome::exists(
        "Product",
        ServiceOutcome::from_result(svc.products.exists_by_code(&code).await),
    ))
}

pub async fn count(Extension(svc): Extension<Arc<CommerceServices>>) -> Response {
    outcome::counted(
        "Products",
        ServiceOutcome::from_result(svc.products.count().await),
    )
}
