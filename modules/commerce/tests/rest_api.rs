//! End-to-end tests for the commerce REST surface, driven through the
//! router with `tower::ServiceExt::oneshot`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use api_core::{PageRequest, RangeFilter, SortSpec};
use commerce::contract::client::ProductApi;
use commerce::contract::error::ServiceError;
use commerce::contract::model::{NewProduct, Product};
use commerce::{register_routes, CommerceServices};

fn router() -> Router {
    register_routes(Arc::new(CommerceServices::in_memory()))
}

async fn send(router: Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    router.oneshot(request).await.unwrap()
}

async fn send_text(router: Router, method: Method, uri: &str, body: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(body.to_string()))
        .unwrap();
    router.oneshot(request).await.unwrap()
}

async fn body_string(resp: Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(resp: Response) -> Value {
    serde_json::from_str(&body_string(resp).await).unwrap()
}

// ------------------------------------------------------------- pagination

#[tokio::test]
async fn negative_page_is_rejected_with_literal_message() {
    let resp = send(router(), Method::GET, "/categories?page=-1", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(resp)
        .await
        .contains("Page index cannot be negative"));
}

#[tokio::test]
async fn out_of_bounds_size_is_rejected() {
    for uri in ["/categories?size=0", "/categories?size=101"] {
        let resp = send(router(), Method::GET, uri, None).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert!(body_string(resp)
            .await
            .contains("Page size must be between 1 and 100"));
    }
}

// ------------------------------------------------------------- categories

#[tokio::test]
async fn category_create_roundtrip() {
    let router = router();

    let resp = send(
        router.clone(),
        Method::POST,
        "/categories",
        Some(json!({"name": "Electronics", "description": "Gadgets"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created = body_json(resp).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "Electronics");

    let resp = send(router, Method::GET, "/categories/1", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["name"], "Electronics");
}

#[tokio::test]
async fn category_list_keeps_insertion_order() {
    let router = router();

    for name in ["Electronics", "Books"] {
        let resp = send(
            router.clone(),
            Method::POST,
            "/categories",
            Some(json!({"name": name})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = send(router, Method::GET, "/categories", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Electronics", "Books"]);
}

#[tokio::test]
async fn category_create_requires_name() {
    let resp = send(
        router(),
        Method::POST,
        "/categories",
        Some(json!({"name": "   "})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(resp).await.contains("Name is required"));
}

#[tokio::test]
async fn category_update_rejects_id_mismatch() {
    let router = router();
    send(
        router.clone(),
        Method::POST,
        "/categories",
        Some(json!({"name": "Books"})),
    )
    .await;

    let resp = send(
        router,
        Method::PUT,
        "/categories/1",
        Some(json!({"id": 2, "name": "Books"})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(resp)
        .await
        .contains("ID in path does not match ID in body"));
}

#[tokio::test]
async fn category_delete_then_404() {
    let router = router();
    send(
        router.clone(),
        Method::POST,
        "/categories",
        Some(json!({"name": "Books"})),
    )
    .await;

    let resp = send(router.clone(), Method::DELETE, "/categories/1", None).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(router, Method::DELETE, "/categories/1", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_string(resp).await.contains("Category not found: 1"));
}

#[tokio::test]
async fn category_invalid_id_in_path() {
    let resp = send(router(), Method::GET, "/categories/0", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(resp).await.contains("Invalid category ID"));
}

#[tokio::test]
async fn category_rename_patches_name_only() {
    let router = router();
    send(
        router.clone(),
        Method::POST,
        "/categories",
        Some(json!({"name": "Books", "description": "Paper"})),
    )
    .await;

    let resp = send_text(router, Method::PATCH, "/categories/1/name", "Literature").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["name"], "Literature");
    assert_eq!(body["description"], "Paper");
}

#[tokio::test]
async fn category_count_and_exists_are_plain_text() {
    let router = router();
    send(
        router.clone(),
        Method::POST,
        "/categories",
        Some(json!({"name": "Books"})),
    )
    .await;

    let resp = send(router.clone(), Method::GET, "/categories/count", None).await;
    assert_eq!(body_string(resp).await, "1");

    let resp = send(
        router.clone(),
        Method::GET,
        "/categories/exists/name/Books",
        None,
    )
    .await;
    assert_eq!(body_string(resp).await, "true");

    let resp = send(router, Method::GET, "/categories/exists/name/Comics", None).await;
    assert_eq!(body_string(resp).await, "false");
}

// --------------------------------------------------------------- products

/// ProductApi double that reports an existing code and records whether
/// `create` was ever reached.
struct DuplicateCodeProducts {
    save_invoked: AtomicBool,
}

#[async_trait]
impl ProductApi for DuplicateCodeProducts {
    async fn list(
        &self,
        _page: PageRequest,
        _sort: Option<SortSpec>,
    ) -> Result<Vec<Product>, ServiceError> {
        Err(ServiceError::backend("not scripted"))
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Product>, ServiceError> {
        Err(ServiceError::backend("not scripted"))
    }

    async fn create(&self, _new: NewProduct) -> Result<Product, ServiceError> {
        self.save_invoked.store(true, Ordering::SeqCst);
        Err(ServiceError::backend("save must not run"))
    }

    async fn update(&self, _product: Product) -> Result<Option<Product>, ServiceError> {
        Err(ServiceError::backend("not scripted"))
    }

    async fn set_price(&self, _id: i64, _price: f64) -> Result<Option<Product>, ServiceError> {
        Err(ServiceError::backend("not scripted"))
    }

    async fn delete(&self, _id: i64) -> Result<bool, ServiceError> {
        Err(ServiceError::backend("not scripted"))
    }

    async fn search(
        &self,
        _query: &str,
        _page: PageRequest,
    ) -> Result<Vec<Product>, ServiceError> {
        Err(ServiceError::backend("not scripted"))
    }

    async fn price_range(
        &self,
        _range: RangeFilter<f64>,
        _page: PageRequest,
    ) -> Result<Vec<Product>, ServiceError> {
        Err(ServiceError::backend("not scripted"))
    }

    async fn exists_by_code(&self, _code: &str) -> Result<bool, ServiceError> {
        Ok(true)
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Err(ServiceError::backend("not scripted"))
    }
}

#[tokio::test]
async fn duplicate_product_code_conflicts_without_saving() {
    let products = Arc::new(DuplicateCodeProducts {
        save_invoked: AtomicBool::new(false),
    });
    let services = CommerceServices {
        products: products.clone(),
        ..CommerceServices::in_memory()
    };
    let router = register_routes(Arc::new(services));

    let resp = send(
        router,
        Method::POST,
        "/products",
        Some(json!({"code": "SKU-1", "name": "Mouse", "price": 15.0, "category_id": 1})),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert!(body_string(resp).await.contains("already exists"));
    assert!(!products.save_invoked.load(Ordering::SeqCst));
}

#[tokio::test]
async fn product_create_validates_price() {
    let resp = send(
        router(),
        Method::POST,
        "/products",
        Some(json!({"code": "SKU-1", "name": "Mouse", "price": 0.0, "category_id": 1})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(resp)
        .await
        .contains("Price must be greater than 0"));
}

#[tokio::test]
async fn product_price_range_must_be_strict() {
    let resp = send(
        router(),
        Method::GET,
        "/products/price-range?min=10&max=10",
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(resp)
        .await
        .contains("Maximum price must be greater than minimum price"));
}

#[tokio::test]
async fn product_set_price_via_patch() {
    let router = router();
    send(
        router.clone(),
        Method::POST,
        "/products",
        Some(json!({"code": "SKU-1", "name": "Mouse", "price": 15.0, "category_id": 1})),
    )
    .await;

    let resp = send_text(router, Method::PATCH, "/products/1/price", "19.99").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["price"], 19.99);
}

// ---------------------------------------------------------- failure mapping

/// ProductApi double whose reads always fail.
struct BrokenProducts;

#[async_trait]
impl ProductApi for BrokenProducts {
    async fn list(
        &self,
        _page: PageRequest,
        _sort: Option<SortSpec>,
    ) -> Result<Vec<Product>, ServiceError> {
        Err(ServiceError::backend("connection reset"))
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Product>, ServiceError> {
        Err(ServiceError::backend("connection reset"))
    }

    async fn create(&self, _new: NewProduct) -> Result<Product, ServiceError> {
        Err(ServiceError::backend("connection reset"))
    }

    async fn update(&self, _product: Product) -> Result<Option<Product>, ServiceError> {
        Err(ServiceError::backend("connection reset"))
    }

    async fn set_price(&self, _id: i64, _price: f64) -> Result<Option<Product>, ServiceError> {
        Err(ServiceError::backend("connection reset"))
    }

    async fn delete(&self, _id: i64) -> Result<bool, ServiceError> {
        Err(ServiceError::backend("connection reset"))
    }

    async fn search(
        &self,
        _query: &str,
        _page: PageRequest,
    ) -> Result<Vec<Product>, ServiceError> {
        Err(ServiceError::backend("connection reset"))
    }

    async fn price_range(
        &self,
        _range: RangeFilter<f64>,
        _page: PageRequest,
    ) -> Result<Vec<Product>, ServiceError> {
        Err(ServiceError::backend("connection reset"))
    }

    async fn exists_by_code(&self, _code: &str) -> Result<bool, ServiceError> {
        Err(ServiceError::backend("connection reset"))
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Err(ServiceError::backend("connection reset"))
    }
}

#[tokio::test]
async fn backend_failure_maps_to_500_with_cause() {
    let services = CommerceServices {
        products: Arc::new(BrokenProducts),
        ..CommerceServices::in_memory()
    };
    let router = register_routes(Arc::new(services));

    let resp = send(router.clone(), Method::GET, "/products/1", None).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_string(resp)
        .await
        .contains("Error retrieving product: connection reset"));

    let resp = send(router, Method::DELETE, "/products/1", None).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_string(resp)
        .await
        .contains("Error deleting product: connection reset"));
}

// --------------------------------------------------------------- customers

#[tokio::test]
async fn customers_by_letter_rejects_multi_char() {
    let resp = send(router(), Method::GET, "/customers/by-letter/AB", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(resp)
        .await
        .contains("Letter must be a single character"));
}

#[tokio::test]
async fn customers_by_letter_matches_case_insensitively() {
    let router = router();
    for (name, email) in [
        ("alice", "alice@example.com"),
        ("Anna", "anna@example.com"),
        ("Bob", "bob@example.com"),
    ] {
        send(
            router.clone(),
            Method::POST,
            "/customers",
            Some(json!({"name": name, "email": email})),
        )
        .await;
    }

    let resp = send(router, Method::GET, "/customers/by-letter/A", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn duplicate_customer_email_conflicts() {
    let router = router();
    let payload = json!({"name": "Alice", "email": "alice@example.com"});
    let resp = send(
        router.clone(),
        Method::POST,
        "/customers",
        Some(payload.clone()),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = send(router, Method::POST, "/customers", Some(payload)).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert!(body_string(resp).await.contains("already exists"));
}

// ---------------------------------------------------------------- invoices

#[tokio::test]
async fn invoice_date_range_must_be_strict() {
    let resp = send(
        router(),
        Method::GET,
        "/invoices/date-range?from=2024-03-01&to=2024-03-01",
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(resp)
        .await
        .contains("Maximum date must be greater than minimum date"));
}

#[tokio::test]
async fn invoice_bulk_delete_reports_summary() {
    let router = router();
    for (number, date) in [
        ("INV-1", "2024-01-10"),
        ("INV-2", "2024-02-10"),
        ("INV-3", "2024-05-10"),
    ] {
        let resp = send(
            router.clone(),
            Method::POST,
            "/invoices",
            Some(json!({
                "number": number,
                "customer_id": 1,
                "issued_on": date,
                "total": 100.0
            })),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = send(
        router.clone(),
        Method::DELETE,
        "/invoices/before/2024-03-01",
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "Deleted 2 invoices");

    let resp = send(router, Method::GET, "/invoices/count", None).await;
    assert_eq!(body_string(resp).await, "1");
}

// ------------------------------------------------------------ invoice items

#[tokio::test]
async fn top_selling_rejects_zero_limit() {
    let resp = send(
        router(),
        Method::GET,
        "/invoice-items/top-selling?limit=0",
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(resp)
        .await
        .contains("Limit must be between 1 and 100"));
}

#[tokio::test]
async fn top_selling_orders_by_quantity() {
    let router = router();
    for (product_id, quantity) in [(1, 5), (2, 20), (1, 3)] {
        send(
            router.clone(),
            Method::POST,
            "/invoice-items",
            Some(json!({
                "invoice_id": 1,
                "product_id": product_id,
                "quantity": quantity,
                "unit_price": 2.5
            })),
        )
        .await;
    }

    let resp = send(
        router,
        Method::GET,
        "/invoice-items/top-selling?limit=2",
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let sellers = body.as_array().unwrap();
    assert_eq!(sellers[0]["product_id"], 2);
    assert_eq!(sellers[0]["total_quantity"], 20);
    assert_eq!(sellers[1]["product_id"], 1);
    assert_eq!(sellers[1]["total_quantity"], 8);
}

// ------------------------------------------------------------ price history

#[tokio::test]
async fn price_history_recent_rejects_out_of_range_days() {
    let resp = send(
        router(),
        Method::GET,
        "/price-history/recent?days=366",
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(resp)
        .await
        .contains("Days must be between 1 and 365"));
}

#[tokio::test]
async fn price_history_latest_picks_newest_record() {
    let router = router();
    for (price, ts) in [
        (10.0, "2024-01-01T00:00:00Z"),
        (12.5, "2024-06-01T00:00:00Z"),
        (11.0, "2024-03-01T00:00:00Z"),
    ] {
        send(
            router.clone(),
            Method::POST,
            "/price-history",
            Some(json!({"product_id": 7, "price": price, "changed_at": ts})),
        )
        .await;
    }

    let resp = send(
        router,
        Method::GET,
        "/price-history/product/7/latest",
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["price"], 12.5);
}

// -------------------------------------------------------------- settlements

#[tokio::test]
async fn mark_legal_entities_reports_summary() {
    let router = router();
    for (name, has_bank) in [("Riverton", true), ("Milltown", false), ("Dockside", true)] {
        let resp = send(
            router.clone(),
            Method::POST,
            "/settlements",
            Some(json!({"name": name, "region_id": 1, "has_bank": has_bank})),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = send(
        router.clone(),
        Method::PATCH,
        "/settlements/mark-with-bank",
        None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "Updated 2 settlements");

    // Already marked; a second pass changes nothing.
    let resp = send(
        router.clone(),
        Method::PATCH,
        "/settlements/mark-with-bank",
        None,
    )
    .await;
    assert_eq!(body_string(resp).await, "Updated 0 settlements");

    let resp = send(
        router,
        Method::GET,
        "/settlements/stats/with-bank/count",
        None,
    )
    .await;
    assert_eq!(body_string(resp).await, "2");
}

// ------------------------------------------------------------------ regions

#[tokio::test]
async fn region_search_requires_query() {
    let resp = send(router(), Method::GET, "/regions/search", None).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_string(resp).await.contains("Search query is required"));
}

#[tokio::test]
async fn region_search_matches_substring() {
    let router = router();
    for (name, code) in [("North", "N"), ("Northwest", "NW"), ("South", "S")] {
        send(
            router.clone(),
            Method::POST,
            "/regions",
            Some(json!({"name": name, "code": code})),
        )
        .await;
    }

    let resp = send(router, Method::GET, "/regions/search?q=north", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}
