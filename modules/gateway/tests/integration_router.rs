use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    routing::get,
    Router,
};
use tower::ServiceExt;

use gateway::{build_router, ServiceInfo};
use runtime::config::AppConfig;

fn test_info() -> ServiceInfo {
    ServiceInfo {
        name: "tradebook".to_string(),
        version: "0.1.0".to_string(),
    }
}

fn test_router() -> Router {
    let api = Router::new().route("/ping", get(|| async { "pong" }));
    build_router(&AppConfig::default(), test_info(), api)
}

async fn body_string(resp: axum::response::Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn req(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// base64("admin:admin"), the default credentials.
const BASIC_ADMIN: &str = "Basic YWRtaW46YWRtaW4=";

#[tokio::test]
async fn health_is_idempotent_over_get_and_put() {
    let router = test_router();

    for method in [Method::GET, Method::PUT] {
        let resp = router
            .clone()
            .oneshot(req(method.clone(), "/public/health"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "method {method}");
        assert_eq!(body_string(resp).await, "OK");
    }

    // A second GET must behave exactly like the first.
    let again = test_router()
        .oneshot(req(Method::GET, "/public/health"))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::OK);
    assert_eq!(body_string(again).await, "OK");
}

#[tokio::test]
async fn health_rejects_other_verbs() {
    for method in [Method::POST, Method::DELETE, Method::PATCH] {
        let resp = test_router()
            .oneshot(req(method.clone(), "/public/health"))
            .await
            .unwrap();
        assert_eq!(
            resp.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "method {method}"
        );
    }
}

#[tokio::test]
async fn info_reports_name_and_version() {
    let resp = test_router()
        .oneshot(req(Method::GET, "/public/info"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_str(&body_string(resp).await).unwrap();
    assert_eq!(body["name"], "tradebook");
    assert_eq!(body["version"], "0.1.0");
}

#[tokio::test]
async fn api_requires_basic_auth() {
    let resp = test_router()
        .oneshot(req(Method::GET, "/api/ping"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn api_rejects_wrong_credentials() {
    let mut request = req(Method::GET, "/api/ping");
    request.headers_mut().insert(
        axum::http::header::AUTHORIZATION,
        // base64("admin:wrong")
        "Basic YWRtaW46d3Jvbmc=".parse().unwrap(),
    );
    let resp = test_router().oneshot(request).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn api_accepts_valid_credentials() {
    let mut request = req(Method::GET, "/api/ping");
    request.headers_mut().insert(
        axum::http::header::AUTHORIZATION,
        BASIC_ADMIN.parse().unwrap(),
    );
    let resp = test_router().oneshot(request).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_string(resp).await, "pong");
}

#[tokio::test]
async fn public_surface_skips_auth() {
    // No Authorization header anywhere near /public.
    let resp = test_router()
        .oneshot(req(Method::GET, "/public/info"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let resp = test_router()
        .oneshot(req(Method::GET, "/public/health"))
        .await
        .unwrap();
    assert!(resp.headers().contains_key("x-request-id"));
}
