//! HTTP gateway: the outer router every request passes through.
//!
//! Two surfaces hang off it. `/public` is open and idempotent (health and
//! build info, GET or PUT, no side effects). `/api` is whatever router the
//! caller mounts, wrapped in HTTP Basic auth. The middleware stack is the
//! ambient plumbing: request ids, tracing, optional timeout and CORS, and
//! a body size ceiling.

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware::from_fn, routing::get, Extension, Json, Router};
use serde::Serialize;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    validate_request::ValidateRequestHeaderLayer,
};

use runtime::config::AppConfig;

pub mod request_id;

const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// What `/public/info` reports.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
}

async fn health() -> &'static str {
    "OK"
}

async fn info(Extension(info): Extension<Arc<ServiceInfo>>) -> Json<ServiceInfo> {
    Json(info.as_ref().clone())
}

fn public_routes(service: ServiceInfo) -> Router {
    // GET and PUT are both accepted and both side-effect free; anything
    // else on these paths gets 405 from the method router.
    Router::new()
        .route("/health", get(health).put(health))
        .route("/info", get(info).put(info))
        .layer(Extension(Arc::new(service)))
}

/// Assemble the outer router around the protected API surface.
pub fn build_router(config: &AppConfig, service: ServiceInfo, api: Router) -> Router {
    let protected = api.layer(ValidateRequestHeaderLayer::basic(
        &config.auth.username,
        &config.auth.password,
    ));

    let mut router = Router::new()
        .nest("/public", public_routes(service))
        .nest("/api", protected);

    // Middleware order, outermost to innermost:
    // PropagateRequestId -> SetRequestId -> extensions -> Trace -> Timeout -> CORS -> BodyLimit
    let x_request_id = request_id::header();
    router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
    router = router.layer(SetRequestIdLayer::new(
        x_request_id.clone(),
        request_id::MakeReqId,
    ));
    router = router.layer(from_fn(request_id::push_req_id_to_extensions));
    router = router.layer(request_id::create_trace_layer());

    if config.server.timeout_sec > 0 {
        router = router.layer(TimeoutLayer::new(Duration::from_secs(
            config.server.timeout_sec,
        )));
    }
    if config.server.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }
    router = router.layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES));

    router
}
