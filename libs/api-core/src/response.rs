use axum::{http::StatusCode, response::IntoResponse, Json};

/// 200 OK + JSON
pub fn ok_json<T: serde::Serialize>(value: T) -> impl IntoResponse {
    (StatusCode::OK, Json(value))
}

/// 201 Created + JSON
pub fn created_json<T: serde::Serialize>(value: T) -> impl IntoResponse {
    (StatusCode::CREATED, Json(value))
}

/// 204 No Content
pub fn no_content() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

/// 200 OK + text/plain (counts, existence probes, bulk summaries)
pub fn ok_text(value: impl Into<String>) -> impl IntoResponse {
    (StatusCode::OK, value.into())
}
