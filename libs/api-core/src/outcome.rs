//! Service outcome to wire response mapping.
//!
//! A service call ends in exactly one of three ways: a value, an absent
//! value, or an asynchronous failure. Handlers hand the outcome to one of
//! the mappers below together with the entity's display name ("Category",
//! "Invoice item"), and the mapper applies the uniform status/body table.

use std::fmt;

use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::problem;
use crate::response::{created_json, no_content, ok_json, ok_text};

/// The result of one service invocation, consumed exactly once by a mapper.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceOutcome<T> {
    Success(T),
    Empty,
    Failure(String),
}

impl<T> ServiceOutcome<T> {
    /// From a finder returning an optional value.
    pub fn from_optional<E: fmt::Display>(res: Result<Option<T>, E>) -> Self {
        match res {
            Ok(Some(v)) => Self::Success(v),
            Ok(None) => Self::Empty,
            Err(e) => Self::Failure(e.to_string()),
        }
    }

    /// From an operation that always yields a value on success.
    pub fn from_result<E: fmt::Display>(res: Result<T, E>) -> Self {
        match res {
            Ok(v) => Self::Success(v),
            Err(e) => Self::Failure(e.to_string()),
        }
    }
}

fn lower(entity: &str) -> String {
    entity.to_lowercase()
}

/// Single-entity read: 200 / 404 "{Entity} not found" / 500.
pub fn fetched<T: Serialize>(entity: &str, outcome: ServiceOutcome<T>) -> Response {
    match outcome {
        ServiceOutcome::Success(v) => ok_json(v).into_response(),
        ServiceOutcome::Empty => problem::not_found(format!("{entity} not found")).into_response(),
        ServiceOutcome::Failure(cause) => {
            tracing::error!(entity, %cause, "service failure on read");
            problem::internal_error(format!("Error retrieving {}: {cause}", lower(entity)))
                .into_response()
        }
    }
}

/// Create: 201 with the stored entity.
pub fn created<T: Serialize>(entity: &str, outcome: ServiceOutcome<T>) -> Response {
    match outcome {
        ServiceOutcome::Success(v) => created_json(v).into_response(),
        ServiceOutcome::Empty | ServiceOutcome::Failure(_) => {
            let cause = match outcome_cause(&outcome) {
                Some(c) => c.to_string(),
                None => "no value returned".to_string(),
            };
            tracing::error!(entity, %cause, "service failure on create");
            problem::internal_error(format!("Error creating {}: {cause}", lower(entity)))
                .into_response()
        }
    }
}

/// Full or partial update: 200 / 404 / 500.
pub fn updated<T: Serialize>(entity: &str, outcome: ServiceOutcome<T>) -> Response {
    match outcome {
        ServiceOutcome::Success(v) => ok_json(v).into_response(),
        ServiceOutcome::Empty => problem::not_found(format!("{entity} not found")).into_response(),
        ServiceOutcome::Failure(cause) => {
            tracing::error!(entity, %cause, "service failure on update");
            problem::internal_error(format!("Error updating {}: {cause}", lower(entity)))
                .into_response()
        }
    }
}

/// Delete by id: 204 on true, 404 "{Entity} not found: {id}" on false.
pub fn deleted(entity: &str, id: i64, outcome: ServiceOutcome<bool>) -> Response {
    match outcome {
        ServiceOutcome::Success(true) => no_content().into_response(),
        ServiceOutcome::Success(false) | ServiceOutcome::Empty => {
            problem::not_found(format!("{entity} not found: {id}")).into_response()
        }
        ServiceOutcome::Failure(cause) => {
            tracing::error!(entity, id, %cause, "service failure on delete");
            problem::internal_error(format!("Error deleting {}: {cause}", lower(entity)))
                .into_response()
        }
    }
}

/// List read: 200 with the list in service order, never re-sorted here.
pub fn listed<T: Serialize>(entities: &str, outcome: ServiceOutcome<Vec<T>>) -> Response {
    match outcome {
        ServiceOutcome::Success(items) => ok_json(items).into_response(),
        // An absent list is an empty list, not a 404.
        ServiceOutcome::Empty => ok_json(Vec::<T>::new()).into_response(),
        ServiceOutcome::Failure(cause) => {
            tracing::error!(entities, %cause, "service failure on list");
            problem::internal_error(format!("Error retrieving {}: {cause}", lower(entities)))
                .into_response()
        }
    }
}

/// Existence probe: plain-text "true"/"false".
pub fn exists(entity: &str, outcome: ServiceOutcome<bool>) -> Response {
    match outcome {
        ServiceOutcome::Success(v) => ok_text(v.to_string()).into_response(),
        ServiceOutcome::Empty => ok_text("false").into_response(),
        ServiceOutcome::Failure(cause) => {
            tracing::error!(entity, %cause, "service failure on existence probe");
            problem::internal_error(format!("Error retrieving {}: {cause}", lower(entity)))
                .into_response()
        }
    }
}

/// Count/stats endpoint: plain-text numeral.
pub fn counted(entities: &str, outcome: ServiceOutcome<u64>) -> Response {
    match outcome {
        ServiceOutcome::Success(n) => ok_text(n.to_string()).into_response(),
        ServiceOutcome::Empty => ok_text("0").into_response(),
        ServiceOutcome::Failure(cause) => {
            tracing::error!(entities, %cause, "service failure on count");
            problem::internal_error(format!("Error retrieving {}: {cause}", lower(entities)))
                .into_response()
        }
    }
}

/// Verb for bulk operation summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkVerb {
    Deleted,
    Updated,
}

impl BulkVerb {
    fn summary(self) -> &'static str {
        match self {
            Self::Deleted => "Deleted",
            Self::Updated => "Updated",
        }
    }

    fn gerund(self) -> &'static str {
        match self {
            Self::Deleted => "deleting",
            Self::Updated => "updating",
        }
    }
}

/// Bulk update/delete: 200 "{Verb} {count} {entities}".
pub fn bulk(verb: BulkVerb, entities: &str, outcome: ServiceOutcome<u64>) -> Response {
    match outcome {
        ServiceOutcome::Success(n) => {
            ok_text(format!("{} {n} {}", verb.summary(), lower(entities))).into_response()
        }
        ServiceOutcome::Empty => {
            ok_text(format!("{} 0 {}", verb.summary(), lower(entities))).into_response()
        }
        ServiceOutcome::Failure(cause) => {
            tracing::error!(entities, %cause, "service failure on bulk operation");
            problem::internal_error(format!(
                "Error {} {}: {cause}",
                verb.gerund(),
                lower(entities)
            ))
            .into_response()
        }
    }
}

fn outcome_cause<T>(outcome: &ServiceOutcome<T>) -> Option<&str> {
    match outcome {
        ServiceOutcome::Failure(c) => Some(c.as_str()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::to_bytes, http::StatusCode};

    async fn body_string(resp: Response) -> String {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[derive(Serialize, Clone)]
    struct Widget {
        id: i64,
        name: &'static str,
    }

    #[tokio::test]
    async fn fetched_maps_three_ways() {
        let hit = fetched(
            "Category",
            ServiceOutcome::Success(Widget { id: 1, name: "a" }),
        );
        assert_eq!(hit.status(), StatusCode::OK);

        let miss = fetched::<Widget>("Category", ServiceOutcome::Empty);
        assert_eq!(miss.status(), StatusCode::NOT_FOUND);
        assert!(body_string(miss).await.contains("Category not found"));

        let boom = fetched::<Widget>("Category", ServiceOutcome::Failure("db down".into()));
        assert_eq!(boom.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_string(boom)
            .await
            .contains("Error retrieving category"));
    }

    #[tokio::test]
    async fn deleted_maps_bool() {
        let gone = deleted("Region", 4, ServiceOutcome::Success(true));
        assert_eq!(gone.status(), StatusCode::NO_CONTENT);

        let missing = deleted("Region", 4, ServiceOutcome::Success(false));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert!(body_string(missing).await.contains("Region not found: 4"));
    }

    #[tokio::test]
    async fn listed_preserves_service_order() {
        let items = vec![
            Widget {
                id: 1,
                name: "Electronics",
            },
            Widget { id: 2, name: "Books" },
        ];
        let resp = listed("Categories", ServiceOutcome::Success(items));
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_string(resp).await;
        let electronics = body.find("Electronics").unwrap();
        let books = body.find("Books").unwrap();
        assert!(electronics < books);
    }

    #[tokio::test]
    async fn exists_and_counted_are_plain_text() {
        let yes = exists("Category", ServiceOutcome::Success(true));
        assert_eq!(body_string(yes).await, "true");

        let n = counted("Products", ServiceOutcome::Success(42));
        assert_eq!(body_string(n).await, "42");
    }

    #[tokio::test]
    async fn bulk_formats_summary() {
        let resp = bulk(BulkVerb::Deleted, "Invoices", ServiceOutcome::Success(3));
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_string(resp).await, "Deleted 3 invoices");

        let fail = bulk(
            BulkVerb::Updated,
            "Settlements",
            ServiceOutcome::Failure("oops".into()),
        );
        assert_eq!(fail.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_string(fail).await.contains("Error updating settlements"));
    }

    #[test]
    fn from_optional_covers_all_arms() {
        let ok: ServiceOutcome<i32> = ServiceOutcome::from_optional(Ok::<_, String>(Some(1)));
        assert_eq!(ok, ServiceOutcome::Success(1));
        let empty: ServiceOutcome<i32> = ServiceOutcome::from_optional(Ok::<_, String>(None));
        assert_eq!(empty, ServiceOutcome::Empty);
        let fail: ServiceOutcome<i32> = ServiceOutcome::from_optional(Err("bad".to_string()));
        assert_eq!(fail, ServiceOutcome::Failure("bad".into()));
    }
}
