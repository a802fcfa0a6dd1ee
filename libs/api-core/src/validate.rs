//! Pure input validators.
//!
//! All of these run before any service call; the first failure
//! short-circuits the request with a 400 carrying the literal message.

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::problem;

/// A locally detected, request-malformed condition. The wrapped string is
/// the user-facing message, verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        problem::bad_request(self.0).into_response()
    }
}

/// An inclusive-exclusive numeric or date window, `max` strictly above `min`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeFilter<T> {
    pub min: T,
    pub max: T,
}

/// Page index: zero-based, never negative.
pub fn page(raw: i64) -> Result<u64, ValidationError> {
    if raw < 0 {
        return Err(ValidationError::new("Page index cannot be negative"));
    }
    Ok(raw as u64)
}

/// Page size: 1..=100.
pub fn size(raw: i64) -> Result<u64, ValidationError> {
    if !(1..=100).contains(&raw) {
        return Err(ValidationError::new("Page size must be between 1 and 100"));
    }
    Ok(raw as u64)
}

/// Entity identifier: strictly positive.
pub fn id(raw: i64, entity: &str) -> Result<i64, ValidationError> {
    if raw < 1 {
        return Err(ValidationError::new(format!("Invalid {entity} ID")));
    }
    Ok(raw)
}

/// Required string field: non-empty after trimming. Returns the trimmed value.
pub fn required_str(raw: &str, field: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Upper length bound on a string field.
pub fn max_len(value: &str, field: &str, limit: usize) -> Result<(), ValidationError> {
    if value.chars().count() > limit {
        return Err(ValidationError::new(format!(
            "{field} must not exceed {limit} characters"
        )));
    }
    Ok(())
}

/// Strict range: `max > min`. The noun names the ranged quantity in the
/// message ("price", "quantity", "date").
pub fn range<T: PartialOrd>(min: T, max: T, noun: &str) -> Result<RangeFilter<T>, ValidationError> {
    if max <= min {
        return Err(ValidationError::new(format!(
            "Maximum {noun} must be greater than minimum {noun}"
        )));
    }
    Ok(RangeFilter { min, max })
}

/// Exactly one alphabetic character.
pub fn single_letter(raw: &str) -> Result<char, ValidationError> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphabetic() => Ok(c),
        _ => Err(ValidationError::new("Letter must be a single character")),
    }
}

/// Strictly positive decimal (prices, amounts).
pub fn positive_decimal(raw: f64, field: &str) -> Result<f64, ValidationError> {
    if !raw.is_finite() || raw <= 0.0 {
        return Err(ValidationError::new(format!(
            "{field} must be greater than 0"
        )));
    }
    Ok(raw)
}

/// Integer confined to an inclusive window (limit 1..=100, days 1..=365).
pub fn bounded_int(raw: i64, low: i64, high: i64, field: &str) -> Result<i64, ValidationError> {
    if raw < low || raw > high {
        return Err(ValidationError::new(format!(
            "{field} must be between {low} and {high}"
        )));
    }
    Ok(raw)
}
