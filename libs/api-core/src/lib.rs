//! Request validation and response shaping for the Tradebook REST surface.
//!
//! Every resource family follows the same request contract: raw path/query/
//! body input is validated into typed, bounded values before a single
//! service call is made, and the service outcome is mapped onto the wire
//! through one uniform table. This crate owns that contract; it knows
//! nothing about concrete entities.

pub mod outcome;
pub mod pagination;
pub mod problem;
pub mod response;
pub mod validate;

pub use outcome::ServiceOutcome;
pub use pagination::{PageQuery, PageRequest, SortDirection, SortSpec};
pub use problem::{Problem, ProblemResponse};
pub use validate::{RangeFilter, ValidationError};
