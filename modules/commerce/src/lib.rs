//! Commerce module: the eight resource families of the Tradebook domain
//! (categories, customers, products, invoices, invoice items, price
//! history, regions, settlements).
//!
//! Layout follows the contract / domain / api split: `contract` holds the
//! plain models and the service traits other code programs against,
//! `domain` holds the in-memory service implementations, `api::rest` the
//! HTTP surface.

pub mod api;
pub mod contract;
pub mod domain;

pub use api::rest::routes::{register_routes, CommerceServices};
