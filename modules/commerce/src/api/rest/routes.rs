//! Route table for the commerce REST surface. One nested router per
//! resource family, all sharing a single `CommerceServices` extension.

use std::sync::Arc;

use axum::{
    routing::{delete, get, patch},
    Extension, Router,
};

use crate::api::rest::handlers::{
    categories, customers, invoice_items, invoices, price_history, products, regions, settlements,
};
use crate::contract::client::{
    CategoryApi, CustomerApi, InvoiceApi, InvoiceItemApi, PriceHistoryApi, ProductApi, RegionApi,
    SettlementApi,
};
use crate::domain::store;

/// Service handles the handlers resolve through the request extension.
pub struct CommerceServices {
    pub categories: Arc<dyn CategoryApi>,
    pub customers: Arc<dyn CustomerApi>,
    pub products: Arc<dyn ProductApi>,
    pub invoices: Arc<dyn InvoiceApi>,
    pub invoice_items: Arc<dyn InvoiceItemApi>,
    pub price_history: Arc<dyn PriceHistoryApi>,
    pub regions: Arc<dyn RegionApi>,
    pub settlements: Arc<dyn SettlementApi>,
}

impl CommerceServices {
    /// Wire every family to its in-memory store.
    pub fn in_memory() -> Self {
        Self {
            categories: Arc::new(store::InMemoryCategories::default()),
            customers: Arc::new(store::InMemoryCustomers::default()),
            products: Arc::new(store::InMemoryProducts::default()),
            invoices: Arc::new(store::InMemoryInvoices::default()),
            invoice_items: Arc::new(store::InMemoryInvoiceItems::default()),
            price_history: Arc::new(store::InMemoryPriceHistory::default()),
            regions: Arc::new(store::InMemoryRegions::default()),
            settlements: Arc::new(store::InMemorySettlements::default()),
        }
    }
}

fn categories_routes() -> Router {
    Router::new()
        .route("/", get(categories::list).post(categories::create))
        .route("/search", get(categories::search))
        .route("/count", get(categories::count))
        .route("/exists/name/{name}", get(categories::exists_by_name))
        .route(
            "/{id}",
            get(categories::get)
                .put(categories::update)
                .delete(categories::remove),
        )
        .route("/{id}/name", patch(categories::rename))
}

fn customers_routes() -> Router {
    Router::new()
        .route("/", get(customers::list).post(customers::create))
        .route("/search", get(customers::search))
        .route("/count", get(customers::count))
        .route("/by-letter/{letter}", get(customers::by_letter))
        .route("/exists/email/{email}", get(customers::exists_by_email))
        .route(
            "/{id}",
            get(customers::get)
                .put(customers::update)
                .delete(customers::remove),
        )
}

fn products_routes() -> Router {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route("/search", get(products::search))
        .route("/count", get(products::count))
        .route("/total/count", get(products::count))
        .route("/price-range", get(products::price_range))
        .route("/exists/code/{code}", get(products::exists_by_code))
        .route(
            "/{id}",
            get(products::get)
                .put(products::update)
                .delete(products::remove),
        )
        .route("/{id}/price", patch(products::set_price))
}

fn invoices_routes() -> Router {
    Router::new()
        .route("/", get(invoices::list).post(invoices::create))
        .route("/search", get(invoices::search))
        .route("/count", get(invoices::count))
        .route("/date-range", get(invoices::date_range))
        .route("/before/{date}", delete(invoices::delete_before))
        .route(
            "/{id}",
            get(invoices::get)
                .put(invoices::update)
                .delete(invoices::remove),
        )
}

fn invoice_items_routes() -> Router {
    Router::new()
        .route("/", get(invoice_items::list).post(invoice_items::create))
        .route("/count", get(invoice_items::count))
        .route("/top-selling", get(invoice_items::top_selling))
        .route("/quantity-range", get(invoice_items::quantity_range))
        .route("/invoice/{invoiceId}", get(invoice_items::by_invoice))
        .route(
            "/{id}",
            get(invoice_items::get)
                .put(invoice_items::update)
                .delete(invoice_items::remove),
        )
}

fn price_history_routes() -> Router {
    Router::new()
        .route("/", get(price_history::list).post(price_history::create))
        .route("/count", get(price_history::count))
        .route("/recent", get(price_history::recent))
        .route("/product/{productId}", get(price_history::by_product))
        .route(
            "/product/{productId}/latest",
            get(price_history::latest_for_product),
        )
        // Price records are immutable; there is no PUT.
        .route(
            "/{id}",
            get(price_history::get).delete(price_history::remove),
        )
}

fn regions_routes() -> Router {
    Router::new()
        .route("/", get(regions::list).post(regions::create))
        .route("/search", get(regions::search))
        .route("/count", get(regions::count))
        .route("/exists/name/{name}", get(regions::exists_by_name))
        .route(
            "/{id}",
            get(regions::get).put(regions::update).delete(regions::remove),
        )
        .route("/{id}/name", patch(regions::rename))
}

fn settlements_routes() -> Router {
    Router::new()
        .route("/", get(settlements::list).post(settlements::create))
        .route("/search", get(settlements::search))
        .route("/count", get(settlements::count))
        .route("/stats/with-bank/count", get(settlements::count_with_bank))
        .route("/mark-with-bank", patch(settlements::mark_legal_entities))
        .route("/region/{regionId}", get(settlements::by_region))
        .route(
            "/{id}",
            get(settlements::get)
                .put(settlements::update)
                .delete(settlements::remove),
        )
}

/// The full commerce router, rooted at the mount point the gateway picks.
pub fn register_routes(services: Arc<CommerceServices>) -> Router {
    Router::new()
        .nest("/categories", categories_routes())
        .nest("/customers", customers_routes())
        .nest("/products", products_routes())
        .nest("/invoices", invoices_routes())
        .nest("/invoice-items", invoice_items_routes())
        .nest("/price-history", price_history_routes())
        .nest("/regions", regions_routes())
        .nest("/settlements", settlements_routes())
        .layer(Extension(services))
}
