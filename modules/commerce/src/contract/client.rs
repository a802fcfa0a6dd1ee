//! Service traits the REST layer programs against, one per resource
//! family. Every operation is asynchronous and never panics across the
//! boundary; absence is `Ok(None)` / `Ok(false)`, unexpected trouble is
//! `Err(ServiceError)`.

use async_trait::async_trait;
use chrono::NaiveDate;

use api_core::{PageRequest, RangeFilter, SortSpec};

use crate::contract::error::ServiceError;
use crate::contract::model::*;

type SvcResult<T> = Result<T, ServiceError>;

#[async_trait]
pub trait CategoryApi: Send + Sync {
    async fn list(&self, page: PageRequest, sort: Option<SortSpec>) -> SvcResult<Vec<Category>>;
    async fn find_by_id(&self, id: i64) -> SvcResult<Option<Category>>;
    async fn create(&self, new: NewCategory) -> SvcResult<Category>;
    /// Full update; `None` when no category with that id exists.
    async fn update(&self, category: Category) -> SvcResult<Option<Category>>;
    async fn rename(&self, id: i64, name: String) -> SvcResult<Option<Category>>;
    async fn delete(&self, id: i64) -> SvcResult<bool>;
    async fn search(&self, query: &str, page: PageRequest) -> SvcResult<Vec<Category>>;
    async fn exists_by_name(&self, name: &str) -> SvcResult<bool>;
    async fn count(&self) -> SvcResult<u64>;
}

#[async_trait]
pub trait CustomerApi: Send + Sync {
    async fn list(&self, page: PageRequest, sort: Option<SortSpec>) -> SvcResult<Vec<Customer>>;
    async fn find_by_id(&self, id: i64) -> SvcResult<Option<Customer>>;
    async fn create(&self, new: NewCustomer) -> SvcResult<Customer>;
    async fn update(&self, customer: Customer) -> SvcResult<Option<Customer>>;
    async fn delete(&self, id: i64) -> SvcResult<bool>;
    async fn search(&self, query: &str, page: PageRequest) -> SvcResult<Vec<Customer>>;
    /// Customers whose name starts with the given letter, case-insensitive.
    async fn by_letter(&self, letter: char, page: PageRequest) -> SvcResult<Vec<Customer>>;
    async fn exists_by_email(&self, email: &str) -> SvcResult<bool>;
    async fn count(&self) -> SvcResult<u64>;
}

#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn list(&self, page: PageRequest, sort: Option<SortSpec>) -> SvcResult<Vec<Product>>;
    async fn find_by_id(&self, id: i64) -> SvcResult<Option<Product>>;
    async fn create(&self, new: NewProduct) -> SvcResult<Product>;
    async fn update(&self, product: Product) -> SvcResult<Option<Product>>;
    async fn set_price(&self, id: i64, price: f64) -> SvcResult<Option<Product>>;
    async fn delete(&self, id: i64) -> SvcResult<bool>;
    async fn search(&self, query: &str, page: PageRequest) -> SvcResult<Vec<Product>>;
    async fn price_range(
        &self,
        range: RangeFilter<f64>,
        page: PageRequest,
    ) -> SvcResult<Vec<Product>>;
    async fn exists_by_code(&self, code: &str) -> SvcResult<bool>;
    async fn count(&self) -> SvcResult<u64>;
}

#[async_trait]
pub trait InvoiceApi: Send + Sync {
    async fn list(&self, page: PageRequest, sort: Option<SortSpec>) -> SvcResult<Vec<Invoice>>;
    async fn find_by_id(&self, id: i64) -> SvcResult<Option<Invoice>>;
    async fn create(&self, new: NewInvoice) -> SvcResult<Invoice>;
    async fn update(&self, invoice: Invoice) -> SvcResult<Option<Invoice>>;
    async fn delete(&self, id: i64) -> SvcResult<bool>;
    /// Substring match on the invoice number.
    async fn search(&self, query: &str, page: PageRequest) -> SvcResult<Vec<Invoice>>;
    async fn date_range(
        &self,
        range: RangeFilter<NaiveDate>,
        page: PageRequest,
    ) -> SvcResult<Vec<Invoice>>;
    /// Bulk delete of invoices issued strictly before the date; returns the
    /// number removed.
    async fn delete_before(&self, date: NaiveDate) -> SvcResult<u64>;
    async fn count(&self) -> SvcResult<u64>;
}

#[async_trait]
pub trait InvoiceItemApi: Send + Sync {
    async fn list(&self, page: PageRequest, sort: Option<SortSpec>) -> SvcResult<Vec<InvoiceItem>>;
    async fn find_by_id(&self, id: i64) -> SvcResult<Option<InvoiceItem>>;
    async fn create(&self, new: NewInvoiceItem) -> SvcResult<InvoiceItem>;
    async fn update(&self, item: InvoiceItem) -> SvcResult<Option<InvoiceItem>>;
    async fn delete(&self, id: i64) -> SvcResult<bool>;
    async fn by_invoice(&self, invoice_id: i64) -> SvcResult<Vec<InvoiceItem>>;
    /// Products by total quantity sold, highest first, at most `limit`.
    async fn top_selling(&self, limit: u64) -> SvcResult<Vec<TopSeller>>;
    async fn quantity_range(
        &self,
        range: RangeFilter<i64>,
        page: PageRequest,
    ) -> SvcResult<Vec<InvoiceItem>>;
    async fn count(&self) -> SvcResult<u64>;
}

#[async_trait]
pub trait PriceHistoryApi: Send + Sync {
    async fn list(&self, page: PageRequest, sort: Option<SortSpec>) -> SvcResult<Vec<PriceRecord>>;
    async fn find_by_id(&self, id: i64) -> SvcResult<Option<PriceRecord>>;
    async fn create(&self, new: NewPriceRecord) -> SvcResult<PriceRecord>;
    async fn delete(&self, id: i64) -> SvcResult<bool>;
    async fn by_product(&self, product_id: i64) -> SvcResult<Vec<PriceRecord>>;
    async fn latest_for_product(&self, product_id: i64) -> SvcResult<Option<PriceRecord>>;
    /// Records changed within the last `days` days.
    async fn recent(&self, days: u64) -> SvcResult<Vec<PriceRecord>>;
    async fn count(&self) -> SvcResult<u64>;
}

#[async_trait]
pub trait RegionApi: Send + Sync {
    async fn list(&self, page: PageRequest, sort: Option<SortSpec>) -> SvcResult<Vec<Region>>;
    async fn find_by_id(&self, id: i64) -> SvcResult<Option<Region>>;
    async fn create(&self, new: NewRegion) -> SvcResult<Region>;
    async fn update(&self, region: Region) -> SvcResult<Option<Region>>;
    async fn rename(&self, id: i64, name: String) -> SvcResult<Option<Region>>;
    async fn delete(&self, id: i64) -> SvcResult<bool>;
    async fn search(&self, query: &str, page: PageRequest) -> SvcResult<Vec<Region>>;
    async fn exists_by_name(&self, name: &str) -> SvcResult<bool>;
    async fn count(&self) -> SvcResult<u64>;
}

#[async_trait]
pub trait SettlementApi: Send + Sync {
    async fn list(&self, page: PageRequest, sort: Option<SortSpec>) -> SvcResult<Vec<Settlement>>;
    async fn find_by_id(&self, id: i64) -> SvcResult<Option<Settlement>>;
    async fn create(&self, new: NewSettlement) -> SvcResult<Settlement>;
    async fn update(&self, settlement: Settlement) -> SvcResult<Option<Settlement>>;
    async fn delete(&self, id: i64) -> SvcResult<bool>;
    async fn search(&self, query: &str, page: PageRequest) -> SvcResult<Vec<Settlement>>;
    async fn by_region(&self, region_id: i64) -> SvcResult<Vec<Settlement>>;
    /// Mark every settlement with a bank as a legal entity; returns the
    /// number of settlements changed.
    async fn mark_legal_entities_with_bank(&self) -> SvcResult<u64>;
    async fn count_with_bank(&self) -> SvcResult<u64>;
    async fn count(&self) -> SvcResult<u64>;
}
