//! In-memory domain services backing the demo server and the store-level
//! tests. Each store is a `parking_lot::RwLock` over a small table with a
//! monotonically assigned id. Pagination, sorting and search semantics
//! match what the REST layer promises: results come back in the order the
//! store produced them and the layer never re-sorts.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate, Utc};
use parking_lot::RwLock;

use api_core::{PageRequest, RangeFilter, SortDirection, SortSpec};

use crate::contract::client::*;
use crate::contract::error::ServiceError;
use crate::contract::model::*;

type SvcResult<T> = Result<T, ServiceError>;

struct Table<T> {
    rows: Vec<T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn take_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn page_slice<T: Clone>(rows: Vec<T>, page: PageRequest) -> Vec<T> {
    rows.into_iter()
        .skip(page.offset() as usize)
        .take(page.size as usize)
        .collect()
}

fn apply_direction<T>(rows: &mut [T], direction: SortDirection) {
    if direction == SortDirection::Desc {
        rows.reverse();
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ---------------------------------------------------------------- categories

#[derive(Default)]
pub struct InMemoryCategories {
    inner: RwLock<Table<Category>>,
}

#[async_trait]
impl CategoryApi for InMemoryCategories {
    async fn list(&self, page: PageRequest, sort: Option<SortSpec>) -> SvcResult<Vec<Category>> {
        let mut rows = self.inner.read().rows.clone();
        if let Some(spec) = sort {
            // Unknown sort fields fall back to id order.
            match spec.field.as_str() {
                "name" => rows.sort_by(|a, b| a.name.cmp(&b.name)),
                _ => rows.sort_by_key(|c| c.id),
            }
            apply_direction(&mut rows, spec.direction);
        }
        Ok(page_slice(rows, page))
    }

    async fn find_by_id(&self, id: i64) -> SvcResult<Option<Category>> {
        Ok(self.inner.read().rows.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, new: NewCategory) -> SvcResult<Category> {
        let mut inner = self.inner.write();
        if inner.rows.iter().any(|c| c.name == new.name) {
            return Err(ServiceError::conflict(format!(
                "Category with name '{}' already exists",
                new.name
            )));
        }
        let category = Category {
            id: inner.take_id(),
            name: new.name,
            description: new.description,
        };
        inner.rows.push(category.clone());
        Ok(category)
    }

    async fn update(&self, category: Category) -> SvcResult<Option<Category>> {
        let mut inner = self.inner.write();
        match inner.rows.iter_mut().find(|c| c.id == category.id) {
            Some(row) => {
                *row = category.clone();
                Ok(Some(category))
            }
            None => Ok(None),
        }
    }

    async fn rename(&self, id: i64, name: String) -> SvcResult<Option<Category>> {
        let mut inner = self.inner.write();
        match inner.rows.iter_mut().find(|c| c.id == id) {
            Some(row) => {
                row.name = name;
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> SvcResult<bool> {
        let mut inner = self.inner.write();
        let before = inner.rows.len();
        inner.rows.retain(|c| c.id != id);
        Ok(inner.rows.len() < before)
    }

    async fn search(&self, query: &str, page: PageRequest) -> SvcResult<Vec<Category>> {
        let rows: Vec<_> = self
            .inner
            .read()
            .rows
            .iter()
            .filter(|c| contains_ci(&c.name, query))
            .cloned()
            .collect();
        Ok(page_slice(rows, page))
    }

    async fn exists_by_name(&self, name: &str) -> SvcResult<bool> {
        Ok(self.inner.read().rows.iter().any(|c| c.name == name))
    }

    async fn count(&self) -> SvcResult<u64> {
        Ok(self.inner.read().rows.len() as u64)
    }
}

// ----------------------------------------------------------------- customers

#[derive(Default)]
pub struct InMemoryCustomers {
    inner: RwLock<Table<Customer>>,
}

#[async_trait]
impl CustomerApi for InMemoryCustomers {
    async fn list(&self, page: PageRequest, sort: Option<SortSpec>) -> SvcResult<Vec<Customer>> {
        let mut rows = self.inner.read().rows.clone();
        if let Some(spec) = sort {
            match spec.field.as_str() {
                "name" => rows.sort_by(|a, b| a.name.cmp(&b.name)),
                "email" => rows.sort_by(|a, b| a.email.cmp(&b.email)),
                _ => rows.sort_by_key(|c| c.id),
            }
            apply_direction(&mut rows, spec.direction);
        }
        Ok(page_slice(rows, page))
    }

    async fn find_by_id(&self, id: i64) -> SvcResult<Option<Customer>> {
        Ok(self.inner.read().rows.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, new: NewCustomer) -> SvcResult<Customer> {
        let mut inner = self.inner.write();
        if inner.rows.iter().any(|c| c.email == new.email) {
            return Err(ServiceError::conflict(format!(
                "Customer with email '{}' already exists",
                new.email
            )));
        }
        let customer = Customer {
            id: inner.take_id(),
            name: new.name,
            email: new.email,
            region_id: new.region_id,
        };
        inner.rows.push(customer.clone());
        Ok(customer)
    }

    async fn update(&self, customer: Customer) -> SvcResult<Option<Customer>> {
        let mut inner = self.inner.write();
        match inner.rows.iter_mut().find(|c| c.id == customer.id) {
            Some(row) => {
                *row = customer.clone();
                Ok(Some(customer))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> SvcResult<bool> {
        let mut inner = self.inner.write();
        let before = inner.rows.len();
        inner.rows.retain(|c| c.id != id);
        Ok(inner.rows.len() < before)
    }

    async fn search(&self, query: &str, page: PageRequest) -> SvcResult<Vec<Customer>> {
        let rows: Vec<_> = self
            .inner
            .read()
            .rows
            .iter()
            .filter(|c| contains_ci(&c.name, query) || contains_ci(&c.email, query))
            .cloned()
            .collect();
        Ok(page_slice(rows, page))
    }

    async fn by_letter(&self, letter: char, page: PageRequest) -> SvcResult<Vec<Customer>> {
        let letter = letter.to_lowercase().next().unwrap_or(letter);
        let rows: Vec<_> = self
            .inner
            .read()
            .rows
            .iter()
            .filter(|c| {
                c.name
                    .chars()
                    .next()
                    .map(|first| first.to_lowercase().next() == Some(letter))
                    .unwrap_or(false)
            })
            .cloned()
            .collect();
        Ok(page_slice(rows, page))
    }

    async fn exists_by_email(&self, email: &str) -> SvcResult<bool> {
        Ok(self.inner.read().rows.iter().any(|c| c.email == email))
    }

    async fn count(&self) -> SvcResult<u64> {
        Ok(self.inner.read().rows.len() as u64)
    }
}

// ------------------------------------------------------------------ products

#[derive(Default)]
pub struct InMemoryProducts {
    inner: RwLock<Table<Product>>,
}

#[async_trait]
impl ProductApi for InMemoryProducts {
    async fn list(&self, page: PageRequest, sort: Option<SortSpec>) -> SvcResult<Vec<Product>> {
        let mut rows = self.inner.read().rows.clone();
        if let Some(spec) = sort {
            match spec.field.as_str() {
                "name" => rows.sort_by(|a, b| a.name.cmp(&b.name)),
                "code" => rows.sort_by(|a, b| a.code.cmp(&b.code)),
                "price" => rows.sort_by(|a, b| {
                    a.price
                        .partial_cmp(&b.price)
                        .unwrap_or(std::cmp::Ordering::Equal)
                }),
                _ => rows.sort_by_key(|p| p.id),
            }
            apply_direction(&mut rows, spec.direction);
        }
        Ok(page_slice(rows, page))
    }

    async fn find_by_id(&self, id: i64) -> SvcResult<Option<Product>> {
        Ok(self.inner.read().rows.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, new: NewProduct) -> SvcResult<Product> {
        let mut inner = self.inner.write();
        if inner.rows.iter().any(|p| p.code == new.code) {
            return Err(ServiceError::conflict(format!(
                "Product with code '{}' already exists",
                new.code
            )));
        }
        let product = Product {
            id: inner.take_id(),
            code: new.code,
            name: new.name,
            price: new.price,
            category_id: new.category_id,
            quantity: new.quantity,
        };
        inner.rows.push(product.clone());
        Ok(product)
    }

    async fn update(&self, product: Product) -> SvcResult<Option<Product>> {
        let mut inner = self.inner.write();
        match inner.rows.iter_mut().find(|p| p.id == product.id) {
            Some(row) => {
                *row = product.clone();
                Ok(Some(product))
            }
            None => Ok(None),
        }
    }

    async fn set_price(&self, id: i64, price: f64) -> SvcResult<Option<Product>> {
        let mut inner = self.inner.write();
        match inner.rows.iter_mut().find(|p| p.id == id) {
            Some(row) => {
                row.price = price;
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> SvcResult<bool> {
        let mut inner = self.inner.write();
        let before = inner.rows.len();
        inner.rows.retain(|p| p.id != id);
        Ok(inner.rows.len() < before)
    }

    async fn search(&self, query: &str, page: PageRequest) -> SvcResult<Vec<Product>> {
        let rows: Vec<_> = self
            .inner
            .read()
            .rows
            .iter()
            .filter(|p| contains_ci(&p.name, query) || contains_ci(&p.code, query))
            .cloned()
            .collect();
        Ok(page_slice(rows, page))
    }

    async fn price_range(
        &self,
        range: RangeFilter<f64>,
        page: PageRequest,
    ) -> SvcResult<Vec<Product>> {
        let rows: Vec<_> = self
            .inner
            .read()
            .rows
            .iter()
            .filter(|p| p.price >= range.min && p.price <= range.max)
            .cloned()
            .collect();
        Ok(page_slice(rows, page))
    }

    async fn exists_by_code(&self, code: &str) -> SvcResult<bool> {
        Ok(self.inner.read().rows.iter().any(|p| p.code == code))
    }

    async fn count(&self) -> SvcResult<u64> {
        Ok(self.inner.read().rows.len() as u64)
    }
}

// ------------------------------------------------------------------ invoices

#[derive(Default)]
pub struct InMemoryInvoices {
    inner: RwLock<Table<Invoice>>,
}

#[async_trait]
impl InvoiceApi for InMemoryInvoices {
    async fn list(&self, page: PageRequest, sort: Option<SortSpec>) -> SvcResult<Vec<Invoice>> {
        let mut rows = self.inner.read().rows.clone();
        if let Some(spec) = sort {
            match spec.field.as_str() {
                "number" => rows.sort_by(|a, b| a.number.cmp(&b.number)),
                "issued_on" => rows.sort_by_key(|i| i.issued_on),
                "total" => rows.sort_by(|a, b| {
                    a.total
                        .partial_cmp(&b.total)
                        .unwrap_or(std::cmp::Ordering::Equal)
                }),
                _ => rows.sort_by_key(|i| i.id),
            }
            apply_direction(&mut rows, spec.direction);
        }
        Ok(page_slice(rows, page))
    }

    async fn find_by_id(&self, id: i64) -> SvcResult<Option<Invoice>> {
        Ok(self.inner.read().rows.iter().find(|i| i.id == id).cloned())
    }

    async fn create(&self, new: NewInvoice) -> SvcResult<Invoice> {
        let mut inner = self.inner.write();
        if inner.rows.iter().any(|i| i.number == new.number) {
            return Err(ServiceError::conflict(format!(
                "Invoice with number '{}' already exists",
                new.number
            )));
        }
        let invoice = Invoice {
            id: inner.take_id(),
            number: new.number,
            customer_id: new.customer_id,
            issued_on: new.issued_on,
            total: new.total,
        };
        inner.rows.push(invoice.clone());
        Ok(invoice)
    }

    async fn update(&self, invoice: Invoice) -> SvcResult<Option<Invoice>> {
        let mut inner = self.inner.write();
        match inner.rows.iter_mut().find(|i| i.id == invoice.id) {
            Some(row) => {
                *row = invoice.clone();
                Ok(Some(invoice))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> SvcResult<bool> {
        let mut inner = self.inner.write();
        let before = inner.rows.len();
        inner.rows.retain(|i| i.id != id);
        Ok(inner.rows.len() < before)
    }

    async fn search(&self, query: &str, page: PageRequest) -> SvcResult<Vec<Invoice>> {
        let rows: Vec<_> = self
            .inner
            .read()
            .rows
            .iter()
            .filter(|i| contains_ci(&i.number, query))
            .cloned()
            .collect();
        Ok(page_slice(rows, page))
    }

    async fn date_range(
        &self,
        range: RangeFilter<NaiveDate>,
        page: PageRequest,
    ) -> SvcResult<Vec<Invoice>> {
        let rows: Vec<_> = self
            .inner
            .read()
            .rows
            .iter()
            .filter(|i| i.issued_on >= range.min && i.issued_on <= range.max)
            .cloned()
            .collect();
        Ok(page_slice(rows, page))
    }

    async fn delete_before(&self, date: NaiveDate) -> SvcResult<u64> {
        let mut inner = self.inner.write();
        let before = inner.rows.len();
        inner.rows.retain(|i| i.issued_on >= date);
        Ok((before - inner.rows.len()) as u64)
    }

    async fn count(&self) -> SvcResult<u64> {
        Ok(self.inner.read().rows.len() as u64)
    }
}

// ------------------------------------------------------------- invoice items

#[derive(Default)]
pub struct InMemoryInvoiceItems {
    inner: RwLock<Table<InvoiceItem>>,
}

#[async_trait]
impl InvoiceItemApi for InMemoryInvoiceItems {
    async fn list(&self, page: PageRequest, sort: Option<SortSpec>) -> SvcResult<Vec<InvoiceItem>> {
        let mut rows = self.inner.read().rows.clone();
        if let Some(spec) = sort {
            match spec.field.as_str() {
                "quantity" => rows.sort_by_key(|i| i.quantity),
                _ => rows.sort_by_key(|i| i.id),
            }
            apply_direction(&mut rows, spec.direction);
        }
        Ok(page_slice(rows, page))
    }

    async fn find_by_id(&self, id: i64) -> SvcResult<Option<InvoiceItem>> {
        Ok(self.inner.read().rows.iter().find(|i| i.id == id).cloned())
    }

    async fn create(&self, new: NewInvoiceItem) -> SvcResult<InvoiceItem> {
        let mut inner = self.inner.write();
        let item = InvoiceItem {
            id: inner.take_id(),
            invoice_id: new.invoice_id,
            product_id: new.product_id,
            quantity: new.quantity,
            unit_price: new.unit_price,
        };
        inner.rows.push(item.clone());
        Ok(item)
    }

    async fn update(&self, item: InvoiceItem) -> SvcResult<Option<InvoiceItem>> {
        let mut inner = self.inner.write();
        match inner.rows.iter_mut().find(|i| i.id == item.id) {
            Some(row) => {
                *row = item.clone();
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> SvcResult<bool> {
        let mut inner = self.inner.write();
        let before = inner.rows.len();
        inner.rows.retain(|i| i.id != id);
        Ok(inner.rows.len() < before)
    }

    async fn by_invoice(&self, invoice_id: i64) -> SvcResult<Vec<InvoiceItem>> {
        Ok(self
            .inner
            .read()
            .rows
            .iter()
            .filter(|i| i.invoice_id == invoice_id)
            .cloned()
            .collect())
    }

    async fn top_selling(&self, limit: u64) -> SvcResult<Vec<TopSeller>> {
        use std::collections::HashMap;
        let mut totals: HashMap<i64, i64> = HashMap::new();
        for item in &self.inner.read().rows {
            *totals.entry(item.product_id).or_insert(0) += item.quantity;
        }
        let mut sellers: Vec<TopSeller> = totals
            .into_iter()
            .map(|(product_id, total_quantity)| TopSeller {
                product_id,
                total_quantity,
            })
            .collect();
        sellers.sort_by(|a, b| {
            b.total_quantity
                .cmp(&a.total_quantity)
                .then(a.product_id.cmp(&b.product_id))
        });
        sellers.truncate(limit as usize);
        Ok(sellers)
    }

    async fn quantity_range(
        &self,
        range: RangeFilter<i64>,
        page: PageRequest,
    ) -> SvcResult<Vec<InvoiceItem>> {
        let rows: Vec<_> = self
            .inner
            .read()
            .rows
            .iter()
            .filter(|i| i.quantity >= range.min && i.quantity <= range.max)
            .cloned()
            .collect();
        Ok(page_slice(rows, page))
    }

    async fn count(&self) -> SvcResult<u64> {
        Ok(self.inner.read().rows.len() as u64)
    }
}

// ------------------------------------------------------------- price history

#[derive(Default)]
pub struct InMemoryPriceHistory {
    inner: RwLock<Table<PriceRecord>>,
}

#[async_trait]
impl PriceHistoryApi for InMemoryPriceHistory {
    async fn list(&self, page: PageRequest, sort: Option<SortSpec>) -> SvcResult<Vec<PriceRecord>> {
        let mut rows = self.inner.read().rows.clone();
        if let Some(spec) = sort {
            match spec.field.as_str() {
                "changed_at" => rows.sort_by_key(|r| r.changed_at),
                "price" => rows.sort_by(|a, b| {
                    a.price
                        .partial_cmp(&b.price)
                        .unwrap_or(std::cmp::Ordering::Equal)
                }),
                _ => rows.sort_by_key(|r| r.id),
            }
            apply_direction(&mut rows, spec.direction);
        }
        Ok(page_slice(rows, page))
    }

    async fn find_by_id(&self, id: i64) -> SvcResult<Option<PriceRecord>> {
        Ok(self.inner.read().rows.iter().find(|r| r.id == id).cloned())
    }

    async fn create(&self, new: NewPriceRecord) -> SvcResult<PriceRecord> {
        let mut inner = self.inner.write();
        let record = PriceRecord {
            id: inner.take_id(),
            product_id: new.product_id,
            price: new.price,
            changed_at: new.changed_at,
        };
        inner.rows.push(record.clone());
        Ok(record)
    }

    async fn delete(&self, id: i64) -> SvcResult<bool> {
        let mut inner = self.inner.write();
        let before = inner.rows.len();
        inner.rows.retain(|r| r.id != id);
        Ok(inner.rows.len() < before)
    }

    async fn by_product(&self, product_id: i64) -> SvcResult<Vec<PriceRecord>> {
        Ok(self
            .inner
            .read()
            .rows
            .iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn latest_for_product(&self, product_id: i64) -> SvcResult<Option<PriceRecord>> {
        Ok(self
            .inner
            .read()
            .rows
            .iter()
            .filter(|r| r.product_id == product_id)
            .max_by_key(|r| r.changed_at)
            .cloned())
    }

    async fn recent(&self, days: u64) -> SvcResult<Vec<PriceRecord>> {
        let cutoff = Utc::now() - Duration::days(days as i64);
        Ok(self
            .inner
            .read()
            .rows
            .iter()
            .filter(|r| r.changed_at >= cutoff)
            .cloned()
            .collect())
    }

    async fn count(&self) -> SvcResult<u64> {
        Ok(self.inner.read().rows.len() as u64)
    }
}

// ------------------------------------------------------------------- regions

#[derive(Default)]
pub struct InMemoryRegions {
    inner: RwLock<Table<Region>>,
}

#[async_trait]
impl RegionApi for InMemoryRegions {
    async fn list(&self, page: PageRequest, sort: Option<SortSpec>) -> SvcResult<Vec<Region>> {
        let mut rows = self.inner.read().rows.clone();
        if let Some(spec) = sort {
            match spec.field.as_str() {
                "name" => rows.sort_by(|a, b| a.name.cmp(&b.name)),
                "code" => rows.sort_by(|a, b| a.code.cmp(&b.code)),
                _ => rows.sort_by_key(|r| r.id),
            }
            apply_direction(&mut rows, spec.direction);
        }
        Ok(page_slice(rows, page))
    }

    async fn find_by_id(&self, id: i64) -> SvcResult<Option<Region>> {
        Ok(self.inner.read().rows.iter().find(|r| r.id == id).cloned())
    }

    async fn create(&self, new: NewRegion) -> SvcResult<Region> {
        let mut inner = self.inner.write();
        if inner.rows.iter().any(|r| r.name == new.name) {
            return Err(ServiceError::conflict(format!(
                "Region with name '{}' already exists",
                new.name
            )));
        }
        let region = Region {
            id: inner.take_id(),
            name: new.name,
            code: new.code,
        };
        inner.rows.push(region.clone());
        Ok(region)
    }

    async fn update(&self, region: Region) -> SvcResult<Option<Region>> {
        let mut inner = self.inner.write();
        match inner.rows.iter_mut().find(|r| r.id == region.id) {
            Some(row) => {
                *row = region.clone();
                Ok(Some(region))
            }
            None => Ok(None),
        }
    }

    async fn rename(&self, id: i64, name: String) -> SvcResult<Option<Region>> {
        let mut inner = self.inner.write();
        match inner.rows.iter_mut().find(|r| r.id == id) {
            Some(row) => {
                row.name = name;
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> SvcResult<bool> {
        let mut inner = self.inner.write();
        let before = inner.rows.len();
        inner.rows.retain(|r| r.id != id);
        Ok(inner.rows.len() < before)
    }

    async fn search(&self, query: &str, page: PageRequest) -> SvcResult<Vec<Region>> {
        let rows: Vec<_> = self
            .inner
            .read()
            .rows
            .iter()
            .filter(|r| contains_ci(&r.name, query))
            .cloned()
            .collect();
        Ok(page_slice(rows, page))
    }

    async fn exists_by_name(&self, name: &str) -> SvcResult<bool> {
        Ok(self.inner.read().rows.iter().any(|r| r.name == name))
    }

    async fn count(&self) -> SvcResult<u64> {
        Ok(self.inner.read().rows.len() as u64)
    }
}

// --------------------------------------------------------------- settlements

#[derive(Default)]
pub struct InMemorySettlements {
    inner: RwLock<Table<Settlement>>,
}

#[async_trait]
impl SettlementApi for InMemorySettlements {
    async fn list(&self, page: PageRequest, sort: Option<SortSpec>) -> SvcResult<Vec<Settlement>> {
        let mut rows = self.inner.read().rows.clone();
        if let Some(spec) = sort {
            match spec.field.as_str() {
                "name" => rows.sort_by(|a, b| a.name.cmp(&b.name)),
                _ => rows.sort_by_key(|s| s.id),
            }
            apply_direction(&mut rows, spec.direction);
        }
        Ok(page_slice(rows, page))
    }

    async fn find_by_id(&self, id: i64) -> SvcResult<Option<Settlement>> {
        Ok(self.inner.read().rows.iter().find(|s| s.id == id).cloned())
    }

    async fn create(&self, new: NewSettlement) -> SvcResult<Settlement> {
        let mut inner = self.inner.write();
        if inner
            .rows
            .iter()
            .any(|s| s.name == new.name && s.region_id == new.region_id)
        {
            return Err(ServiceError::conflict(format!(
                "Settlement with name '{}' already exists in this region",
                new.name
            )));
        }
        let settlement = Settlement {
            id: inner.take_id(),
            name: new.name,
            region_id: new.region_id,
            has_bank: new.has_bank,
            is_legal_entity: new.is_legal_entity,
        };
        inner.rows.push(settlement.clone());
        Ok(settlement)
    }

    async fn update(&self, settlement: Settlement) -> SvcResult<Option<Settlement>> {
        let mut inner = self.inner.write();
        match inner.rows.iter_mut().find(|s| s.id == settlement.id) {
            Some(row) => {
                *row = settlement.clone();
                Ok(Some(settlement))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: i64) -> SvcResult<bool> {
        let mut inner = self.inner.write();
        let before = inner.rows.len();
        inner.rows.retain(|s| s.id != id);
        Ok(inner.rows.len() < before)
    }

    async fn search(&self, query: &str, page: PageRequest) -> SvcResult<Vec<Settlement>> {
        let rows: Vec<_> = self
            .inner
            .read()
            .rows
            .iter()
            .filter(|s| contains_ci(&s.name, query))
            .cloned()
            .collect();
        Ok(page_slice(rows, page))
    }

    async fn by_region(&self, region_id: i64) -> SvcResult<Vec<Settlement>> {
        Ok(self
            .inner
            .read()
            .rows
            .iter()
            .filter(|s| s.region_id == region_id)
            .cloned()
            .collect())
    }

    async fn mark_legal_entities_with_bank(&self) -> SvcResult<u64> {
        let mut inner = self.inner.write();
        let mut changed = 0;
        for row in inner.rows.iter_mut() {
            if row.has_bank && !row.is_legal_entity {
                row.is_legal_entity = true;
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn count_with_bank(&self) -> SvcResult<u64> {
        Ok(self.inner.read().rows.iter().filter(|s| s.has_bank).count() as u64)
    }

    async fn count(&self) -> SvcResult<u64> {
        Ok(self.inner.read().rows.len() as u64)
    }
}
