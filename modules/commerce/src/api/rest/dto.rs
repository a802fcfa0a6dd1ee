//! REST DTOs with serde, plus conversions to and from the contract models.
//! Contract models stay serde-free; everything that crosses the wire lives
//! here.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::contract::model::*;

// ------------------------------------------------------------------- queries

/// Search endpoint query: `q` is required (validated in the handler so the
/// error message is ours, not the deserializer's).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NumericRangeQuery {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntRangeQuery {
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateRangeQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DaysQuery {
    pub days: Option<i64>,
}

// ---------------------------------------------------------------- categories

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryReq {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Full-update body; `id`, when present, must match the path id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCategoryReq {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<Category> for CategoryDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
        }
    }
}

// ----------------------------------------------------------------- customers

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub region_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCustomerReq {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub region_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCustomerReq {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub region_id: Option<i64>,
}

impl From<Customer> for CustomerDto {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            region_id: c.region_id,
        }
    }
}

// ------------------------------------------------------------------ products

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDto {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub price: f64,
    pub category_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductReq {
    pub code: String,
    pub name: String,
    pub price: f64,
    pub category_id: i64,
    #[serde(default)]
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProductReq {
    #[serde(default)]
    pub id: Option<i64>,
    pub code: String,
    pub name: String,
    pub price: f64,
    pub category_id: i64,
    #[serde(default)]
    pub quantity: i64,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            code: p.code,
            name: p.name,
            price: p.price,
            category_id: p.category_id,
            quantity: p.quantity,
        }
    }
}

// ------------------------------------------------------------------ invoices

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDto {
    pub id: i64,
    pub number: String,
    pub customer_id: i64,
    pub issued_on: NaiveDate,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvoiceReq {
    pub number: String,
    pub customer_id: i64,
    pub issued_on: NaiveDate,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateInvoiceReq {
    #[serde(default)]
    pub id: Option<i64>,
    pub number: String,
    pub customer_id: i64,
    pub issued_on: NaiveDate,
    pub total: f64,
}

impl From<Invoice> for InvoiceDto {
    fn from(i: Invoice) -> Self {
        Self {
            id: i.id,
            number: i.number,
            customer_id: i.customer_id,
            issued_on: i.issued_on,
            total: i.total,
        }
    }
}

// ------------------------------------------------------------- invoice items

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceItemDto {
    pub id: i64,
    pub invoice_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvoiceItemReq {
    pub invoice_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateInvoiceItemReq {
    #[serde(default)]
    pub id: Option<i64>,
    pub invoice_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopSellerDto {
    pub product_id: i64,
    pub total_quantity: i64,
}

impl From<InvoiceItem> for InvoiceItemDto {
    fn from(i: InvoiceItem) -> Self {
        Self {
            id: i.id,
            invoice_id: i.invoice_id,
            product_id: i.product_id,
            quantity: i.quantity,
            unit_price: i.unit_price,
        }
    }
}

impl From<TopSeller> for TopSellerDto {
    fn from(t: TopSeller) -> Self {
        Self {
            product_id: t.product_id,
            total_quantity: t.total_quantity,
        }
    }
}

// ------------------------------------------------------------- price history

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceRecordDto {
    pub id: i64,
    pub product_id: i64,
    pub price: f64,
    pub changed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePriceRecordReq {
    pub product_id: i64,
    pub price: f64,
    #[serde(default)]
    pub changed_at: Option<DateTime<Utc>>,
}

impl From<PriceRecord> for PriceRecordDto {
    fn from(r: PriceRecord) -> Self {
        Self {
            id: r.id,
            product_id: r.product_id,
            price: r.price,
            changed_at: r.changed_at,
        }
    }
}

// ------------------------------------------------------------------- regions

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionDto {
    pub id: i64,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRegionReq {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRegionReq {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub code: String,
}

impl From<Region> for RegionDto {
    fn from(r: Region) -> Self {
        Self {
            id: r.id,
            name: r.name,
            code: r.code,
        }
    }
}

// --------------------------------------------------------------- settlements

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementDto {
    pub id: i64,
    pub name: String,
    pub region_id: i64,
    pub has_bank: bool,
    pub is_legal_entity: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSettlementReq {
    pub name: String,
    pub region_id: i64,
    #[serde(default)]
    pub has_bank: bool,
    #[serde(default)]
    pub is_legal_entity: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSettlementReq {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub region_id: i64,
    #[serde(default)]
    pub has_bank: bool,
    #[serde(default)]
    pub is_legal_entity: bool,
}

impl From<Settlement> for SettlementDto {
    fn from(s: Settlement) -> Self {
        Self {
            id: s.id,
            name: s.name,
            region_id: s.region_id,
            has_bank: s.has_bank,
            is_legal_entity: s.is_legal_entity,
        }
    }
}
