//! Pure domain models for inter-module communication (no serde).

use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub region_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub region_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub price: f64,
    pub category_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub code: String,
    pub name: String,
    pub price: f64,
    pub category_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub id: i64,
    pub number: String,
    pub customer_id: i64,
    pub issued_on: NaiveDate,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
    pub number: String,
    pub customer_id: i64,
    pub issued_on: NaiveDate,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceItem {
    pub id: i64,
    pub invoice_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoiceItem {
    pub invoice_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
}

/// Aggregated sales volume for one product, highest first.
#[derive(Debug, Clone, PartialEq)]
pub struct TopSeller {
    pub product_id: i64,
    pub total_quantity: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub id: i64,
    pub product_id: i64,
    pub price: f64,
    pub changed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPriceRecord {
    pub product_id: i64,
    pub price: f64,
    pub changed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub id: i64,
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRegion {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settlement {
    pub id: i64,
    pub name: String,
    pub region_id: i64,
    pub has_bank: bool,
    pub is_legal_entity: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSettlement {
    pub name: String,
    pub region_id: i64,
    pub has_bank: bool,
    pub is_legal_entity: bool,
}
