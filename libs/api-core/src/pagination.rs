//! Paging and sorting request contract shared by every list endpoint.

use serde::Deserialize;

use crate::validate::{self, ValidationError};

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

/// A validated page window. Only obtainable through [`PageQuery`] or the
/// validators, so `page >= 0` and `1 <= size <= 100` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

impl PageRequest {
    pub fn new(page: u64, size: u64) -> Self {
        Self { page, size }
    }

    /// Item offset of the first element on this page.
    pub fn offset(&self) -> u64 {
        self.page * self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Sort request, passed through to the service untouched. Field names are
/// not validated at this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

/// Raw list-endpoint query parameters as they arrive off the wire.
/// Integers are signed on purpose: a negative page must reach the
/// validator, not fail deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort: Option<String>,
    pub direction: Option<SortDirection>,
}

impl PageQuery {
    /// Validate into a typed page window. Missing parameters fall back to
    /// page 0 / size 20.
    pub fn page_request(&self) -> Result<PageRequest, ValidationError> {
        let page = validate::page(self.page.unwrap_or(0))?;
        let size = validate::size(self.size.unwrap_or(DEFAULT_PAGE_SIZE as i64))?;
        Ok(PageRequest { page, size })
    }

    /// Sort spec, if a sort field was requested. Direction defaults to
    /// ascending.
    pub fn sort_spec(&self) -> Option<SortSpec> {
        self.sort.as_ref().map(|field| SortSpec {
            field: field.clone(),
            direction: self.direction.unwrap_or_default(),
        })
    }
}
