//! Upstream product types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::catalog::inventory::{LOW_STOCK_STATUS, UNKNOWN_STATUS};
use crate::error::CatalogError;

/// A product as served by the upstream catalog.
///
/// Fields the dashboard does not interpret (sku, tags, reviews, dimensions,
/// ...) are kept in `extra` so the upstream document round-trips verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub price: f64,
    pub stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub availability_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Create a product with the required fields and no stock.
    pub fn new(id: u64, title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            category: category.into(),
            price: 0.0,
            stock: 0,
            availability_status: None,
            rating: None,
            brand: None,
            thumbnail: None,
            images: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.availability_status = Some(status.into());
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Availability status, with `"Unknown"` standing in for a missing or
    /// empty value.
    pub fn status(&self) -> &str {
        match self.availability_status.as_deref() {
            Some(status) if !status.is_empty() => status,
            _ => UNKNOWN_STATUS,
        }
    }

    /// Exact, case-sensitive match on the upstream `"Low Stock"` status.
    pub fn is_low_stock(&self) -> bool {
        self.availability_status.as_deref() == Some(LOW_STOCK_STATUS)
    }
}

/// The low-stock view of a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LowStockProduct {
    pub id: u64,
    pub title: String,
    pub stock: i64,
    pub category: String,
    pub price: f64,
    pub availability_status: String,
}

impl From<&Product> for LowStockProduct {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            stock: product.stock,
            category: product.category.clone(),
            price: product.price,
            availability_status: product.status().to_string(),
        }
    }
}

/// One fetch of the full upstream catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    /// Catalog size as declared by the upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

impl CatalogSnapshot {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            total: None,
        }
    }

    /// Catalog size as declared by the upstream, or the number of fetched
    /// products when the upstream did not declare one.
    pub fn declared_total(&self) -> u64 {
        self.total.unwrap_or(self.products.len() as u64)
    }
}

/// Parse a product id path segment. Only non-negative integers are valid.
pub fn parse_product_id(raw: &str) -> Result<u64, CatalogError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CatalogError::InvalidArgument(format!(
            "product id must be a non-negative integer, got '{}'",
            raw
        )));
    }
    raw.parse()
        .map_err(|_| CatalogError::InvalidArgument(format!("product id out of range: '{}'", raw)))
}
