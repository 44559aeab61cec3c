//! The upstream catalog boundary.

use async_trait::async_trait;

use crate::catalog::{CatalogSnapshot, Product};
use crate::error::CatalogError;

/// A source of catalog data.
///
/// Futures are not required to be `Send` because the component runtime is
/// single-threaded.
#[async_trait(?Send)]
pub trait CatalogSource {
    /// Fetch every product in one request.
    async fn fetch_catalog(&self) -> Result<CatalogSnapshot, CatalogError>;

    /// Fetch one product. Missing products are `CatalogError::NotFound`.
    async fn fetch_product(&self, id: u64) -> Result<Product, CatalogError>;

    /// Fetch the category list.
    async fn fetch_categories(&self) -> Result<Vec<String>, CatalogError>;
}

/// A fixed, in-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Vec<Product>,
    total: Option<u64>,
    categories: Option<Vec<String>>,
}

impl InMemoryCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            total: None,
            categories: None,
        }
    }

    /// Declare a catalog size different from the number of products.
    pub fn with_declared_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }

    /// Serve a fixed category list instead of deriving one from products.
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = Some(categories);
        self
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

#[async_trait(?Send)]
impl CatalogSource for InMemoryCatalog {
    async fn fetch_catalog(&self) -> Result<CatalogSnapshot, CatalogError> {
        Ok(CatalogSnapshot {
            products: self.products.clone(),
            total: self.total,
        })
    }

    async fn fetch_product(&self, id: u64) -> Result<Product, CatalogError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("product {}", id)))
    }

    async fn fetch_categories(&self) -> Result<Vec<String>, CatalogError> {
        if let Some(categories) = &self.categories {
            return Ok(categories.clone());
        }
        // Distinct, first-seen order.
        let mut categories: Vec<String> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }
        Ok(categories)
    }
}
