//! Product query and inventory aggregation for the inventory dashboard.
//!
//! Every operation works on a snapshot of the full upstream catalog:
//!
//! - **Catalog**: products, low-stock projections, availability metrics
//! - **Search**: category filter, title search, offset/limit pagination
//! - **Source**: the `CatalogSource` boundary and an in-memory backend
//! - **Service**: the operations exposed over HTTP and the CLI
//!
//! # Example
//!
//! ```rust,ignore
//! use stock_catalog::prelude::*;
//!
//! let service = CatalogService::new(InMemoryCatalog::new(products));
//!
//! let page = service
//!     .list_products(&ProductQuery::new().with_search("phone").with_pagination(0, 10))
//!     .await?;
//! println!("{} of {} matches", page.products.len(), page.total);
//! ```

pub mod error;
pub mod responses;
pub mod service;
pub mod source;

pub mod catalog;
pub mod search;

pub use error::CatalogError;
pub use service::CatalogService;
pub use source::{CatalogSource, InMemoryCatalog};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CatalogError;
    pub use crate::service::CatalogService;
    pub use crate::source::{CatalogSource, InMemoryCatalog};

    // Catalog
    pub use crate::catalog::{
        compute_availability_metrics, compute_low_stock, parse_product_id, AvailabilityMetrics,
        CatalogSnapshot, LowStockProduct, OrderReceipt, OrderRequest, Product, StatusMetric,
    };

    // Search
    pub use crate::search::{query_products, ProductPage, ProductQuery};

    // Responses
    pub use crate::responses::{CategoriesResponse, ErrorBody, LowStockResponse, MetricsResponse};
}
