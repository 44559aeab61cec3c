//! Product catalog module.
//!
//! Contains the upstream product model, the low-stock projection, the
//! availability aggregation and quick-order receipts.

mod inventory;
mod order;
mod product;

pub use inventory::{
    compute_availability_metrics, compute_low_stock, round2, AvailabilityMetrics, StatusMetric,
    LOW_STOCK_STATUS, UNKNOWN_STATUS,
};
pub use order::{OrderReceipt, OrderRequest};
pub use product::{parse_product_id, CatalogSnapshot, LowStockProduct, Product};
