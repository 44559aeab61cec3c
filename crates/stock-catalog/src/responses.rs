//! JSON response bodies.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{
    compute_availability_metrics, compute_low_stock, AvailabilityMetrics, CatalogSnapshot,
    LowStockProduct,
};

/// ISO-8601 timestamp with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Body of `GET /api/products/metrics/availability`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResponse {
    /// Catalog size as declared by the upstream.
    pub total_products: u64,
    pub availability_status: AvailabilityMetrics,
    pub last_updated: String,
}

impl MetricsResponse {
    pub fn from_snapshot(snapshot: &CatalogSnapshot, at: DateTime<Utc>) -> Self {
        let total_products = snapshot.declared_total();
        Self {
            total_products,
            availability_status: compute_availability_metrics(&snapshot.products, total_products),
            last_updated: iso_timestamp(at),
        }
    }
}

/// Body of `GET /api/products/low-stock`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LowStockResponse {
    pub products: Vec<LowStockProduct>,
    pub total_low_stock_products: usize,
    pub last_updated: String,
}

impl LowStockResponse {
    pub fn from_snapshot(snapshot: &CatalogSnapshot, at: DateTime<Utc>) -> Self {
        let products = compute_low_stock(&snapshot.products);
        Self {
            total_low_stock_products: products.len(),
            products,
            last_updated: iso_timestamp(at),
        }
    }
}

/// Body of `GET /api/products/categories`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_iso_timestamp() {
        assert_eq!(iso_timestamp(at()), "2024-05-01T12:30:00.000Z");
    }

    #[test]
    fn test_metrics_response_shape() {
        let snapshot = CatalogSnapshot {
            products: vec![
                Product::new(1, "A", "x").with_status("In Stock"),
                Product::new(2, "B", "x").with_status("Low Stock"),
            ],
            total: Some(2),
        };
        let value = serde_json::to_value(MetricsResponse::from_snapshot(&snapshot, at())).unwrap();

        assert_eq!(value["totalProducts"], 2);
        assert_eq!(value["availabilityStatus"]["In Stock"]["count"], 1);
        assert_eq!(value["availabilityStatus"]["Low Stock"]["percentage"], 50.0);
        assert_eq!(value["lastUpdated"], "2024-05-01T12:30:00.000Z");
    }

    #[test]
    fn test_low_stock_response_shape() {
        let snapshot = CatalogSnapshot::new(vec![
            Product::new(1, "A", "x").with_stock(9).with_status("Low Stock"),
            Product::new(2, "B", "x").with_stock(3).with_status("Low Stock"),
            Product::new(3, "C", "x").with_stock(90).with_status("In Stock"),
        ]);
        let response = LowStockResponse::from_snapshot(&snapshot, at());
        assert_eq!(response.total_low_stock_products, 2);
        assert_eq!(response.products[0].id, 2);

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["totalLowStockProducts"], 2);
    }

    #[test]
    fn test_error_body() {
        let body = serde_json::to_string(&ErrorBody::new("Product not found")).unwrap();
        assert_eq!(body, r#"{"error":"Product not found"}"#);
    }
}
