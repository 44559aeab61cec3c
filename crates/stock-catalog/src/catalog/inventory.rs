//! Inventory aggregation over a catalog snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{LowStockProduct, Product};

/// Upstream status that puts a product on the low-stock list.
pub const LOW_STOCK_STATUS: &str = "Low Stock";

/// Status key used for products with no availability status.
pub const UNKNOWN_STATUS: &str = "Unknown";

/// Count and share of one availability status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StatusMetric {
    pub count: u64,
    /// Percentage of the declared catalog total, rounded to 2 decimals.
    pub percentage: f64,
}

/// Availability status histogram, keyed by status.
pub type AvailabilityMetrics = BTreeMap<String, StatusMetric>;

/// Round to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Group products by availability status and compute each group's share of
/// `total_products`.
///
/// `total_products` is the upstream-declared catalog size, not
/// `products.len()`. Percentages are 0 when it is 0.
pub fn compute_availability_metrics(products: &[Product], total_products: u64) -> AvailabilityMetrics {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for product in products {
        *counts.entry(product.status()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(status, count)| {
            let percentage = if total_products > 0 {
                round2(count as f64 / total_products as f64 * 100.0)
            } else {
                0.0
            };
            (status.to_string(), StatusMetric { count, percentage })
        })
        .collect()
}

/// Low-stock products, ascending by stock. Ties keep catalog order.
pub fn compute_low_stock(products: &[Product]) -> Vec<LowStockProduct> {
    let mut low: Vec<LowStockProduct> = products
        .iter()
        .filter(|p| p.is_low_stock())
        .map(LowStockProduct::from)
        .collect();
    low.sort_by_key(|p| p.stock);
    low
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64, stock: i64, status: Option<&str>) -> Product {
        let p = Product::new(id, format!("Product {}", id), "misc").with_stock(stock);
        match status {
            Some(s) => p.with_status(s),
            None => p,
        }
    }

    #[test]
    fn test_low_stock_sorted_scenario() {
        let products = vec![
            product(1, 8, Some("Low Stock")),
            product(2, 50, Some("In Stock")),
            product(3, 2, Some("Low Stock")),
        ];
        let low = compute_low_stock(&products);
        let stocks: Vec<i64> = low.iter().map(|p| p.stock).collect();
        assert_eq!(stocks, vec![2, 8]);
        assert!(low.iter().all(|p| p.availability_status == LOW_STOCK_STATUS));
    }

    #[test]
    fn test_low_stock_stable_ties() {
        let products = vec![
            product(10, 4, Some("Low Stock")),
            product(11, 1, Some("Low Stock")),
            product(12, 4, Some("Low Stock")),
        ];
        let ids: Vec<u64> = compute_low_stock(&products).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![11, 10, 12]);
    }

    #[test]
    fn test_low_stock_empty() {
        let products = vec![product(1, 50, Some("In Stock")), product(2, 0, None)];
        assert!(compute_low_stock(&products).is_empty());
    }

    #[test]
    fn test_metrics_counts_and_percentages() {
        let products = vec![
            product(1, 50, Some("In Stock")),
            product(2, 60, Some("In Stock")),
            product(3, 2, Some("Low Stock")),
        ];
        let metrics = compute_availability_metrics(&products, 3);

        assert_eq!(metrics["In Stock"].count, 2);
        assert_eq!(metrics["In Stock"].percentage, 66.67);
        assert_eq!(metrics["Low Stock"].count, 1);
        assert_eq!(metrics["Low Stock"].percentage, 33.33);
    }

    #[test]
    fn test_metrics_never_drop_status() {
        let products = vec![
            product(1, 1, Some("In Stock")),
            product(2, 1, None),
            product(3, 1, Some("")),
            product(4, 0, Some("Out of Stock")),
        ];
        let metrics = compute_availability_metrics(&products, products.len() as u64);

        assert_eq!(metrics[UNKNOWN_STATUS].count, 2);
        let sum: u64 = metrics.values().map(|m| m.count).sum();
        assert_eq!(sum, products.len() as u64);
    }

    #[test]
    fn test_metrics_use_declared_total() {
        let products = vec![product(1, 1, Some("In Stock"))];
        let metrics = compute_availability_metrics(&products, 4);
        assert_eq!(metrics["In Stock"].percentage, 25.0);
    }

    #[test]
    fn test_metrics_zero_total() {
        let products = vec![product(1, 1, Some("In Stock"))];
        let metrics = compute_availability_metrics(&products, 0);
        assert_eq!(metrics["In Stock"].percentage, 0.0);

        assert!(compute_availability_metrics(&[], 0).is_empty());
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.333333), 33.33);
        assert_eq!(round2(66.666666), 66.67);
        assert_eq!(round2(12.0), 12.0);
    }
}
