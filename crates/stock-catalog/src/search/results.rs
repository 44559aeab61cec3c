//! Filtered, paginated product listings.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::search::ProductQuery;

/// One page of a product listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductPage {
    /// The products on this page, in catalog order.
    pub products: Vec<Product>,
    /// Number of matches before pagination.
    pub total: usize,
    /// Offset that was applied.
    pub skip: usize,
    /// Page size that was applied (0 = unbounded).
    pub limit: usize,
}

impl ProductPage {
    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Get number of items in this page.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether matches remain after this page.
    pub fn has_more(&self) -> bool {
        self.limit != 0 && self.skip.saturating_add(self.limit) < self.total
    }
}

/// Apply the category filter, the title search, then pagination.
///
/// Filtering keeps catalog order. With `limit == 0` every match is returned;
/// otherwise `products` holds matches `[skip, skip + limit)`, which is empty
/// when `skip` is past the end.
pub fn query_products(all: impl IntoIterator<Item = Product>, query: &ProductQuery) -> ProductPage {
    let matches: Vec<Product> = all.into_iter().filter(|p| query.matches(p)).collect();
    let total = matches.len();

    let products = if query.limit == 0 {
        matches
    } else {
        matches
            .into_iter()
            .skip(query.skip)
            .take(query.limit)
            .collect()
    };

    ProductPage {
        products,
        total,
        skip: query.skip,
        limit: query.limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new(1, "iPhone 9", "smartphones"),
            Product::new(2, "iPhone X", "smartphones"),
            Product::new(3, "Samsung Universe 9", "smartphones"),
            Product::new(4, "Apple Juice", "Groceries"),
            Product::new(5, "Green Apples", "groceries"),
            Product::new(6, "Phone Stand", "mobile-accessories"),
            Product::new(7, "Desk Lamp", "home-decoration"),
        ]
    }

    fn ids(page: &ProductPage) -> Vec<u64> {
        page.products.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_no_filters_first_page() {
        let page = query_products(catalog(), &ProductQuery::new());
        assert_eq!(page.total, 7);
        assert_eq!(page.len(), 7);
        assert_eq!(page.limit, 30);
        assert!(!page.has_more());
    }

    #[test]
    fn test_category_filter() {
        let page = query_products(catalog(), &ProductQuery::new().with_category("GROCERIES"));
        assert_eq!(ids(&page), vec![4, 5]);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_search_filter() {
        let page = query_products(catalog(), &ProductQuery::new().with_search("phone"));
        assert_eq!(ids(&page), vec![1, 2, 6]);
    }

    #[test]
    fn test_category_and_search() {
        let query = ProductQuery::new()
            .with_category("smartphones")
            .with_search("phone");
        let page = query_products(catalog(), &query);
        assert_eq!(ids(&page), vec![1, 2]);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_pagination_window() {
        let page = query_products(catalog(), &ProductQuery::new().with_pagination(2, 3));
        assert_eq!(ids(&page), vec![3, 4, 5]);
        assert_eq!(page.total, 7);
        assert!(page.has_more());
    }

    #[test]
    fn test_partial_last_page() {
        let page = query_products(catalog(), &ProductQuery::new().with_pagination(5, 5));
        assert_eq!(ids(&page), vec![6, 7]);
        assert!(!page.has_more());
    }

    #[test]
    fn test_skip_past_end_is_empty() {
        let query = ProductQuery::new()
            .with_search("phone")
            .with_pagination(10, 5);
        let page = query_products(catalog(), &query);
        assert!(page.is_empty());
        assert_eq!(page.total, 3);
        assert_eq!(page.skip, 10);
    }

    #[test]
    fn test_limit_zero_returns_all_matches() {
        let query = ProductQuery::new()
            .with_search("phone")
            .with_pagination(2, 0);
        let page = query_products(catalog(), &query);
        assert_eq!(ids(&page), vec![1, 2, 6]);
        assert_eq!(page.total, page.len());
    }

    #[test]
    fn test_page_length_property() {
        let all = catalog();
        for skip in 0..10 {
            for limit in 1..10 {
                let query = ProductQuery::new().with_pagination(skip, limit);
                let page = query_products(all.clone(), &query);
                let expected = limit.min(page.total.saturating_sub(skip));
                assert_eq!(page.len(), expected, "skip={} limit={}", skip, limit);
            }
        }
    }

    #[test]
    fn test_empty_catalog() {
        let page = query_products(Vec::new(), &ProductQuery::new());
        assert!(page.is_empty());
        assert_eq!(page.total, 0);
    }
}
