//! Dashboard operations over a catalog source.
//!
//! Nothing is cached: every call fetches a fresh snapshot and computes its
//! result from that snapshot alone, so concurrent calls share no state.

use chrono::{DateTime, Utc};

use crate::catalog::{parse_product_id, OrderReceipt, OrderRequest, Product};
use crate::error::CatalogError;
use crate::responses::{iso_timestamp, CategoriesResponse, LowStockResponse, MetricsResponse};
use crate::search::{query_products, ProductPage, ProductQuery};
use crate::source::CatalogSource;

/// The operations exposed by the HTTP component and the CLI.
pub struct CatalogService<S: CatalogSource> {
    source: S,
    clock: fn() -> DateTime<Utc>,
}

impl<S: CatalogSource> CatalogService<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            clock: Utc::now,
        }
    }

    /// Replace the clock used for `lastUpdated` and `loggedAt`.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Filter and paginate the full catalog.
    pub async fn list_products(&self, query: &ProductQuery) -> Result<ProductPage, CatalogError> {
        let snapshot = self.source.fetch_catalog().await?;
        Ok(query_products(snapshot.products, query))
    }

    /// Look up one product by its raw path segment.
    pub async fn get_product(&self, raw_id: &str) -> Result<Product, CatalogError> {
        let id = parse_product_id(raw_id)?;
        self.source.fetch_product(id).await
    }

    pub async fn categories(&self) -> Result<CategoriesResponse, CatalogError> {
        let categories = self.source.fetch_categories().await?;
        Ok(CategoriesResponse { categories })
    }

    pub async fn availability_metrics(&self) -> Result<MetricsResponse, CatalogError> {
        let snapshot = self.source.fetch_catalog().await?;
        Ok(MetricsResponse::from_snapshot(&snapshot, self.now()))
    }

    pub async fn low_stock(&self) -> Result<LowStockResponse, CatalogError> {
        let snapshot = self.source.fetch_catalog().await?;
        Ok(LowStockResponse::from_snapshot(&snapshot, self.now()))
    }

    /// Validate a quick order against the current product. The caller
    /// records the returned receipt; stock is not changed.
    pub async fn quick_order(
        &self,
        raw_id: &str,
        request: &OrderRequest,
    ) -> Result<OrderReceipt, CatalogError> {
        let id = parse_product_id(raw_id)?;
        let quantity = request.quantity()?;
        let product = self.source.fetch_product(id).await?;
        Ok(OrderReceipt::logged(&product, quantity, iso_timestamp(self.now())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogSnapshot, LOW_STOCK_STATUS};
    use crate::source::InMemoryCatalog;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use futures::executor::block_on;
    use std::cell::Cell;

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    fn service() -> CatalogService<InMemoryCatalog> {
        let products = vec![
            Product::new(1, "iPhone 9", "smartphones")
                .with_stock(8)
                .with_status("Low Stock"),
            Product::new(2, "Green Apples", "groceries")
                .with_stock(50)
                .with_status("In Stock"),
            Product::new(3, "iPhone X", "smartphones")
                .with_stock(2)
                .with_status("Low Stock"),
        ];
        CatalogService::new(InMemoryCatalog::new(products)).with_clock(fixed_clock)
    }

    /// A source whose every fetch fails, counting calls.
    #[derive(Default)]
    struct FailingSource {
        calls: Cell<u32>,
    }

    #[async_trait(?Send)]
    impl CatalogSource for FailingSource {
        async fn fetch_catalog(&self) -> Result<CatalogSnapshot, CatalogError> {
            self.calls.set(self.calls.get() + 1);
            Err(CatalogError::upstream("connection refused"))
        }

        async fn fetch_product(&self, _id: u64) -> Result<Product, CatalogError> {
            self.calls.set(self.calls.get() + 1);
            Err(CatalogError::upstream("connection refused"))
        }

        async fn fetch_categories(&self) -> Result<Vec<String>, CatalogError> {
            self.calls.set(self.calls.get() + 1);
            Err(CatalogError::upstream("connection refused"))
        }
    }

    #[test]
    fn test_list_products() {
        let query = ProductQuery::new().with_search("iphone");
        let page = block_on(service().list_products(&query)).unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.products[0].id, 1);
    }

    #[test]
    fn test_get_product() {
        let product = block_on(service().get_product("3")).unwrap();
        assert_eq!(product.title, "iPhone X");
    }

    #[test]
    fn test_get_product_invalid_id() {
        let err = block_on(service().get_product("abc")).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidArgument(_)));
        assert_eq!(err.status_code().as_u16(), 400);
    }

    #[test]
    fn test_get_product_not_found() {
        let err = block_on(service().get_product("404")).unwrap_err();
        assert_eq!(err.status_code().as_u16(), 404);
    }

    #[test]
    fn test_categories() {
        let response = block_on(service().categories()).unwrap();
        assert_eq!(response.categories, vec!["smartphones", "groceries"]);
    }

    #[test]
    fn test_availability_metrics() {
        let response = block_on(service().availability_metrics()).unwrap();
        assert_eq!(response.total_products, 3);
        assert_eq!(response.availability_status["Low Stock"].count, 2);
        assert_eq!(response.last_updated, "2024-05-01T09:00:00.000Z");
    }

    #[test]
    fn test_low_stock() {
        let response = block_on(service().low_stock()).unwrap();
        let stocks: Vec<i64> = response.products.iter().map(|p| p.stock).collect();
        assert_eq!(stocks, vec![2, 8]);
        assert_eq!(response.total_low_stock_products, 2);
        assert!(response
            .products
            .iter()
            .all(|p| p.availability_status == LOW_STOCK_STATUS));
    }

    #[test]
    fn test_quick_order() {
        let request = OrderRequest { quantity: Some(4) };
        let receipt = block_on(service().quick_order("2", &request)).unwrap();
        assert_eq!(receipt.product_id, 2);
        assert_eq!(receipt.title, "Green Apples");
        assert_eq!(receipt.quantity, 4);
        assert_eq!(receipt.status, "logged");
        assert_eq!(receipt.logged_at, "2024-05-01T09:00:00.000Z");
    }

    #[test]
    fn test_quick_order_rejects_before_fetch() {
        let service = CatalogService::new(FailingSource::default());
        let request = OrderRequest { quantity: Some(0) };
        let err = block_on(service.quick_order("1", &request)).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidArgument(_)));
        assert_eq!(service.source().calls.get(), 0);
    }

    #[test]
    fn test_upstream_failure_fails_every_operation() {
        let service = CatalogService::new(FailingSource::default());

        let errors = vec![
            block_on(service.list_products(&ProductQuery::new())).unwrap_err(),
            block_on(service.get_product("1")).unwrap_err(),
            block_on(service.categories()).unwrap_err(),
            block_on(service.availability_metrics()).unwrap_err(),
            block_on(service.low_stock()).unwrap_err(),
        ];
        for err in errors {
            assert!(matches!(err, CatalogError::Upstream { .. }));
            assert_eq!(err.status_code().as_u16(), 500);
        }
    }

    #[test]
    fn test_every_call_refetches() {
        let service = CatalogService::new(FailingSource::default());
        let _ = block_on(service.low_stock());
        let _ = block_on(service.low_stock());
        let _ = block_on(service.availability_metrics());
        assert_eq!(service.source().calls.get(), 3);
    }
}
