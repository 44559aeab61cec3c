//! Upstream call timing and failure logging.

use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use std::time::Instant;

use async_trait::async_trait;
use stock_catalog::catalog::{CatalogSnapshot, Product};
use stock_catalog::{CatalogError, CatalogSource};
use stock_observability::{MetricsCollector, StructuredLogger};

/// Wraps a source so every fetch is timed into the request's metrics and
/// every failure is logged.
pub struct InstrumentedCatalog<S> {
    inner: S,
    metrics: Rc<RefCell<MetricsCollector>>,
    logger: StructuredLogger,
}

impl<S: CatalogSource> InstrumentedCatalog<S> {
    pub fn new(inner: S, metrics: Rc<RefCell<MetricsCollector>>, logger: StructuredLogger) -> Self {
        Self {
            inner,
            metrics,
            logger,
        }
    }

    async fn observe<T, F>(&self, operation: &str, fetch: F) -> Result<T, CatalogError>
    where
        F: Future<Output = Result<T, CatalogError>>,
    {
        let start = Instant::now();
        let result = fetch.await;
        let elapsed = start.elapsed();

        self.metrics
            .borrow_mut()
            .record_upstream(elapsed, result.is_ok());

        match &result {
            Ok(_) => self
                .logger
                .debug_builder("upstream fetch")
                .field("operation", operation)
                .duration_ms("duration_ms", elapsed)
                .emit(),
            Err(e) => self
                .logger
                .warn_builder("upstream fetch failed")
                .field("operation", operation)
                .field("error", e.to_string())
                .duration_ms("duration_ms", elapsed)
                .emit(),
        }
        result
    }
}

#[async_trait(?Send)]
impl<S: CatalogSource> CatalogSource for InstrumentedCatalog<S> {
    async fn fetch_catalog(&self) -> Result<CatalogSnapshot, CatalogError> {
        self.observe("fetch_catalog", self.inner.fetch_catalog()).await
    }

    async fn fetch_product(&self, id: u64) -> Result<Product, CatalogError> {
        self.observe("fetch_product", self.inner.fetch_product(id)).await
    }

    async fn fetch_categories(&self) -> Result<Vec<String>, CatalogError> {
        self.observe("fetch_categories", self.inner.fetch_categories()).await
    }
}
