//! Health check over the dashboard's own reads.

use serde::Serialize;
use stock_catalog::search::ProductQuery;
use stock_catalog::{CatalogError, CatalogService, CatalogSource};

/// Overall health.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Outcome of one dashboard read.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    /// The read succeeded.
    Healthy,
    /// The upstream answered with an error status.
    Unhealthy,
    /// The upstream could not be reached or answered garbage.
    Error,
}

impl ApiStatus {
    fn of<T>(result: &Result<T, CatalogError>) -> Self {
        match result {
            Ok(_) => ApiStatus::Healthy,
            Err(CatalogError::Upstream {
                status: Some(_), ..
            })
            | Err(CatalogError::NotFound(_)) => ApiStatus::Unhealthy,
            Err(_) => ApiStatus::Error,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApiChecks {
    pub products: ApiStatus,
    pub categories: ApiStatus,
    pub metrics: ApiStatus,
    pub low_stock: ApiStatus,
}

impl ApiChecks {
    fn all_healthy(&self) -> bool {
        [self.products, self.categories, self.metrics, self.low_stock]
            .iter()
            .all(|s| *s == ApiStatus::Healthy)
    }
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub timestamp: String,
    pub version: String,
    pub environment: String,
    pub apis: ApiChecks,
}

impl HealthReport {
    /// 200 when healthy, 503 when degraded.
    pub fn http_status(&self) -> u16 {
        match self.status {
            HealthStatus::Healthy => 200,
            HealthStatus::Degraded => 503,
        }
    }
}

/// Run the four dashboard reads concurrently and report each outcome.
pub async fn check<S: CatalogSource>(
    service: &CatalogService<S>,
    environment: &str,
) -> HealthReport {
    let probe = ProductQuery::new().with_pagination(0, 1);
    let (products, categories, metrics, low_stock) = futures::join!(
        service.list_products(&probe),
        service.categories(),
        service.availability_metrics(),
        service.low_stock(),
    );

    let apis = ApiChecks {
        products: ApiStatus::of(&products),
        categories: ApiStatus::of(&categories),
        metrics: ApiStatus::of(&metrics),
        low_stock: ApiStatus::of(&low_stock),
    };
    let status = if apis.all_healthy() {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    };

    HealthReport {
        status,
        timestamp: stock_catalog::responses::iso_timestamp(service.now()),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: environment.to_string(),
        apis,
    }
}
