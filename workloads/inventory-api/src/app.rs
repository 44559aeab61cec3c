//! Routing and handlers for the dashboard API.

use std::cell::RefCell;
use std::rc::Rc;

use stock_catalog::catalog::{parse_product_id, OrderRequest};
use stock_catalog::search::ProductQuery;
use stock_catalog::{CatalogError, CatalogService, CatalogSource};
use stock_core::{
    DashboardConfig, Method, RequestContext, RequestId, RouteConfig, RouteMatch, WorkloadManifest,
};
use stock_observability::{MetricsCollector, StructuredLogger};

use crate::health;
use crate::instrumented::InstrumentedCatalog;
use crate::response::ApiResponse;

pub const WORKLOAD: &str = "inventory-api";

/// Handler names used in the route table.
pub mod handlers {
    pub const HEALTH: &str = "health";
    pub const LIST_PRODUCTS: &str = "list_products";
    pub const CATEGORIES: &str = "categories";
    pub const AVAILABILITY_METRICS: &str = "availability_metrics";
    pub const LOW_STOCK: &str = "low_stock";
    pub const GET_PRODUCT: &str = "get_product";
    pub const QUICK_ORDER: &str = "quick_order";
}

/// The route table. Static product routes come before `:id`.
pub fn manifest() -> WorkloadManifest {
    WorkloadManifest::new(WORKLOAD, env!("CARGO_PKG_VERSION"))
        .with_route(RouteConfig::new("/api/health", handlers::HEALTH))
        .with_route(RouteConfig::new("/api/products", handlers::LIST_PRODUCTS))
        .with_route(RouteConfig::new("/api/products/categories", handlers::CATEGORIES))
        .with_route(RouteConfig::new(
            "/api/products/metrics/availability",
            handlers::AVAILABILITY_METRICS,
        ))
        .with_route(RouteConfig::new("/api/products/low-stock", handlers::LOW_STOCK))
        .with_route(RouteConfig::new("/api/products/:id", handlers::GET_PRODUCT))
        .with_route(
            RouteConfig::new("/api/products/:id/orders", handlers::QUICK_ORDER)
                .with_methods(vec!["POST"]),
        )
}

/// Build a request context, keeping the caller's `x-request-id` if it sent one.
pub fn request_context(
    method: Method,
    path_with_query: &str,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
) -> RequestContext {
    let mut ctx = RequestContext::new(method, path_with_query)
        .with_headers(headers)
        .with_body(body);
    let incoming = ctx
        .header("x-request-id")
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from);
    if let Some(id) = incoming {
        ctx.request_id = RequestId::from_string(id);
    }
    ctx
}

/// One request's worth of API state.
pub struct InventoryApi<S: CatalogSource> {
    manifest: WorkloadManifest,
    service: CatalogService<S>,
    environment: String,
    logger: StructuredLogger,
    metrics: Rc<RefCell<MetricsCollector>>,
}

impl<S: CatalogSource> InventoryApi<InstrumentedCatalog<S>> {
    /// Wire a source with upstream timing and failure logging.
    pub fn for_request(source: S, logger: StructuredLogger, config: &DashboardConfig) -> Self {
        let mut collector = MetricsCollector::new(logger.request_id().clone());
        collector.set_workload(WORKLOAD);
        let metrics = Rc::new(RefCell::new(collector));

        let source = InstrumentedCatalog::new(source, Rc::clone(&metrics), logger.clone());
        InventoryApi::new(
            CatalogService::new(source),
            config.environment.clone(),
            logger,
            metrics,
        )
    }
}

impl<S: CatalogSource> InventoryApi<S> {
    pub fn new(
        service: CatalogService<S>,
        environment: impl Into<String>,
        logger: StructuredLogger,
        metrics: Rc<RefCell<MetricsCollector>>,
    ) -> Self {
        Self {
            manifest: manifest(),
            service,
            environment: environment.into(),
            logger,
            metrics,
        }
    }

    /// Route and handle one request.
    pub async fn handle(&self, mut ctx: RequestContext) -> ApiResponse {
        ctx.timing.mark("received");

        let (route, handler) = match self.manifest.resolve(ctx.method, &ctx.path) {
            RouteMatch::Found { route, params } => {
                ctx.params = params;
                (route.pattern.clone(), Ok(route.handler.as_str()))
            }
            RouteMatch::MethodNotAllowed => (ctx.path.clone(), Err((405, "Method not allowed"))),
            RouteMatch::NotFound => (ctx.path.clone(), Err((404, "Not found"))),
        };
        let logger = self.logger.clone().with_route(route.as_str());
        logger
            .info_builder("request started")
            .field("method", ctx.method.as_str())
            .field("path", ctx.path.as_str())
            .emit();

        let response = match handler {
            Ok(handler) => self.dispatch(handler, &ctx, &logger).await,
            Err((status, message)) => ApiResponse::error(status, message),
        };
        ctx.timing.mark("handled");

        let metrics = {
            let mut collector = self.metrics.borrow_mut();
            collector.set_route(route.as_str());
            collector.finish(response.status)
        };
        logger
            .info_builder("request completed")
            .field_i64("status", i64::from(response.status))
            .field_json("metrics", &metrics)
            .duration_ms(
                "handler_ms",
                ctx.timing.between("received", "handled").unwrap_or_default(),
            )
            .duration_ms("duration_ms", ctx.timing.elapsed())
            .emit();

        response
            .with_header("x-request-id", ctx.request_id.to_string())
            .with_header("server-timing", metrics.server_timing())
    }

    async fn dispatch(
        &self,
        handler: &str,
        ctx: &RequestContext,
        logger: &StructuredLogger,
    ) -> ApiResponse {
        match handler {
            handlers::HEALTH => self.health(logger).await,
            handlers::LIST_PRODUCTS => self.list_products(ctx, logger).await,
            handlers::CATEGORIES => {
                let result = self.service.categories().await;
                respond(result, logger, "Failed to fetch categories")
            }
            handlers::AVAILABILITY_METRICS => {
                let result = self.service.availability_metrics().await;
                respond(result, logger, "Failed to fetch availability metrics")
            }
            handlers::LOW_STOCK => {
                let result = self.service.low_stock().await;
                respond(result, logger, "Failed to fetch low stock products")
            }
            handlers::GET_PRODUCT => self.get_product(ctx, logger).await,
            handlers::QUICK_ORDER => self.quick_order(ctx, logger).await,
            _ => ApiResponse::error(404, "Not found"),
        }
    }

    async fn health(&self, logger: &StructuredLogger) -> ApiResponse {
        let report = health::check(&self.service, &self.environment).await;
        if report.http_status() != 200 {
            logger
                .warn_builder("health check degraded")
                .field("apis", serde_json::to_string(&report.apis).unwrap_or_default())
                .emit();
        }
        ApiResponse::json(report.http_status(), &report)
    }

    async fn list_products(&self, ctx: &RequestContext, logger: &StructuredLogger) -> ApiResponse {
        let query = match ProductQuery::from_pairs(&ctx.query) {
            Ok(query) => query,
            Err(e) => return invalid(&e),
        };
        let result = self.service.list_products(&query).await;
        respond(result, logger, "Failed to fetch products")
    }

    async fn get_product(&self, ctx: &RequestContext, logger: &StructuredLogger) -> ApiResponse {
        let raw_id = ctx.param("id").unwrap_or_default();
        match self.service.get_product(raw_id).await {
            Ok(product) => ApiResponse::json(200, &product),
            Err(CatalogError::InvalidArgument(_)) => {
                ApiResponse::error(400, "Invalid product ID provided")
            }
            Err(CatalogError::NotFound(_)) => ApiResponse::error(404, "Product not found"),
            Err(e) => failure(&e, logger, "Failed to fetch product"),
        }
    }

    async fn quick_order(&self, ctx: &RequestContext, logger: &StructuredLogger) -> ApiResponse {
        let raw_id = ctx.param("id").unwrap_or_default();
        if parse_product_id(raw_id).is_err() {
            return ApiResponse::error(400, "Invalid product ID provided");
        }
        let request = match OrderRequest::from_body(&ctx.body) {
            Ok(request) => request,
            Err(e) => return invalid(&e),
        };

        match self.service.quick_order(raw_id, &request).await {
            Ok(receipt) => {
                logger
                    .info_builder("quick order logged")
                    .field_i64("product_id", receipt.product_id as i64)
                    .field("title", receipt.title.as_str())
                    .field_i64("quantity", i64::from(receipt.quantity))
                    .emit();
                ApiResponse::json(202, &receipt)
            }
            Err(CatalogError::NotFound(_)) => ApiResponse::error(404, "Product not found"),
            Err(e @ CatalogError::InvalidArgument(_)) => invalid(&e),
            Err(e) => failure(&e, logger, "Failed to log order"),
        }
    }
}

fn respond<T: serde::Serialize>(
    result: Result<T, CatalogError>,
    logger: &StructuredLogger,
    failed: &str,
) -> ApiResponse {
    match result {
        Ok(body) => ApiResponse::json(200, &body),
        Err(e) => failure(&e, logger, failed),
    }
}

fn failure(error: &CatalogError, logger: &StructuredLogger, message: &str) -> ApiResponse {
    logger
        .error_builder(message)
        .field("error", error.to_string())
        .emit();
    ApiResponse::error(500, message)
}

fn invalid(error: &CatalogError) -> ApiResponse {
    match error {
        CatalogError::InvalidArgument(message) => ApiResponse::error(400, message),
        other => ApiResponse::error(400, &other.to_string()),
    }
}
