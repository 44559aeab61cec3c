//! Spin entry point.

use spin_sdk::http::{Method as SpinMethod, Request, Response};
use spin_sdk::{http_component, variables};

use stock_core::{keys, DashboardConfig, Method, RequestId};
use stock_data::{DummyJsonCatalog, FetchClient};
use stock_observability::StructuredLogger;

use crate::app::{request_context, InventoryApi, WORKLOAD};
use crate::response::ApiResponse;

#[http_component]
async fn handle_inventory(req: Request) -> anyhow::Result<Response> {
    let config = match DashboardConfig::from_lookup(|key| variables::get(key).ok()) {
        Ok(config) => config,
        Err(e) => {
            StructuredLogger::new(RequestId::generate())
                .with_workload(WORKLOAD)
                .error_builder("invalid configuration")
                .field("error", e.to_string())
                .field("keys", keys::ALL.join(","))
                .emit();
            return Ok(into_spin(ApiResponse::error(500, "Invalid configuration")));
        }
    };

    let Some(method) = method_of(req.method()) else {
        return Ok(into_spin(ApiResponse::error(405, "Method not allowed")));
    };

    let headers = req
        .headers()
        .map(|(k, v)| {
            (
                k.to_string(),
                String::from_utf8_lossy(v.as_bytes()).into_owned(),
            )
        })
        .collect();
    let ctx = request_context(
        method,
        req.path_and_query().unwrap_or("/"),
        headers,
        req.body().to_vec(),
    );

    let logger = StructuredLogger::new(ctx.request_id.clone())
        .with_workload(WORKLOAD)
        .configured(&config.log_level, &config.log_format);

    let client = FetchClient::new()
        .with_base_url(config.upstream_base())
        .with_timeout(config.upstream.timeout())
        .with_default_header("x-request-id", ctx.request_id.to_string());
    let api = InventoryApi::for_request(DummyJsonCatalog::new(client), logger, &config);

    Ok(into_spin(api.handle(ctx).await))
}

fn method_of(method: &SpinMethod) -> Option<Method> {
    match method {
        SpinMethod::Get => Some(Method::Get),
        SpinMethod::Post => Some(Method::Post),
        SpinMethod::Put => Some(Method::Put),
        SpinMethod::Delete => Some(Method::Delete),
        SpinMethod::Patch => Some(Method::Patch),
        SpinMethod::Head => Some(Method::Head),
        SpinMethod::Options => Some(Method::Options),
        _ => None,
    }
}

fn into_spin(response: ApiResponse) -> Response {
    let mut builder = Response::builder();
    builder.status(response.status);
    for (key, value) in response.headers {
        builder.header(key, value);
    }
    builder.body(response.body).build()
}
