//! Per-request timing metrics.

use std::time::{Duration, Instant};

use serde::Serialize;
use stock_core::RequestId;

/// Metrics for a single request. Logged as the `metrics` field of the
/// completion line.
#[derive(Debug, Clone, Serialize)]
pub struct RequestMetrics {
    /// Request ID for correlation.
    pub request_id: String,
    /// Workload name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workload: Option<String>,
    /// Route path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    /// Number of upstream calls made.
    pub upstream_calls: u32,
    /// Number of upstream calls that failed.
    pub upstream_failures: u32,
    /// Time spent waiting on upstream (microseconds).
    pub upstream_duration_us: u64,
    /// Total request duration (microseconds).
    pub total_duration_us: u64,
    /// HTTP status code.
    pub status_code: u16,
}

impl RequestMetrics {
    /// Render a `server-timing` header value.
    pub fn server_timing(&self) -> String {
        format!(
            "upstream;dur={:.1}, total;dur={:.1}",
            self.upstream_duration_us as f64 / 1000.0,
            self.total_duration_us as f64 / 1000.0
        )
    }
}

/// Collector for request metrics.
#[derive(Debug)]
pub struct MetricsCollector {
    request_id: RequestId,
    workload: Option<String>,
    route: Option<String>,
    start: Instant,
    upstream_calls: u32,
    upstream_failures: u32,
    upstream: Duration,
}

impl MetricsCollector {
    /// Create a new metrics collector.
    pub fn new(request_id: RequestId) -> Self {
        Self {
            request_id,
            workload: None,
            route: None,
            start: Instant::now(),
            upstream_calls: 0,
            upstream_failures: 0,
            upstream: Duration::ZERO,
        }
    }

    /// Set the workload name.
    pub fn set_workload(&mut self, workload: impl Into<String>) {
        self.workload = Some(workload.into());
    }

    /// Set the route path.
    pub fn set_route(&mut self, route: impl Into<String>) {
        self.route = Some(route.into());
    }

    /// Record one upstream call.
    pub fn record_upstream(&mut self, duration: Duration, success: bool) {
        self.upstream_calls += 1;
        if !success {
            self.upstream_failures += 1;
        }
        self.upstream += duration;
    }

    /// Time spent waiting on upstream so far.
    pub fn upstream_duration(&self) -> Duration {
        self.upstream
    }

    /// Finish the request and produce its metrics.
    pub fn finish(&self, status_code: u16) -> RequestMetrics {
        RequestMetrics {
            request_id: self.request_id.to_string(),
            workload: self.workload.clone(),
            route: self.route.clone(),
            upstream_calls: self.upstream_calls,
            upstream_failures: self.upstream_failures,
            upstream_duration_us: self.upstream.as_micros() as u64,
            total_duration_us: self.start.elapsed().as_micros() as u64,
            status_code,
        }
    }
}
