//! Observability infrastructure for the inventory dashboard.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with request context
//! - `MetricsCollector` - Per-request upstream and total timings

mod logging;
mod metrics;

pub use logging::*;
pub use metrics::*;

// Re-export RequestId and TimingContext from stock-core for convenience
pub use stock_core::{RequestId, TimingContext};
