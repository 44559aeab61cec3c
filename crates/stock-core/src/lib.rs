//! Core abstractions for the inventory dashboard.
//!
//! This crate provides the fundamental types shared by the HTTP component
//! and the CLI:
//! - `RequestContext` - Typed request parameters
//! - `TimingContext` - Request timing marks
//! - `RouteConfig` / `WorkloadManifest` - Route table and matching
//! - `DashboardConfig` - Runtime configuration

mod config;
mod context;
mod lifecycle;
mod route;
mod workload;

pub use config::*;
pub use context::*;
pub use lifecycle::*;
pub use route::*;
pub use workload::*;
