//! Inventory dashboard JSON API.
//!
//! A Spin HTTP component serving the dashboard's reads over a live
//! DummyJSON-compatible catalog:
//!
//! - `GET /api/products` with search, category and pagination
//! - `GET /api/products/:id`, categories, availability metrics, low stock
//! - `POST /api/products/:id/orders` quick orders, logged only
//! - `GET /api/health` running every read in-process
//!
//! Routing and handlers are host-independent so they run natively in tests;
//! only `component` touches the Spin SDK.

pub mod app;
pub mod health;
pub mod instrumented;
pub mod response;

#[cfg(target_arch = "wasm32")]
mod component;

pub use app::{manifest, request_context, InventoryApi, WORKLOAD};
pub use response::ApiResponse;
