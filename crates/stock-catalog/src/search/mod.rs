//! Search module.
//!
//! Contains the product query, filtering and pagination.

mod query;
mod results;

pub use query::{ProductQuery, DEFAULT_LIMIT};
pub use results::{query_products, ProductPage};
