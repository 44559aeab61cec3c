//! Quick-order requests.
//!
//! Orders are recorded in the request log only. Nothing is sent upstream and
//! stock is not changed.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::CatalogError;

/// Largest quantity a single quick order may request.
pub const MAX_ORDER_QUANTITY: u32 = 10_000;

/// Body of a quick-order request. An empty body orders one unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct OrderRequest {
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl OrderRequest {
    /// Parse a request body. Empty or whitespace-only bodies are accepted.
    pub fn from_body(body: &[u8]) -> Result<Self, CatalogError> {
        if body.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| CatalogError::InvalidArgument(format!("invalid order body: {}", e)))
    }

    /// Requested quantity, validated.
    pub fn quantity(&self) -> Result<u32, CatalogError> {
        match self.quantity.unwrap_or(1) {
            0 => Err(CatalogError::InvalidArgument(
                "quantity must be at least 1".to_string(),
            )),
            q if q > MAX_ORDER_QUANTITY => Err(CatalogError::InvalidArgument(format!(
                "quantity must not exceed {}",
                MAX_ORDER_QUANTITY
            ))),
            q => Ok(q),
        }
    }
}

/// Acknowledgement of a logged quick order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub product_id: u64,
    pub title: String,
    pub quantity: u32,
    pub status: String,
    pub logged_at: String,
}

impl OrderReceipt {
    pub fn logged(product: &Product, quantity: u32, logged_at: String) -> Self {
        Self {
            product_id: product.id,
            title: product.title.clone(),
            quantity,
            status: "logged".to_string(),
            logged_at,
        }
    }
}
