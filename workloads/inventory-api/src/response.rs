//! JSON responses.

use serde::Serialize;
use stock_catalog::responses::ErrorBody;

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// A buffered HTTP response, independent of the host runtime.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Serialize `value` as the body.
    pub fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self::with_body(status, body),
            Err(e) => Self::error(500, &format!("Failed to serialize response: {}", e)),
        }
    }

    /// An `{"error": message}` body.
    pub fn error(status: u16, message: &str) -> Self {
        let body = serde_json::to_vec(&ErrorBody::new(message))
            .unwrap_or_else(|_| br#"{"error":"Internal error"}"#.to_vec());
        Self::with_body(status, body)
    }

    fn with_body(status: u16, body: Vec<u8>) -> Self {
        Self {
            status,
            headers: vec![("content-type".to_string(), CONTENT_TYPE_JSON.to_string())],
            body,
        }
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// First header with this name (case-insensitive).
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Parse the body back as JSON.
    pub fn json_body(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_slice(&self.body)
    }
}
