//! Upstream HTTP responses.

use crate::FetchError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;

/// Longest body excerpt carried in an `HttpError` message.
const MAX_ERROR_EXCERPT: usize = 200;

/// A fully buffered upstream response.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 4xx status.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// 5xx status.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Body as UTF-8 text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("Content-Type")
    }

    /// Turn a non-2xx response into `FetchError::HttpError`.
    ///
    /// The message is the upstream's `{"message": ...}` field when the body
    /// has one, otherwise a short excerpt of the body.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        Err(FetchError::HttpError {
            status: self.status,
            message: self.error_message(),
        })
    }

    fn error_message(&self) -> String {
        #[derive(Deserialize)]
        struct UpstreamMessage {
            message: String,
        }

        if let Ok(upstream) = serde_json::from_slice::<UpstreamMessage>(&self.body) {
            return upstream.message;
        }
        let text = String::from_utf8_lossy(&self.body);
        let text = text.trim();
        if text.is_empty() {
            return "empty response body".to_string();
        }
        text.chars().take(MAX_ERROR_EXCERPT).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    fn make_response_with_headers(status: u16, headers: Vec<(&str, &str)>, body: &[u8]) -> Response {
        let headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Response::new(status, headers, body.to_vec())
    }

    #[test]
    fn test_status_classes() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(299, b"").is_success());
        assert!(!make_response(304, b"").is_success());
        assert!(make_response(404, b"").is_client_error());
        assert!(make_response(503, b"").is_server_error());
        assert!(!make_response(499, b"").is_server_error());
    }

    #[test]
    fn test_json_body() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Page {
            total: u64,
        }

        let resp = make_response(200, br#"{"total": 194, "skip": 0}"#);
        assert_eq!(resp.json::<Page>().unwrap(), Page { total: 194 });

        let resp = make_response(200, b"<html>");
        assert!(matches!(
            resp.json::<Page>(),
            Err(FetchError::ParseError(_))
        ));
    }

    #[test]
    fn test_text_invalid_utf8() {
        assert!(make_response(200, &[0xff, 0xfe]).text().is_err());
        assert_eq!(make_response(200, b"ok").text().unwrap(), "ok");
    }

    #[test]
    fn test_header_case_insensitive() {
        let resp = make_response_with_headers(200, vec![("Content-Type", "application/json")], b"");
        assert_eq!(resp.header("content-type"), Some("application/json"));
        assert_eq!(resp.content_type(), Some("application/json"));
        assert_eq!(resp.header("x-missing"), None);
    }

    #[test]
    fn test_error_for_status_success() {
        let resp = make_response(200, b"{}").error_for_status().unwrap();
        assert_eq!(resp.bytes(), b"{}");
    }

    #[test]
    fn test_error_for_status_uses_upstream_message() {
        let err = make_response(404, br#"{"message": "Product with id '999' not found"}"#)
            .error_for_status()
            .unwrap_err();
        assert_eq!(
            err,
            FetchError::HttpError {
                status: 404,
                message: "Product with id '999' not found".into(),
            }
        );
    }

    #[test]
    fn test_error_for_status_plain_body() {
        let err = make_response(502, b"  Bad Gateway\n").error_for_status().unwrap_err();
        assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");

        let err = make_response(500, b"").error_for_status().unwrap_err();
        assert_eq!(err.to_string(), "HTTP 500: empty response body");
    }

    #[test]
    fn test_error_excerpt_is_bounded() {
        let body = "x".repeat(1000);
        let err = make_response(500, body.as_bytes()).error_for_status().unwrap_err();
        match err {
            FetchError::HttpError { message, .. } => assert_eq!(message.len(), MAX_ERROR_EXCERPT),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
