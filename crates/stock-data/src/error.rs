//! HTTP client error types.

use stock_catalog::CatalogError;
use thiserror::Error;

/// Errors that can occur when making HTTP requests.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,
}

impl FetchError {
    /// HTTP status of the upstream response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::ParseError(e.to_string())
    }
}

impl From<FetchError> for CatalogError {
    fn from(e: FetchError) -> Self {
        match e.status() {
            Some(404) => CatalogError::NotFound(e.to_string()),
            status => CatalogError::Upstream {
                status,
                message: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_not_found() {
        let err: CatalogError = FetchError::HttpError {
            status: 404,
            message: "Product with id '999' not found".into(),
        }
        .into();
        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[test]
    fn test_other_status_maps_to_upstream() {
        let err: CatalogError = FetchError::HttpError {
            status: 503,
            message: "unavailable".into(),
        }
        .into();
        assert_eq!(
            err,
            CatalogError::Upstream {
                status: Some(503),
                message: "HTTP 503: unavailable".into(),
            }
        );
    }

    #[test]
    fn test_transport_failures_map_to_upstream() {
        for fetch_err in [
            FetchError::Timeout,
            FetchError::RequestError("connection refused".into()),
            FetchError::ParseError("expected value".into()),
        ] {
            let err: CatalogError = fetch_err.into();
            assert!(matches!(err, CatalogError::Upstream { status: None, .. }));
        }
    }
}
