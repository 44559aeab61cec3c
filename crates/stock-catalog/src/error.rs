//! Catalog error types.

use http::StatusCode;
use thiserror::Error;

/// Errors that can occur in catalog operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Malformed id or query parameter.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The upstream reports the resource as missing.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The upstream was unreachable or answered with a non-success status.
    #[error("Upstream error: {message}")]
    Upstream {
        /// Upstream HTTP status, when one was received.
        status: Option<u16>,
        message: String,
    },

    /// Anything else.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// Create an upstream error without a status (network failure, timeout).
    pub fn upstream(message: impl Into<String>) -> Self {
        CatalogError::Upstream {
            status: None,
            message: message.into(),
        }
    }

    /// HTTP status this error surfaces as.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Upstream { .. } | CatalogError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            CatalogError::InvalidArgument("id".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CatalogError::NotFound("product 9".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CatalogError::upstream("connection refused").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            CatalogError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_upstream_display() {
        let err = CatalogError::Upstream {
            status: Some(503),
            message: "HTTP 503: unavailable".into(),
        };
        assert_eq!(err.to_string(), "Upstream error: HTTP 503: unavailable");
    }
}
