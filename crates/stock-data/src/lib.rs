//! Outbound HTTP for the inventory dashboard.
//!
//! `FetchClient` sends through Spin's outbound HTTP inside the component and
//! through `reqwest` everywhere else, so the CLI and the component share one
//! client API. `DummyJsonCatalog` is the upstream `CatalogSource` built on it.
//!
//! # Example
//!
//! ```rust,ignore
//! use stock_data::{DummyJsonCatalog, FetchClient};
//!
//! let client = FetchClient::new()
//!     .with_base_url("https://dummyjson.com")
//!     .with_timeout(Duration::from_secs(10));
//!
//! let snapshot = DummyJsonCatalog::new(client).fetch_catalog().await?;
//! ```

mod catalog;
mod error;
mod request;
mod response;

pub use catalog::DummyJsonCatalog;
pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;

use std::collections::HashMap;
use std::time::Duration;

/// Timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for upstream requests.
#[derive(Debug, Clone)]
pub struct FetchClient {
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    timeout: Duration,
    #[cfg(not(target_arch = "wasm32"))]
    http: reqwest::Client,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    pub fn new() -> Self {
        Self {
            base_url: None,
            default_headers: HashMap::new(),
            timeout: DEFAULT_TIMEOUT,
            #[cfg(not(target_arch = "wasm32"))]
            http: reqwest::Client::new(),
        }
    }

    /// Prefix relative request paths with `base_url`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a header sent with every request.
    pub fn with_default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers
            .insert(key.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Per-request timeout. Spin's outbound HTTP applies its own limits and
    /// ignores this value inside the component.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Get, url)
    }

    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        let url = self.resolve(url.into());
        let mut builder = RequestBuilder::new(method, url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }
        ClientRequestBuilder {
            client: self,
            builder,
        }
    }

    fn resolve(&self, url: String) -> String {
        match &self.base_url {
            Some(base) if !url.starts_with("http://") && !url.starts_with("https://") => {
                format!(
                    "{}/{}",
                    base.trim_end_matches('/'),
                    url.trim_start_matches('/')
                )
            }
            _ => url,
        }
    }

    #[cfg(target_arch = "wasm32")]
    async fn dispatch(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        use spin_sdk::http::{Method as SpinMethod, Request};

        let url = request.build_url()?;
        let method = match request.method {
            Method::Get => SpinMethod::Get,
        };

        let mut outgoing = Request::builder();
        outgoing.method(method).uri(url.as_str());
        for (key, value) in &request.headers {
            outgoing.header(key.as_str(), value.as_str());
        }

        let response: spin_sdk::http::Response = spin_sdk::http::send(outgoing.build())
            .await
            .map_err(|e| FetchError::RequestError(e.to_string()))?;

        let status = *response.status();
        let headers = response
            .headers()
            .map(|(k, v)| {
                (
                    k.to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect();

        Ok(Response::new(status, headers, response.into_body()))
    }

    #[cfg(not(target_arch = "wasm32"))]
    async fn dispatch(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let url = request.build_url()?;
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
        };

        let mut outgoing = self.http.request(method, url).timeout(self.timeout);
        for (key, value) in &request.headers {
            outgoing = outgoing.header(key.as_str(), value.as_str());
        }

        let response = outgoing.send().await.map_err(reqwest_error)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    String::from_utf8_lossy(v.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response.bytes().await.map_err(reqwest_error)?.to_vec();

        Ok(Response::new(status, headers, body))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn reqwest_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::RequestError(e.to_string())
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a> {
    client: &'a FetchClient,
    builder: RequestBuilder,
}

impl ClientRequestBuilder<'_> {
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    pub fn accept(mut self, content_type: impl Into<String>) -> Self {
        self.builder = self.builder.accept(content_type);
        self
    }

    pub fn query<K: AsRef<str>, V: AsRef<str>>(mut self, pairs: &[(K, V)]) -> Self {
        self.builder = self.builder.query(pairs);
        self
    }

    /// The request as it would be sent.
    pub fn request(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and buffer the whole response.
    pub async fn send(self) -> Result<Response, FetchError> {
        self.client.dispatch(self.builder).await
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{DummyJsonCatalog, FetchClient, FetchError, Method, Response};
}
