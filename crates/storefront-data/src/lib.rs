//! HTTP client utilities for the storefront gateways.
//!
//! Wraps `reqwest` with a small builder API, per-dependency timeouts and
//! structured `tracing` output for every outbound call. There are no
//! retries: a failed call is reported once and the caller decides what to
//! do.
//!
//! # Example
//!
//! ```rust,no_run
//! use storefront_data::{DependencyTag, FetchClient};
//!
//! # async fn run() -> Result<(), storefront_data::FetchError> {
//! let client = FetchClient::new(DependencyTag::Catalog)?
//!     .with_base_url("http://localhost:9000");
//!
//! let body: serde_json::Value = client
//!     .get("/store/collections")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! # let _ = body;
//! # Ok(())
//! # }
//! ```

mod dependency;
mod error;
mod request;
mod response;
mod timeout;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

pub use dependency::DependencyTag;
pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;
pub use timeout::TimeoutConfig;

/// HTTP client for one external dependency.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    tag: DependencyTag,
    timeout: TimeoutConfig,
    base_url: Option<String>,
    default_headers: Arc<Vec<(String, String)>>,
}

impl FetchClient {
    /// Create a client using the tag's default timeout.
    pub fn new(tag: DependencyTag) -> Result<Self, FetchError> {
        Self::with_timeout(tag, TimeoutConfig::from_total(tag.default_timeout()))
    }

    /// Create a client with explicit timeouts.
    pub fn with_timeout(tag: DependencyTag, timeout: TimeoutConfig) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .connect_timeout(timeout.connect)
            .timeout(timeout.total)
            .build()?;
        Ok(Self {
            http,
            tag,
            timeout,
            base_url: None,
            default_headers: Arc::new(Vec::new()),
        })
    }

    /// Set a base URL that relative request paths are appended to.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a header sent with every request.
    pub fn with_default_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.default_headers).push((key.into(), value.into()));
        self
    }

    /// The dependency this client talks to.
    pub fn tag(&self) -> DependencyTag {
        self.tag
    }

    /// Configured timeouts.
    pub fn timeout(&self) -> TimeoutConfig {
        self.timeout
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        self.request(Method::Post, url)
    }

    /// Create a request with a custom method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder<'_> {
        let mut builder = RequestBuilder::new(method, self.resolve(url.into()));
        for (key, value) in self.default_headers.iter() {
            builder = builder.header(key.clone(), value.clone());
        }
        ClientRequestBuilder {
            client: self,
            builder,
        }
    }

    /// Resolve a path against the base URL. Absolute URLs pass through.
    pub fn resolve(&self, url: String) -> String {
        match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!(
                    "{}/{}",
                    base.trim_end_matches('/'),
                    url.trim_start_matches('/')
                )
            }
            _ => url,
        }
    }

    /// Send a prepared request and read the whole body.
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response, FetchError> {
        let started = Instant::now();
        let dependency = self.tag.name();
        let method = request.method.as_str();

        let mut outbound = self
            .http
            .request(request.method.to_reqwest(), &request.url);
        if !request.query.is_empty() {
            outbound = outbound.query(&request.query);
        }
        for (key, value) in &request.headers {
            outbound = outbound.header(key.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            outbound = outbound.body(body);
        }

        tracing::debug!(dependency, method, url = %request.url, "outbound request");

        let result = async {
            let resp = outbound.send().await?;
            let status = resp.status().as_u16();
            let headers: HashMap<String, String> = resp
                .headers()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
                .collect();
            let body = resp.bytes().await?.to_vec();
            Ok::<_, FetchError>(Response::new(status, headers, body))
        }
        .await;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(resp) => tracing::debug!(
                dependency,
                method,
                url = %request.url,
                status = resp.status,
                bytes = resp.body.len(),
                elapsed_ms,
                "outbound response"
            ),
            Err(e) => tracing::warn!(
                dependency,
                method,
                url = %request.url,
                elapsed_ms,
                error = %e,
                "outbound request failed"
            ),
        }
        result
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder<'a> {
    client: &'a FetchClient,
    builder: RequestBuilder,
}

impl<'a> ClientRequestBuilder<'a> {
    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.header(key, value);
        self
    }

    /// Append one query-string parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.builder = self.builder.query(key, value);
        self
    }

    /// Append query-string parameters; repeated keys are kept.
    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.builder = self.builder.query_pairs(pairs);
        self
    }

    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Add a bearer token authorization header.
    pub fn bearer_auth(mut self, token: impl AsRef<str>) -> Self {
        self.builder = self.builder.bearer_auth(token);
        self
    }

    /// Inspect the request without sending it.
    pub fn build(self) -> RequestBuilder {
        self.builder
    }

    /// Send the request and return the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        self.client.execute(self.builder).await
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{DependencyTag, FetchClient, FetchError, Method, Response, TimeoutConfig};
}
