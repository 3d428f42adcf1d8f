//! Outbound HTTP client.
//!
//! One pooled `reqwest::Client` is shared by all handlers. It follows
//! upstream redirects (GitHub archive links bounce to codeload) but never
//! retries, and never decodes content: bodies are relayed as received.
//! Outbound proxies from `HTTP_PROXY`/`HTTPS_PROXY`/`NO_PROXY` are honoured.

use std::time::Duration;

use crate::config::UpstreamConfig;
use crate::error::ProxyError;

/// Maximum redirect hops followed for a single request.
pub const MAX_REDIRECTS: usize = 10;

/// Shared client for upstream requests.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    inner: reqwest::Client,
}

impl UpstreamClient {
    /// Build a client from configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        Self::builder(config).build().map(Self::from_client)
    }

    /// A builder pre-populated from configuration, for callers that need to
    /// adjust it (e.g. an explicit outbound proxy).
    pub fn builder(config: &UpstreamConfig) -> reqwest::ClientBuilder {
        let mut builder =
            reqwest::Client::builder().redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS));
        if config.connect_timeout_secs > 0 {
            builder = builder.connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        }
        builder
    }

    /// Wrap an existing client.
    pub fn from_client(inner: reqwest::Client) -> Self {
        Self { inner }
    }

    /// Start building a request.
    pub fn request(&self, method: reqwest::Method, url: reqwest::Url) -> reqwest::RequestBuilder {
        self.inner.request(method, url)
    }

    /// Send a request once.
    pub async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response, ProxyError> {
        self.inner
            .execute(request)
            .await
            .map_err(ProxyError::Upstream)
    }
}
