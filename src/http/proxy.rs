//! The proxy pipeline.
//!
//! ```text
//! path → TargetUrl → domain check → whitelist → [jsDelivr redirect]
//!      → upstream request → size check → relay
//! ```
//!
//! Each step either advances or ends the request with a [`ProxyError`].

use axum::body::Body;
use axum::http::{Request, Response};
use axum::response::{IntoResponse, Redirect};

use crate::config::ProxyConfig;
use crate::error::ProxyError;
use crate::http::request::{build_upstream_request, is_git_client};
use crate::http::response::relay;
use crate::http::upstream::UpstreamClient;
use crate::routing::{cdn, DomainMatcher, TargetUrl};
use crate::security::Whitelist;

/// Forwarding pipeline, built once and shared by all handlers.
#[derive(Debug, Clone)]
pub struct Proxy {
    domains: DomainMatcher,
    whitelist: Whitelist,
    client: UpstreamClient,
    size_limit: i64,
    jsdelivr: bool,
    user_agent: String,
}

impl Proxy {
    pub fn new(config: &ProxyConfig, client: UpstreamClient) -> Self {
        Self {
            domains: DomainMatcher::github(),
            whitelist: Whitelist::new(config.proxy.whitelist.clone()),
            client,
            size_limit: config.proxy.size_limit,
            jsdelivr: config.proxy.jsdelivr,
            user_agent: config.upstream.user_agent.clone(),
        }
    }

    /// Parse and validate the target embedded in the request.
    pub fn resolve(&self, path: &str, query: Option<&str>) -> Result<TargetUrl, ProxyError> {
        let target = TargetUrl::from_request_path(path, query)?;

        if !self.domains.matches(target.authority()) {
            return Err(ProxyError::UnsupportedDomain(target.authority().to_string()));
        }
        if !self.whitelist.allows(&target) {
            return Err(ProxyError::NotWhitelisted(target.to_string()));
        }
        Ok(target)
    }

    /// Run the full pipeline for one request.
    pub async fn handle(&self, request: Request<Body>) -> Result<Response<Body>, ProxyError> {
        let target = self.resolve(request.uri().path(), request.uri().query())?;

        if is_git_client(request.headers()) {
            tracing::debug!(target_url = %target, "Git client request");
            return self.forward(request, &target).await;
        }

        if self.jsdelivr {
            if let Some(cdn_url) = cdn::jsdelivr_url(&target) {
                tracing::debug!(target_url = %target, cdn_url = %cdn_url, "Redirecting to jsDelivr");
                return Ok(Redirect::temporary(&cdn_url).into_response());
            }
        }

        self.forward(request, &target).await
    }

    async fn forward(
        &self,
        request: Request<Body>,
        target: &TargetUrl,
    ) -> Result<Response<Body>, ProxyError> {
        let (parts, body) = request.into_parts();
        let outbound = build_upstream_request(&self.client, &parts, body, target, &self.user_agent)?;

        let upstream = self.client.execute(outbound).await.map_err(|e| {
            tracing::error!(target_url = %target, authority = target.authority(), error = ?e, "Upstream error");
            e
        })?;

        tracing::debug!(
            target_url = %target,
            status = %upstream.status(),
            "Upstream responded"
        );
        Ok(relay(upstream, target, self.size_limit))
    }
}
