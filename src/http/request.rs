//! Upstream request construction.
//!
//! # Responsibilities
//! - Classify tool-driven git traffic by `User-Agent`
//! - Copy method, headers and body stream onto a request for the target URL
//! - Supply a default `User-Agent` when the client sent none or an empty one
//!
//! The `Host` header is dropped; the client derives it from the target URL,
//! including on each redirect hop.

use axum::body::{Body, HttpBody};
use axum::http::{header, request::Parts, HeaderMap, HeaderValue};

use crate::error::ProxyError;
use crate::http::upstream::UpstreamClient;
use crate::routing::TargetUrl;
use crate::security::headers::upstream_request_headers;

/// Returns true for requests made by the git command-line client.
pub fn is_git_client(headers: &HeaderMap) -> bool {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ua| ua.contains("git/"))
}

/// Build the outbound request for `target` from the inbound parts and body.
pub fn build_upstream_request(
    client: &UpstreamClient,
    parts: &Parts,
    body: Body,
    target: &TargetUrl,
    default_user_agent: &str,
) -> Result<reqwest::Request, ProxyError> {
    let mut headers = upstream_request_headers(&parts.headers);
    let missing_ua = headers
        .get(header::USER_AGENT)
        .map_or(true, |ua| ua.as_bytes().is_empty());
    if missing_ua {
        let ua = HeaderValue::from_str(default_user_agent)
            .unwrap_or_else(|_| HeaderValue::from_static("github-proxy"));
        headers.insert(header::USER_AGENT, ua);
    }

    let mut builder = client
        .request(parts.method.clone(), target.as_url().clone())
        .headers(headers);

    // Bodiless requests stay bodiless rather than going out chunked.
    if !body.is_end_stream() {
        builder = builder.body(reqwest::Body::wrap_stream(body.into_data_stream()));
    }

    builder.build().map_err(ProxyError::BuildRequest)
}
