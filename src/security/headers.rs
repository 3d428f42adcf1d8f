//! Header manipulation on both legs of the proxy.
//!
//! # Responsibilities
//! - Permissive CORS headers on every response
//! - Copy client headers upstream, minus `Host` and framing
//! - Copy upstream headers back, minus encoding and framing
//!
//! Framing headers are recomputed by the transport on each leg. Upstream
//! content is relayed without decoding.

use axum::http::header::{self, HeaderMap, HeaderName};

/// CORS header values attached to every response.
pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";
pub const ALLOW_HEADERS: &str = "*";

/// Copy inbound headers for the upstream request.
pub fn upstream_request_headers(inbound: &HeaderMap) -> HeaderMap {
    filter(inbound, |name| {
        *name == header::HOST || *name == header::TRANSFER_ENCODING
    })
}

/// Copy upstream response headers for the client.
pub fn client_response_headers(upstream: &HeaderMap) -> HeaderMap {
    filter(upstream, |name| {
        *name == header::CONTENT_ENCODING || *name == header::TRANSFER_ENCODING
    })
}

fn filter(source: &HeaderMap, skip: impl Fn(&HeaderName) -> bool) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(source.len());
    for (name, value) in source {
        if !skip(name) {
            out.append(name.clone(), value.clone());
        }
    }
    out
}
