//! Response relay.
//!
//! # Responsibilities
//! - Redirect to the upstream URL when the declared size exceeds the ceiling
//! - Copy upstream status and headers (minus encoding and framing)
//! - Stream the upstream body without buffering it
//!
//! The size check reads only `Content-Length`. An upstream that omits it
//! (chunked transfer) is streamed regardless of size.

use axum::body::Body;
use axum::http::{header, HeaderMap, Response};
use axum::response::{IntoResponse, Redirect};
use futures_util::TryStreamExt;

use crate::routing::TargetUrl;
use crate::security::headers::client_response_headers;

/// Parse a `Content-Length` header leniently; anything unparsable counts as 0.
pub fn declared_length(headers: &HeaderMap) -> i64 {
    headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(0)
}

/// Returns true if the upstream response should be redirected instead of relayed.
pub fn exceeds_limit(headers: &HeaderMap, size_limit: i64) -> bool {
    size_limit > 0 && declared_length(headers) > size_limit
}

/// Turn an upstream response into the client response.
pub fn relay(upstream: reqwest::Response, target: &TargetUrl, size_limit: i64) -> Response<Body> {
    if exceeds_limit(upstream.headers(), size_limit) {
        tracing::info!(
            target_url = %target,
            content_length = declared_length(upstream.headers()),
            size_limit,
            "Response exceeds size limit, redirecting"
        );
        // Dropping `upstream` here closes the connection without reading the body.
        return Redirect::temporary(target.as_str()).into_response();
    }

    let status = upstream.status();
    let headers = client_response_headers(upstream.headers());

    let url = target.to_string();
    let stream = upstream.bytes_stream().inspect_err(move |e| {
        tracing::warn!(target_url = %url, error = %e, "Error copying response body");
    });

    let mut response = Response::new(Body::from_stream(stream));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
