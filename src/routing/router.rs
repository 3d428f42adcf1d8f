//! Request dispatch.
//!
//! Every inbound request resolves to exactly one [`Route`]. The decision
//! depends only on the method and the exact path, so it is computed before
//! any URL parsing happens.

use axum::http::Method;

/// Where a request is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// CORS preflight; answered with an empty 200.
    Preflight,
    /// `/robots.txt`.
    Robots,
    /// `/`.
    Homepage,
    /// Anything else: the path carries the upstream URL.
    Proxy,
}

/// Resolve the route for a request.
pub fn route(method: &Method, path: &str) -> Route {
    if method == Method::OPTIONS {
        return Route::Preflight;
    }
    match path {
        "/robots.txt" => Route::Robots,
        "/" => Route::Homepage,
        _ => Route::Proxy,
    }
}
