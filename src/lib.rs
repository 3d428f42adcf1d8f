//! GitHub download proxy.
//!
//! Clients request `/{github-url}`; the proxy validates the URL's host
//! against the GitHub domains, optionally checks the repository against a
//! whitelist, and streams the upstream response back.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;

pub use config::ProxyConfig;
pub use error::ProxyError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
