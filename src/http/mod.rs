//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, dispatch)
//!     → pages.rs (homepage, robots.txt)
//!     → proxy.rs (validate target, forward)
//!         → request.rs (build upstream request)
//!         → upstream.rs (send via shared client)
//!         → response.rs (size check, header filter, stream body)
//!     → Send to client
//! ```

pub mod pages;
pub mod proxy;
pub mod request;
pub mod request_id;
pub mod response;
pub mod server;
pub mod upstream;

pub use proxy::Proxy;
pub use request_id::X_REQUEST_ID;
pub use server::HttpServer;
pub use upstream::UpstreamClient;
