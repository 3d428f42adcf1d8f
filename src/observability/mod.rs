//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request handlers produce:
//!     → logging.rs (structured log events, request spans)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Prometheus scrape endpoint (optional)
//! ```
//!
//! The request ID (`x-request-id`) is attached to every request span.

pub mod logging;
pub mod metrics;
