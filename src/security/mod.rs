//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Parsed target:
//!     → routing::matcher (GitHub domains only)
//!     → whitelist.rs (optional owner/repo allow-list)
//!     → headers.rs (sanitize outbound and inbound headers)
//! ```
//!
//! # Design Decisions
//! - Fail closed: a configured whitelist rejects anything it cannot identify
//! - No trust in client input: the upstream host always comes from the parsed URL

pub mod headers;
pub mod whitelist;

pub use whitelist::Whitelist;
