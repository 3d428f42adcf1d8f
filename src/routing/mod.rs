//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path, query)
//!     → router.rs (preflight / robots / homepage / proxy)
//!     → target.rs (rebuild the upstream URL from the path)
//!     → matcher.rs (upstream host must be a GitHub domain)
//!     → cdn.rs (optional jsDelivr redirect)
//! ```
//!
//! # Design Decisions
//! - Pure functions of the request line; no state, no I/O
//! - Fixed domain set compiled in, not configurable
//! - Deterministic: same input always yields the same target

pub mod cdn;
pub mod matcher;
pub mod router;
pub mod target;

pub use matcher::DomainMatcher;
pub use router::{route, Route};
pub use target::TargetUrl;
