//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI flags / environment (clap)
//!     → loader.rs (optional TOML file, then overrides)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc with every request handler
//! ```
//!
//! Config is immutable once loaded; there is no reload.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_whitelist, Args, ConfigError};
pub use schema::{
    ListenerConfig, LogFormat, ObservabilityConfig, PolicyConfig, ProxyConfig, UpstreamConfig,
};
