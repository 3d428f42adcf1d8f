//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config → metrics exporter → upstream client → bind → serve
//!
//! Shutdown (shutdown.rs, signals.rs):
//!     SIGTERM/SIGINT → broadcast → stop accepting → drain in-flight → exit
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
