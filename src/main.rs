//! GitHub download proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ axum Router ──▶ route()
//!                               ├─ OPTIONS        → 200 + CORS
//!                               ├─ /robots.txt    → static
//!                               ├─ /              → homepage
//!                               └─ /{target-url}  → Proxy
//!                                                    ├─ TargetUrl (repair scheme, parse)
//!                                                    ├─ DomainMatcher (GitHub only)
//!                                                    ├─ Whitelist (owner/repo)
//!                                                    ├─ jsDelivr redirect (optional)
//!                                                    └─ reqwest ──▶ GitHub
//!   Client ◀── streamed body / 307 if over size limit ◀──┘
//! ```

use std::process::ExitCode;

use clap::Parser;

use github_proxy::config::Args;
use github_proxy::lifecycle::startup;
use github_proxy::observability::logging;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Args::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("github-proxy: {e}");
            return ExitCode::FAILURE;
        }
    };

    logging::init(config.observability.log_format);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "github-proxy starting");

    match startup::run(config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");
            ExitCode::FAILURE
        }
    }
}
