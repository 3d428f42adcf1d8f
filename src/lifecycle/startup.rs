//! Startup orchestration.
//!
//! Validated config in, running server out: metrics exporter first, then
//! the upstream client, then the listener. Any failure is fatal.

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ProxyConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

/// Fatal startup or serve errors.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("failed to build upstream client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Start every subsystem and serve until a termination signal.
pub async fn run(config: ProxyConfig) -> Result<(), StartupError> {
    if let Some(addr) = &config.observability.metrics_address {
        // Validation has already checked the address.
        if let Ok(addr) = addr.parse::<SocketAddr>() {
            metrics::init_metrics(addr)?;
        }
    }

    let address = config.bind_address();
    let server = HttpServer::new(config)?;

    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| StartupError::Bind {
            address: address.clone(),
            source,
        })?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_handler(shutdown);

    server
        .run(listener, server_shutdown)
        .await
        .map_err(StartupError::Serve)
}
