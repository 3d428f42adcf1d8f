//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits so a TOML file can supply any subset of
//! fields; the rest fall back to defaults.

use serde::{Deserialize, Serialize};

/// Default ceiling above which responses are redirected instead of streamed (2 GiB).
pub const DEFAULT_SIZE_LIMIT: i64 = 2 * 1024 * 1024 * 1024;

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// Forwarding policy: size ceiling, whitelist, CDN acceleration.
    pub proxy: PolicyConfig,

    /// Outbound client settings.
    pub upstream: UpstreamConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ProxyConfig {
    /// Address the listener binds to, e.g. `0.0.0.0:8080`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listener.host, self.listener.port)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind.
    pub host: String,

    /// Port to bind. Kept as a string, validated separately.
    pub port: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: "8080".to_string(),
        }
    }
}

/// Forwarding policy.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PolicyConfig {
    /// Responses declaring a larger `Content-Length` are redirected to the
    /// upstream URL. Zero or negative disables the check.
    pub size_limit: i64,

    /// Allowed repositories as `owner/repo` (or `gist:<id>`). Empty allows all.
    pub whitelist: Vec<String>,

    /// Redirect eligible file URLs to cdn.jsdelivr.net.
    pub jsdelivr: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            size_limit: DEFAULT_SIZE_LIMIT,
            whitelist: Vec::new(),
            jsdelivr: false,
        }
    }
}

/// Outbound client configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct UpstreamConfig {
    /// TCP/TLS connect timeout in seconds. Zero disables it.
    pub connect_timeout_secs: u64,

    /// `User-Agent` sent when the client supplied none.
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            user_agent: concat!("github-proxy/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log output format.
    pub log_format: LogFormat,

    /// Prometheus exporter address; metrics are only exported when set.
    pub metrics_address: Option<String>,
}
