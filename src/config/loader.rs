//! Configuration loading.
//!
//! Layers, highest precedence first: command-line flags and environment
//! variables, an optional TOML file, built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use thiserror::Error;

use crate::config::schema::{LogFormat, ProxyConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid SIZE_LIMIT {0:?}")]
    SizeLimit(String),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Command-line and environment overrides.
#[derive(Debug, Default, Parser)]
#[command(name = "github-proxy")]
#[command(about = "Reverse proxy for GitHub downloads", long_about = None)]
pub struct Args {
    /// TOML configuration file.
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Port to listen on.
    #[arg(short, long, env = "PORT")]
    pub port: Option<String>,

    /// Interface to bind.
    #[arg(long, env = "BIND_HOST")]
    pub host: Option<String>,

    /// Maximum proxied Content-Length in bytes; larger responses are redirected.
    #[arg(long, env = "SIZE_LIMIT")]
    pub size_limit: Option<String>,

    /// Comma-separated owner/repo whitelist.
    #[arg(long, env = "WHITELIST")]
    pub whitelist: Option<String>,

    /// Set to "true" to redirect eligible files to jsDelivr.
    #[arg(long, env = "JSDELIVR")]
    pub jsdelivr: Option<String>,

    /// Upstream connect timeout in seconds.
    #[arg(long, env = "CONNECT_TIMEOUT_SECS")]
    pub connect_timeout_secs: Option<u64>,

    /// Address for the Prometheus exporter.
    #[arg(long, env = "METRICS_ADDRESS")]
    pub metrics_address: Option<String>,

    /// Log format: pretty or json.
    #[arg(long, env = "LOG_FORMAT", value_parser = parse_log_format)]
    pub log_format: Option<LogFormat>,
}

fn parse_log_format(s: &str) -> Result<LogFormat, String> {
    match s.to_ascii_lowercase().as_str() {
        "pretty" => Ok(LogFormat::Pretty),
        "json" => Ok(LogFormat::Json),
        other => Err(format!("unknown log format {other:?}")),
    }
}

impl Args {
    /// Resolve the final configuration and validate it.
    pub fn into_config(self) -> Result<ProxyConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config_file(path)?,
            None => ProxyConfig::default(),
        };
        self.apply(&mut config)?;
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }

    fn apply(self, config: &mut ProxyConfig) -> Result<(), ConfigError> {
        // Empty values count as unset, the same as an absent variable.
        if let Some(port) = non_empty(self.port) {
            config.listener.port = port;
        }
        if let Some(host) = non_empty(self.host) {
            config.listener.host = host;
        }
        if let Some(limit) = non_empty(self.size_limit) {
            config.proxy.size_limit = limit
                .trim()
                .parse()
                .map_err(|_| ConfigError::SizeLimit(limit.clone()))?;
        }
        if let Some(whitelist) = non_empty(self.whitelist) {
            config.proxy.whitelist = parse_whitelist(&whitelist);
        }
        if let Some(jsdelivr) = non_empty(self.jsdelivr) {
            config.proxy.jsdelivr = jsdelivr == "true";
        }
        if let Some(secs) = self.connect_timeout_secs {
            config.upstream.connect_timeout_secs = secs;
        }
        if let Some(addr) = non_empty(self.metrics_address) {
            config.observability.metrics_address = Some(addr);
        }
        if let Some(format) = self.log_format {
            config.observability.log_format = format;
        }
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let config = read_config_file(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Split a comma-separated whitelist, trimming entries and dropping empty ones.
pub fn parse_whitelist(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|repo| !repo.is_empty())
        .map(String::from)
        .collect()
}
