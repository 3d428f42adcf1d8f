//! Configuration validation.
//!
//! Serde handles syntax; this module checks values: the port parses as a
//! u16, the host is an IP address, and whitelist entries have the shape the
//! matcher compares against. All errors are collected, not just the first.

use std::net::IpAddr;

use thiserror::Error;

use crate::config::schema::ProxyConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid listen port {0:?}")]
    InvalidPort(String),

    #[error("invalid listen host {0:?}: expected an IP address")]
    InvalidHost(String),

    #[error("invalid whitelist entry {0:?}: expected owner/repo or gist:<id>")]
    InvalidWhitelistEntry(String),

    #[error("invalid metrics address {0:?}")]
    InvalidMetricsAddress(String),
}

/// Validate a configuration, returning every error found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.port.parse::<u16>().is_err() {
        errors.push(ValidationError::InvalidPort(config.listener.port.clone()));
    }

    if config.listener.host.parse::<IpAddr>().is_err() {
        errors.push(ValidationError::InvalidHost(config.listener.host.clone()));
    }

    for entry in &config.proxy.whitelist {
        if !is_valid_whitelist_entry(entry) {
            errors.push(ValidationError::InvalidWhitelistEntry(entry.clone()));
        }
    }

    if let Some(addr) = &config.observability.metrics_address {
        if addr.parse::<std::net::SocketAddr>().is_err() {
            errors.push(ValidationError::InvalidMetricsAddress(addr.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_valid_whitelist_entry(entry: &str) -> bool {
    if let Some(id) = entry.strip_prefix("gist:") {
        return !id.is_empty() && !id.contains('/');
    }
    match entry.split_once('/') {
        Some((owner, repo)) => !owner.is_empty() && !repo.is_empty() && !repo.contains('/'),
        None => false,
    }
}
