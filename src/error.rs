//! Request-level errors and their HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// A terminal failure of the proxy pipeline for a single request.
///
/// Each variant maps to one status code and a short plain-text body.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Invalid URL")]
    InvalidUrl(#[source] url::ParseError),

    #[error("Only GitHub domains are supported")]
    UnsupportedDomain(String),

    #[error("Repository not in whitelist")]
    NotWhitelisted(String),

    #[error("Failed to create proxy request")]
    BuildRequest(#[source] reqwest::Error),

    #[error("Failed to fetch from target")]
    Upstream(#[source] reqwest::Error),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            ProxyError::UnsupportedDomain(_) | ProxyError::NotWhitelisted(_) => {
                StatusCode::FORBIDDEN
            }
            ProxyError::BuildRequest(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Label used for the `outcome` metric dimension.
    pub fn outcome(&self) -> &'static str {
        match self {
            ProxyError::InvalidUrl(_) => "invalid_url",
            ProxyError::UnsupportedDomain(_) => "unsupported_domain",
            ProxyError::NotWhitelisted(_) => "not_whitelisted",
            ProxyError::BuildRequest(_) => "build_failed",
            ProxyError::Upstream(_) => "upstream_error",
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
