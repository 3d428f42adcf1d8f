//! Target URL reconstruction.
//!
//! Clients embed the upstream URL in the request path:
//! `/https://github.com/owner/repo/archive/main.zip`. Intermediaries often
//! collapse the `//` after the scheme, and users often omit the scheme
//! entirely, so the path is repaired before parsing.
//!
//! Scheme repair runs before the `https://` default; in the other order a
//! collapsed `https:/` would be prefixed a second time.

use std::fmt;

use url::{Position, Url};

use crate::error::ProxyError;

/// A parsed upstream URL for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUrl(Url);

impl TargetUrl {
    /// Rebuild and parse the target from a raw request path and query.
    ///
    /// `path` may carry its leading `/`; it is stripped here.
    pub fn from_request_path(path: &str, query: Option<&str>) -> Result<Self, ProxyError> {
        let mut raw = reconstruct(path.strip_prefix('/').unwrap_or(path));
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            raw.push('?');
            raw.push_str(query);
        }
        Url::parse(&raw).map(Self).map_err(ProxyError::InvalidUrl)
    }

    /// Host and explicit port, lowercased by the parser. Policy checks
    /// compare against this, so `github.com:22` is not `github.com`.
    /// A scheme's default port is dropped during parsing.
    pub fn authority(&self) -> &str {
        &self.0[Position::BeforeHost..Position::AfterPort]
    }

    /// Percent-encoded path, always starting with `/`.
    pub fn path(&self) -> &str {
        self.0.path()
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for TargetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Repair the scheme of a path-embedded URL. Input has no leading `/`.
pub fn reconstruct(path: &str) -> String {
    let repaired = if let Some(rest) = collapsed(path, "https:/", "https://") {
        format!("https://{rest}")
    } else if let Some(rest) = collapsed(path, "http:/", "http://") {
        format!("http://{rest}")
    } else {
        path.to_string()
    };

    if repaired.starts_with("http://") || repaired.starts_with("https://") {
        repaired
    } else {
        format!("https://{repaired}")
    }
}

fn collapsed<'a>(path: &'a str, single: &str, double: &str) -> Option<&'a str> {
    if path.starts_with(double) {
        return None;
    }
    path.strip_prefix(single)
}
