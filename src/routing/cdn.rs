//! jsDelivr acceleration.
//!
//! File URLs on `raw.githubusercontent.com` and `github.com/.../blob/...`
//! have an equivalent on cdn.jsdelivr.net. When enabled, the proxy redirects
//! those instead of fetching them itself.

use crate::routing::matcher::{GITHUB, GITHUB_RAW};
use crate::routing::target::TargetUrl;

const JSDELIVR_BASE: &str = "https://cdn.jsdelivr.net/gh";

/// Map a target to its jsDelivr URL, if it has one.
pub fn jsdelivr_url(target: &TargetUrl) -> Option<String> {
    let path = target.path().trim_start_matches('/');
    match target.authority() {
        GITHUB_RAW => {
            // {user}/{repo}/{branch}/{file...}
            let parts: Vec<&str> = path.trim_end_matches('/').split('/').collect();
            if parts.len() < 3 {
                return None;
            }
            Some(format!(
                "{JSDELIVR_BASE}/{}/{}@{}/{}",
                parts[0],
                parts[1],
                parts[2],
                parts[3..].join("/")
            ))
        }
        GITHUB => {
            // {user}/{repo}/blob/{branch}/{file...}
            let mut parts = path.splitn(5, '/');
            let user = parts.next().filter(|s| !s.is_empty())?;
            let repo = parts.next().filter(|s| !s.is_empty())?;
            if parts.next()? != "blob" {
                return None;
            }
            let branch = parts.next().filter(|s| !s.is_empty())?;
            let file = parts.next().filter(|s| !s.is_empty())?;
            Some(format!("{JSDELIVR_BASE}/{user}/{repo}@{branch}/{file}"))
        }
        _ => None,
    }
}
