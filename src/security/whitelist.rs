//! Repository whitelist.
//!
//! Each supported host has its own rule for finding the repository in a
//! URL path. Gists have no repository, so their first path segment is
//! prefixed with `gist:`. A whitelist entry for a gist must carry the same
//! prefix.
//!
//! Paths are percent-decoded before splitting, so `octo/c%61t` names
//! `octo/cat`. A path that does not decode to UTF-8 names nothing.

use crate::routing::matcher::{GITHUB, GITHUB_API, GITHUB_GIST, GITHUB_RAW};
use crate::routing::target::TargetUrl;

/// Extract the repository identifier for whitelist matching.
///
/// Returns `None` for hosts without an extraction rule and for paths too
/// short to name a repository. Hosts with an explicit port have no rule.
pub fn repository_id(target: &TargetUrl) -> Option<String> {
    let decoded = urlencoding::decode(target.path()).ok()?;
    let path = decoded.trim_matches('/');
    match target.authority() {
        GITHUB | GITHUB_RAW => owner_repo(path),
        GITHUB_API => path.strip_prefix("repos/").and_then(owner_repo),
        GITHUB_GIST => {
            let first = path.split('/').next().unwrap_or_default();
            Some(format!("gist:{first}"))
        }
        _ => None,
    }
}

fn owner_repo(path: &str) -> Option<String> {
    let mut parts = path.split('/');
    let owner = parts.next()?;
    let repo = parts.next()?;
    Some(format!("{owner}/{repo}"))
}

/// An optional allow-list of repositories. Empty allows everything.
#[derive(Debug, Clone, Default)]
pub struct Whitelist {
    entries: Vec<String>,
}

impl Whitelist {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    /// Check a target. An empty list always passes.
    pub fn allows(&self, target: &TargetUrl) -> bool {
        if self.entries.is_empty() {
            return true;
        }
        match repository_id(target) {
            Some(id) => {
                let id = id.to_lowercase();
                self.entries.iter().any(|entry| entry.to_lowercase() == id)
            }
            None => false,
        }
    }
}
