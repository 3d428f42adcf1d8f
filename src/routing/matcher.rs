//! Upstream domain matching.
//!
//! # Design Decisions
//! - A host matches a domain when it is equal to it or ends with `"." + domain`
//! - Plain substring or suffix checks are not enough: `evil.github.com.attacker.net`
//!   and `notgithub.com` must both fail
//! - Hosts come from `url::Url`, which already lowercases them

/// Upstream domains the proxy is willing to contact.
pub const GITHUB_DOMAINS: &[&str] = &[
    GITHUB,
    GITHUB_API,
    GITHUB_RAW,
    GITHUB_GIST,
    "github.githubassets.com",
    "avatars.githubusercontent.com",
    "camo.githubusercontent.com",
    "user-images.githubusercontent.com",
];

pub const GITHUB: &str = "github.com";
pub const GITHUB_API: &str = "api.github.com";
pub const GITHUB_RAW: &str = "raw.githubusercontent.com";
pub const GITHUB_GIST: &str = "gist.githubusercontent.com";

/// Matches hosts against a fixed set of domains and their subdomains.
#[derive(Debug, Clone)]
pub struct DomainMatcher {
    domains: Vec<String>,
}

impl DomainMatcher {
    /// Create a matcher. Domains are normalized to lowercase.
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            domains: domains
                .into_iter()
                .map(|d| d.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    /// The GitHub upstream set.
    pub fn github() -> Self {
        Self::new(GITHUB_DOMAINS)
    }

    /// Returns true if `host` is one of the domains or a dot-delimited subdomain.
    pub fn matches(&self, host: &str) -> bool {
        self.domains.iter().any(|domain| is_same_or_subdomain(host, domain))
    }
}

impl Default for DomainMatcher {
    fn default() -> Self {
        Self::github()
    }
}

fn is_same_or_subdomain(host: &str, domain: &str) -> bool {
    match host.strip_suffix(domain) {
        Some("") => true,
        Some(prefix) => prefix.ends_with('.'),
        None => false,
    }
}
