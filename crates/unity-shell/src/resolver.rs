//! Address-bar input resolution.
//!
//! Text that already starts with `http` is navigated to as-is. Anything else
//! is appended verbatim to the search endpoint. No percent-encoding is done,
//! so input containing reserved characters yields a URL the rendering engine
//! has to tolerate.

use unity_types::config::{DEFAULT_SEARCH_ENDPOINT, ShellConfig};

/// Prefix that marks input as a URL rather than a search query.
const URL_PREFIX: &str = "http";

/// Turns raw address-bar text into a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlResolver {
    search_endpoint: String,
}

impl UrlResolver {
    pub fn new(search_endpoint: &str) -> Self {
        Self {
            search_endpoint: search_endpoint.to_string(),
        }
    }

    pub fn from_config(config: &ShellConfig) -> Self {
        Self::new(&config.search_endpoint)
    }

    pub fn search_endpoint(&self) -> &str {
        &self.search_endpoint
    }

    /// Resolve `raw` to the URL the surface should load.
    pub fn resolve(&self, raw: &str) -> String {
        if is_url(raw) {
            raw.to_string()
        } else {
            format!("{}{raw}", self.search_endpoint)
        }
    }
}

impl Default for UrlResolver {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_ENDPOINT)
    }
}

/// Whether `raw` is treated as a URL.
pub fn is_url(raw: &str) -> bool {
    raw.starts_with(URL_PREFIX)
}
