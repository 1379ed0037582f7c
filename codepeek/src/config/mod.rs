//! Configuration types for fetching, extraction, detection and page runs.

mod settings;

pub use settings::{Settings, Theme};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::errors::{CodepeekError, Result};

/// Proxy used when no remote configuration is available.
pub const DEFAULT_PROXY_URL: &str = "https://corsproxyanywhere.onrender.com/";

/// Public proxies tried after the primary one, in order.
pub const FALLBACK_PROXY_URLS: [&str; 2] = [
    "https://api.allorigins.win/raw?url=",
    "https://cors-anywhere.herokuapp.com/",
];

/// Configuration for the fetch fallback chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds for direct and proxy fetches.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,
    /// Bound on the wait for the privileged context.
    #[serde(default = "default_privileged_timeout")]
    pub privileged_timeout_seconds: f64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Primary proxy base URL, tried before the fallbacks.
    #[serde(default = "default_primary_proxy")]
    pub primary_proxy: Option<String>,
    /// Hardcoded public proxies.
    #[serde(default = "default_fallback_proxies")]
    pub fallback_proxies: Vec<String>,
    /// Remote JSON document supplying the primary proxy at startup.
    #[serde(default)]
    pub proxy_config_url: Option<String>,
    /// Additional headers to include.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

fn default_timeout() -> f64 {
    30.0
}

fn default_privileged_timeout() -> f64 {
    10.0
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; codepeek/0.1)".to_string()
}

#[allow(clippy::unnecessary_wraps)]
fn default_primary_proxy() -> Option<String> {
    Some(DEFAULT_PROXY_URL.to_string())
}

fn default_fallback_proxies() -> Vec<String> {
    FALLBACK_PROXY_URLS.iter().map(|p| (*p).to_string()).collect()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            privileged_timeout_seconds: default_privileged_timeout(),
            user_agent: default_user_agent(),
            primary_proxy: default_primary_proxy(),
            fallback_proxies: default_fallback_proxies(),
            proxy_config_url: None,
            headers: HashMap::new(),
        }
    }
}

impl FetchConfig {
    /// Creates a new fetch configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the privileged fallback timeout.
    #[must_use]
    pub fn with_privileged_timeout(mut self, seconds: f64) -> Self {
        self.privileged_timeout_seconds = seconds;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the primary proxy.
    #[must_use]
    pub fn with_primary_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.primary_proxy = Some(proxy.into());
        self
    }

    /// Replaces the fallback proxy list.
    #[must_use]
    pub fn with_fallback_proxies(mut self, proxies: Vec<String>) -> Self {
        self.fallback_proxies = proxies;
        self
    }

    /// Sets the remote proxy configuration URL.
    #[must_use]
    pub fn with_proxy_config_url(mut self, url: impl Into<String>) -> Self {
        self.proxy_config_url = Some(url.into());
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Gets timeout as Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_seconds.max(0.0))
    }

    /// Gets the privileged timeout as Duration.
    #[must_use]
    pub fn privileged_timeout(&self) -> Duration {
        Duration::from_secs_f64(self.privileged_timeout_seconds.max(0.0))
    }

    /// Proxy bases in the order they are tried, primary first, empties dropped.
    #[must_use]
    pub fn proxy_chain(&self) -> Vec<String> {
        self.primary_proxy
            .iter()
            .chain(self.fallback_proxies.iter())
            .filter(|p| !p.trim().is_empty())
            .cloned()
            .collect()
    }
}

/// Configuration for answer extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Maximum characters kept from an extracted fragment.
    #[serde(default = "default_max_snippet_chars")]
    pub max_snippet_chars: usize,
    /// `<pre>` blocks whose visible text is this short or shorter are noise.
    #[serde(default = "default_min_pre_text")]
    pub min_pre_text_length: usize,
    /// Number of qualifying `<pre>` blocks joined by the generic scan.
    #[serde(default = "default_max_pre_blocks")]
    pub max_pre_blocks: usize,
    /// Number of `<code>` blocks joined when no `<pre>` qualifies.
    #[serde(default = "default_max_code_blocks")]
    pub max_code_blocks: usize,
}

fn default_max_snippet_chars() -> usize {
    1000
}

fn default_min_pre_text() -> usize {
    20
}

fn default_max_pre_blocks() -> usize {
    3
}

fn default_max_code_blocks() -> usize {
    5
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_snippet_chars: default_max_snippet_chars(),
            min_pre_text_length: default_min_pre_text(),
            max_pre_blocks: default_max_pre_blocks(),
            max_code_blocks: default_max_code_blocks(),
        }
    }
}

impl ExtractionConfig {
    /// Creates a new extraction configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the character budget.
    #[must_use]
    pub fn with_max_snippet_chars(mut self, max: usize) -> Self {
        self.max_snippet_chars = max;
        self
    }
}

/// Configuration for language detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Winning scores below this are reported as low confidence.
    #[serde(default = "default_min_confidence")]
    pub min_confidence: u32,
}

fn default_min_confidence() -> u32 {
    5
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_confidence: default_min_confidence(),
        }
    }
}

/// Configuration for processing a whole results page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Maximum candidate pipelines in flight.
    #[serde(default = "default_concurrent")]
    pub max_concurrent: usize,
    /// Characters of the trimmed snippet used for the content fingerprint.
    #[serde(default = "default_fingerprint_chars")]
    pub fingerprint_chars: usize,
    /// Lines shown before a preview is collapsed.
    #[serde(default = "default_collapsed_lines")]
    pub collapsed_lines: usize,
    /// Result container selectors, tried in order.
    #[serde(default = "default_result_selectors")]
    pub result_selectors: Vec<String>,
}

fn default_concurrent() -> usize {
    5
}

fn default_fingerprint_chars() -> usize {
    200
}

fn default_collapsed_lines() -> usize {
    15
}

fn default_result_selectors() -> Vec<String> {
    vec![
        ".g".to_string(),
        "div[data-hveid]".to_string(),
        ".MjjYud".to_string(),
    ]
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            max_concurrent: default_concurrent(),
            fingerprint_chars: default_fingerprint_chars(),
            collapsed_lines: default_collapsed_lines(),
            result_selectors: default_result_selectors(),
        }
    }
}

impl PageConfig {
    /// Sets the maximum concurrent pipelines.
    #[must_use]
    pub fn with_max_concurrent(mut self, max: usize) -> Self {
        self.max_concurrent = max;
        self
    }
}

/// Combined configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CodepeekConfig {
    /// Fetch configuration.
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Extraction configuration.
    #[serde(default)]
    pub extraction: ExtractionConfig,
    /// Detection configuration.
    #[serde(default)]
    pub detection: DetectionConfig,
    /// Page configuration.
    #[serde(default)]
    pub page: PageConfig,
}

impl CodepeekConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON configuration document. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CodepeekError::Config(e.to_string()))
    }

    /// Reads a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Sets the fetch configuration.
    #[must_use]
    pub fn with_fetch(mut self, fetch: FetchConfig) -> Self {
        self.fetch = fetch;
        self
    }

    /// Sets the extraction configuration.
    #[must_use]
    pub fn with_extraction(mut self, extraction: ExtractionConfig) -> Self {
        self.extraction = extraction;
        self
    }

    /// Sets the page configuration.
    #[must_use]
    pub fn with_page(mut self, page: PageConfig) -> Self {
        self.page = page;
        self
    }
}
