//! Error types for codepeek.
//!
//! Only fetch failures and configuration problems are errors. A link that is
//! not code-related, a page without code, or a duplicate preview are normal
//! outcomes and are reported through [`crate::pipeline::SkipReason`].

use std::collections::HashMap;
use thiserror::Error;

/// The main error type for codepeek operations.
#[derive(Debug, Error)]
pub enum CodepeekError {
    /// Every fetch strategy failed.
    #[error("{0}")]
    Fetch(#[from] FetchError),

    /// A configuration document could not be used.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A CSS selector failed to parse.
    #[error("Invalid selector '{selector}': {reason}")]
    Selector {
        /// The offending selector.
        selector: String,
        /// Parser message.
        reason: String,
    },

    /// The URL is not an absolute http(s) URL.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CodepeekError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl CodepeekError {
    /// Creates an invalid URL error.
    #[must_use]
    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates a selector error.
    #[must_use]
    pub fn selector(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Selector {
            selector: selector.into(),
            reason: reason.into(),
        }
    }
}

/// Errors produced by a single fetch attempt or by the whole fallback chain.
///
/// The resolver swallows per-step variants and only surfaces
/// [`FetchError::Exhausted`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("HTTP {status} for {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// Transport-level failure (DNS, TLS, connection reset, body read).
    #[error("Network error for {url}: {reason}")]
    Network {
        /// Requested URL.
        url: String,
        /// Transport message.
        reason: String,
    },

    /// The privileged context reported a failure.
    #[error("Privileged fetch failed for {url}: {reason}")]
    Privileged {
        /// Requested URL.
        url: String,
        /// Error message returned by the privileged side.
        reason: String,
    },

    /// A bounded wait expired.
    #[error("Fetch timed out for {url} after {timeout_seconds}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// The bound that expired.
        timeout_seconds: f64,
    },

    /// The privileged channel is gone.
    #[error("Privileged channel closed")]
    ChannelClosed,

    /// No fetch strategy produced a page.
    #[error("Unable to fetch content - all methods failed: {url}")]
    Exhausted {
        /// Requested URL.
        url: String,
    },
}

impl FetchError {
    /// Creates a network error.
    #[must_use]
    pub fn network(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Network {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Creates a privileged-context error.
    #[must_use]
    pub fn privileged(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Privileged {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Whether this is the aggregate failure of the whole chain.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();

        match self {
            Self::Status { url, status } => {
                map.insert("type".to_string(), serde_json::json!("FetchStatus"));
                map.insert("url".to_string(), serde_json::json!(url));
                map.insert("status".to_string(), serde_json::json!(status));
            }
            Self::Network { url, reason } => {
                map.insert("type".to_string(), serde_json::json!("FetchNetwork"));
                map.insert("url".to_string(), serde_json::json!(url));
                map.insert("reason".to_string(), serde_json::json!(reason));
            }
            Self::Privileged { url, reason } => {
                map.insert("type".to_string(), serde_json::json!("FetchPrivileged"));
                map.insert("url".to_string(), serde_json::json!(url));
                map.insert("reason".to_string(), serde_json::json!(reason));
            }
            Self::Timeout { url, timeout_seconds } => {
                map.insert("type".to_string(), serde_json::json!("FetchTimeout"));
                map.insert("url".to_string(), serde_json::json!(url));
                map.insert("timeout_seconds".to_string(), serde_json::json!(timeout_seconds));
            }
            Self::ChannelClosed => {
                map.insert("type".to_string(), serde_json::json!("FetchChannelClosed"));
            }
            Self::Exhausted { url } => {
                map.insert("type".to_string(), serde_json::json!("FetchExhausted"));
                map.insert("url".to_string(), serde_json::json!(url));
            }
        }

        map.insert("message".to_string(), serde_json::json!(self.to_string()));
        map
    }
}

/// Result type alias for codepeek operations.
pub type Result<T> = std::result::Result<T, CodepeekError>;
