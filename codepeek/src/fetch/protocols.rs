//! Protocol traits for the fetch layer.
//!
//! These traits define the transport seams of the fallback chain, so the
//! resolver can run against real HTTP, a privileged worker or test doubles.

use async_trait::async_trait;
use std::fmt;

use crate::errors::FetchError;

/// Result of a single HTTP request.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Response body as text.
    pub text: String,
    /// Final URL after redirects.
    pub final_url: String,
    /// Time taken to fetch in milliseconds.
    pub duration_ms: f64,
}

impl FetchResponse {
    /// Creates a 200 response, mainly for tests and stubs.
    #[must_use]
    pub fn ok(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            text: text.into(),
            final_url: url.into(),
            duration_ms: 0.0,
        }
    }

    /// Whether the fetch was successful (2xx status).
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

/// Protocol for plain HTTP GET requests.
///
/// Implementations return `Ok` for any response that arrived, whatever its
/// status; deciding what counts as success is the caller's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches a URL.
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError>;
}

/// Protocol for the higher-privilege context that can fetch without
/// cross-origin restrictions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrivilegedFetcher: Send + Sync {
    /// Asks the privileged side for the page HTML.
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError>;
}

/// Which stage of the fallback chain an attempt belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchStep {
    /// Request straight to the target.
    Direct,
    /// Request rewritten through a proxy base.
    Proxy,
    /// Request delegated to the privileged context.
    Privileged,
}

impl FetchStep {
    /// Returns the step name used in logs and events.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Proxy => "proxy",
            Self::Privileged => "privileged",
        }
    }
}

impl fmt::Display for FetchStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observability callbacks for fetch attempts.
pub trait FetchObserver: Send + Sync {
    /// Called when an attempt starts. `url` is the URL actually requested.
    fn on_fetch_start(&self, url: &str, step: FetchStep);

    /// Called when an attempt produced a page.
    fn on_fetch_complete(&self, url: &str, step: FetchStep, duration_ms: f64, status_code: u16);

    /// Called when an attempt failed.
    fn on_fetch_error(&self, url: &str, step: FetchStep, error: &str);
}

/// No-op implementation of FetchObserver.
#[derive(Debug, Clone, Default)]
pub struct NoOpFetchObserver;

impl FetchObserver for NoOpFetchObserver {
    fn on_fetch_start(&self, _url: &str, _step: FetchStep) {}
    fn on_fetch_complete(&self, _url: &str, _step: FetchStep, _duration_ms: f64, _status_code: u16) {}
    fn on_fetch_error(&self, _url: &str, _step: FetchStep, _error: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_response_is_success() {
        let success = FetchResponse::ok("https://example.com", "<html></html>");
        assert!(success.is_success());

        let not_found = FetchResponse {
            status_code: 404,
            ..success.clone()
        };
        assert!(!not_found.is_success());

        let redirect = FetchResponse {
            status_code: 301,
            ..success
        };
        assert!(!redirect.is_success());
    }

    #[test]
    fn test_step_names() {
        assert_eq!(FetchStep::Direct.to_string(), "direct");
        assert_eq!(FetchStep::Privileged.as_str(), "privileged");
    }

    #[test]
    fn test_noop_observer() {
        let observer = NoOpFetchObserver;
        observer.on_fetch_start("https://example.com", FetchStep::Direct);
        observer.on_fetch_complete("https://example.com", FetchStep::Direct, 100.0, 200);
        observer.on_fetch_error("https://example.com", FetchStep::Proxy, "error");
    }
}
