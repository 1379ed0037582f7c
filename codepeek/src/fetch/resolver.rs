//! The fetch fallback chain.
//!
//! One async function composes the three strategies with early return:
//! direct request, each proxy base in order, then the privileged context.
//! Per-step failures are logged and swallowed; only
//! [`FetchError::Exhausted`] leaves the resolver.

use std::sync::Arc;
use std::time::Duration;

use super::protocols::{FetchObserver, FetchStep, Fetcher, NoOpFetchObserver, PrivilegedFetcher};
use crate::config::FetchConfig;
use crate::errors::FetchError;

/// Drops a text fragment (`#:~:text=`) and then any `#anchor`.
#[must_use]
pub fn strip_fragment(url: &str) -> &str {
    let without_text = url.split("#:~:text=").next().unwrap_or(url);
    without_text.split('#').next().unwrap_or(without_text)
}

/// Rewrites `url` through a proxy base: `base + percent_encode(url)`.
#[must_use]
pub fn proxied_url(base: &str, url: &str) -> String {
    format!("{base}{}", urlencoding::encode(url))
}

/// Resolves a URL to page HTML through the fallback chain.
#[derive(Clone)]
pub struct FetchResolver {
    fetcher: Arc<dyn Fetcher>,
    privileged: Option<Arc<dyn PrivilegedFetcher>>,
    config: FetchConfig,
    privileged_timeout: Duration,
    observer: Arc<dyn FetchObserver>,
}

impl std::fmt::Debug for FetchResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchResolver")
            .field("proxies", &self.proxy_chain())
            .field("privileged", &self.privileged.is_some())
            .field("privileged_timeout", &self.privileged_timeout)
            .finish_non_exhaustive()
    }
}

impl FetchResolver {
    /// Creates a resolver using `fetcher` for direct and proxied requests.
    #[must_use]
    pub fn new(fetcher: Arc<dyn Fetcher>, config: &FetchConfig) -> Self {
        Self {
            fetcher,
            privileged: None,
            config: config.clone(),
            privileged_timeout: config.privileged_timeout(),
            observer: Arc::new(NoOpFetchObserver),
        }
    }

    /// Enables the privileged fallback.
    #[must_use]
    pub fn with_privileged(mut self, privileged: Arc<dyn PrivilegedFetcher>) -> Self {
        self.privileged = Some(privileged);
        self
    }

    /// Replaces the primary proxy, e.g. with the remotely configured one.
    #[must_use]
    pub fn with_primary_proxy(mut self, proxy: Option<String>) -> Self {
        self.config.primary_proxy = proxy;
        self
    }

    /// Sets the fetch observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn FetchObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Proxy bases in the order they are tried.
    #[must_use]
    pub fn proxy_chain(&self) -> Vec<String> {
        self.config.proxy_chain()
    }

    /// Fetches the page HTML, trying each strategy until one succeeds.
    pub async fn resolve(&self, url: &str) -> Result<String, FetchError> {
        let url = strip_fragment(url);

        if let Some(html) = self.attempt(url, FetchStep::Direct).await {
            return Ok(html);
        }

        for base in self.proxy_chain() {
            if let Some(html) = self.attempt(&proxied_url(&base, url), FetchStep::Proxy).await {
                return Ok(html);
            }
        }

        if let Some(html) = self.attempt_privileged(url).await {
            return Ok(html);
        }

        tracing::debug!(url = %url, "All fetch methods failed");
        Err(FetchError::Exhausted {
            url: url.to_string(),
        })
    }

    async fn attempt(&self, request_url: &str, step: FetchStep) -> Option<String> {
        self.observer.on_fetch_start(request_url, step);

        let outcome = match self.fetcher.fetch(request_url).await {
            Ok(response) if response.is_success() => Ok(response),
            Ok(response) => Err(FetchError::Status {
                url: request_url.to_string(),
                status: response.status_code,
            }),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(response) => {
                self.observer.on_fetch_complete(
                    request_url,
                    step,
                    response.duration_ms,
                    response.status_code,
                );
                tracing::debug!(url = %request_url, step = %step, "Fetch succeeded");
                Some(response.text)
            }
            Err(e) => {
                self.observer.on_fetch_error(request_url, step, &e.to_string());
                tracing::debug!(url = %request_url, step = %step, error = %e, "Fetch step failed");
                None
            }
        }
    }

    async fn attempt_privileged(&self, url: &str) -> Option<String> {
        let privileged = self.privileged.as_ref()?;
        let step = FetchStep::Privileged;
        self.observer.on_fetch_start(url, step);

        let outcome = match tokio::time::timeout(self.privileged_timeout, privileged.fetch_html(url)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout {
                url: url.to_string(),
                timeout_seconds: self.privileged_timeout.as_secs_f64(),
            }),
        };

        match outcome {
            Ok(html) => {
                self.observer.on_fetch_complete(url, step, 0.0, 200);
                tracing::debug!(url = %url, step = %step, "Fetch succeeded");
                Some(html)
            }
            Err(e) => {
                self.observer.on_fetch_error(url, step, &e.to_string());
                tracing::debug!(url = %url, step = %step, error = %e, "Fetch step failed");
                None
            }
        }
    }
}
