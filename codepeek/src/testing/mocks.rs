//! Test doubles for the fetch seams and the renderer.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use crate::errors::FetchError;
use crate::fetch::{FetchResponse, Fetcher, PrivilegedFetcher};
use crate::pipeline::{Preview, PreviewTarget};

/// Serves canned pages by exact URL; anything else is a 404.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    delay: Option<Duration>,
    calls: Mutex<Vec<String>>,
}

impl StaticFetcher {
    /// Creates an empty fetcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `html` for `url`.
    #[must_use]
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    /// Sleeps before answering each request.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// URLs requested so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Number of requests made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        self.calls.lock().push(url.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        Ok(match self.pages.get(url) {
            Some(html) => FetchResponse::ok(url, html.clone()),
            None => FetchResponse {
                status_code: 404,
                ..FetchResponse::ok(url, "")
            },
        })
    }
}

/// Fails every request with a network error.
#[derive(Debug, Default)]
pub struct FailingFetcher {
    calls: AtomicUsize,
}

impl FailingFetcher {
    /// Creates a failing fetcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for FailingFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(FetchError::network(url, "connection refused"))
    }
}

/// Privileged side answering with a fixed result.
#[derive(Debug)]
pub struct StaticPrivilegedFetcher {
    result: Result<String, String>,
    calls: AtomicUsize,
}

impl StaticPrivilegedFetcher {
    /// Always returns `html`.
    #[must_use]
    pub fn serving(html: impl Into<String>) -> Self {
        Self {
            result: Ok(html.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fails with `error`.
    #[must_use]
    pub fn failing(error: impl Into<String>) -> Self {
        Self {
            result: Err(error.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of requests made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PrivilegedFetcher for StaticPrivilegedFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result
            .clone()
            .map_err(|reason| FetchError::privileged(url, reason))
    }
}

/// A renderer that records what happened to it.
#[derive(Debug)]
pub struct RecordingTarget {
    attached: AtomicBool,
    rendered: Mutex<Vec<Preview>>,
    discards: AtomicUsize,
}

impl Default for RecordingTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingTarget {
    /// Creates an attached target.
    #[must_use]
    pub fn new() -> Self {
        Self {
            attached: AtomicBool::new(true),
            rendered: Mutex::new(Vec::new()),
            discards: AtomicUsize::new(0),
        }
    }

    /// Creates a target whose insertion point is already gone.
    #[must_use]
    pub fn detached() -> Self {
        let target = Self::new();
        target.detach();
        target
    }

    /// Simulates navigation away from the insertion point.
    pub fn detach(&self) {
        self.attached.store(false, Ordering::SeqCst);
    }

    /// Previews rendered so far.
    #[must_use]
    pub fn rendered(&self) -> Vec<Preview> {
        self.rendered.lock().clone()
    }

    /// Number of discard calls.
    #[must_use]
    pub fn discard_count(&self) -> usize {
        self.discards.load(Ordering::SeqCst)
    }
}

impl PreviewTarget for RecordingTarget {
    fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    fn render(&self, preview: &Preview) {
        self.rendered.lock().push(preview.clone());
    }

    fn discard(&self) {
        self.discards.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_fetcher_serves_and_records() {
        let fetcher = StaticFetcher::new().with_page("https://a.com", "<p>a</p>");

        let hit = fetcher.fetch("https://a.com").await.unwrap();
        let miss = fetcher.fetch("https://b.com").await.unwrap();

        assert!(hit.is_success());
        assert_eq!(miss.status_code, 404);
        assert_eq!(fetcher.calls(), vec!["https://a.com", "https://b.com"]);
    }

    #[test]
    fn test_failing_fetcher() {
        let fetcher = FailingFetcher::new();
        assert!(tokio_test::block_on(fetcher.fetch("https://a.com")).is_err());
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn test_static_privileged() {
        let ok = StaticPrivilegedFetcher::serving("<html/>");
        assert_eq!(ok.fetch_html("u").await.unwrap(), "<html/>");

        let failing = StaticPrivilegedFetcher::failing("blocked");
        assert_eq!(
            failing.fetch_html("u").await.unwrap_err(),
            FetchError::privileged("u", "blocked")
        );
        assert_eq!(failing.call_count(), 1);
    }

    #[test]
    fn test_recording_target_detach() {
        let target = RecordingTarget::new();
        assert!(target.is_attached());
        target.detach();
        assert!(!target.is_attached());
        target.discard();
        assert_eq!(target.discard_count(), 1);
    }
}
