//! Page-load scoped dedup state.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashSet;
use uuid::Uuid;

/// Dedup sets for one results page.
///
/// Every check-and-insert is a single locked operation, so callers must claim
/// a URL before their first `.await` to keep two tasks from both winning.
#[derive(Debug)]
pub struct PreviewSession {
    id: Mutex<Uuid>,
    started_at: Mutex<DateTime<Utc>>,
    urls: Mutex<HashSet<String>>,
    fingerprints: Mutex<HashSet<String>>,
}

impl Default for PreviewSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PreviewSession {
    /// Starts a fresh session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: Mutex::new(Uuid::new_v4()),
            started_at: Mutex::new(Utc::now()),
            urls: Mutex::new(HashSet::new()),
            fingerprints: Mutex::new(HashSet::new()),
        }
    }

    /// Session identifier; changes on [`reset`](Self::reset).
    #[must_use]
    pub fn id(&self) -> Uuid {
        *self.id.lock()
    }

    /// When the current page load started.
    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        *self.started_at.lock()
    }

    /// Marks a normalized URL as processed. Returns false if it already was.
    pub fn claim_url(&self, normalized_url: &str) -> bool {
        self.urls.lock().insert(normalized_url.to_string())
    }

    /// Whether the URL was claimed.
    #[must_use]
    pub fn has_url(&self, normalized_url: &str) -> bool {
        self.urls.lock().contains(normalized_url)
    }

    /// Marks a content fingerprint as rendered. Returns false if it already was.
    pub fn claim_fingerprint(&self, fingerprint: &str) -> bool {
        self.fingerprints.lock().insert(fingerprint.to_string())
    }

    /// Forgets a fingerprint once its preview is removed.
    pub fn release_fingerprint(&self, fingerprint: &str) -> bool {
        self.fingerprints.lock().remove(fingerprint)
    }

    /// Number of claimed URLs.
    #[must_use]
    pub fn url_count(&self) -> usize {
        self.urls.lock().len()
    }

    /// Number of rendered fingerprints.
    #[must_use]
    pub fn fingerprint_count(&self) -> usize {
        self.fingerprints.lock().len()
    }

    /// Starts over, as on navigation or reload.
    pub fn reset(&self) {
        self.urls.lock().clear();
        self.fingerprints.lock().clear();
        *self.id.lock() = Uuid::new_v4();
        *self.started_at.lock() = Utc::now();
        tracing::debug!(session = %self.id(), "Preview session reset");
    }
}
