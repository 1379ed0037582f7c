//! Event sink system for observability.
//!
//! The preview pipeline reports through an [`EventSink`]. Fetch attempts are
//! bridged into the same sink by [`EventSinkFetchObserver`].

mod sink;

pub use sink::{CollectingEventSink, EventSink, LoggingEventSink, NoOpEventSink};

use std::sync::Arc;

use crate::fetch::{FetchObserver, FetchStep};

/// Event type names.
pub mod event_types {
    /// A candidate entered the pipeline.
    pub const PREVIEW_STARTED: &str = "preview.started";
    /// A preview was handed to its target.
    pub const PREVIEW_RENDERED: &str = "preview.rendered";
    /// A candidate ended without a preview, normally.
    pub const PREVIEW_SKIPPED: &str = "preview.skipped";
    /// A candidate's fetch chain was exhausted.
    pub const PREVIEW_FAILED: &str = "preview.failed";
    /// A fetch attempt started.
    pub const FETCH_STARTED: &str = "fetch.started";
    /// A fetch attempt produced a page.
    pub const FETCH_COMPLETED: &str = "fetch.completed";
    /// A fetch attempt failed.
    pub const FETCH_FAILED: &str = "fetch.failed";
}

/// Forwards fetch callbacks to an event sink.
#[derive(Clone)]
pub struct EventSinkFetchObserver {
    sink: Arc<dyn EventSink>,
}

impl EventSinkFetchObserver {
    /// Wraps a sink.
    #[must_use]
    pub fn new(sink: Arc<dyn EventSink>) -> Self {
        Self { sink }
    }
}

impl std::fmt::Debug for EventSinkFetchObserver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSinkFetchObserver").finish_non_exhaustive()
    }
}

impl FetchObserver for EventSinkFetchObserver {
    fn on_fetch_start(&self, url: &str, step: FetchStep) {
        self.sink.emit(
            event_types::FETCH_STARTED,
            Some(serde_json::json!({"url": url, "step": step.as_str()})),
        );
    }

    fn on_fetch_complete(&self, url: &str, step: FetchStep, duration_ms: f64, status_code: u16) {
        self.sink.emit(
            event_types::FETCH_COMPLETED,
            Some(serde_json::json!({
                "url": url,
                "step": step.as_str(),
                "duration_ms": duration_ms,
                "status_code": status_code,
            })),
        );
    }

    fn on_fetch_error(&self, url: &str, step: FetchStep, error: &str) {
        self.sink.emit(
            event_types::FETCH_FAILED,
            Some(serde_json::json!({"url": url, "step": step.as_str(), "error": error})),
        );
    }
}
