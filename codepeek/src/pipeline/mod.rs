//! Preview pipeline.
//!
//! This module provides:
//! - Candidate links and their dedup key
//! - The page-load session holding the dedup sets
//! - Preview values and their display helpers
//! - The runner composing fetch, extraction, normalization and rendering

mod candidate;
#[cfg(test)]
mod integration_tests;
mod preview;
mod runner;
mod session;

pub use candidate::CandidateLink;
pub use preview::{content_fingerprint, Preview, SnippetView};
pub use runner::{PreviewOutcome, PreviewPipeline, PreviewTarget, SkipReason};
pub use session::PreviewSession;
