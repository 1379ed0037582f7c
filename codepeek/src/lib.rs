//! # Codepeek
//!
//! Code snippet previews for search results.
//!
//! Given the outbound link of a search result, codepeek fetches the target
//! page, pulls out the most likely answer, cleans it up and guesses its
//! language:
//!
//! - **Classification**: decide whether a link is worth previewing at all
//! - **Fetch resolution**: direct request, CORS proxies, then a privileged context
//! - **Answer extraction**: site-specific rules with a generic `<pre>`/`<code>` scan
//! - **Normalization**: markup to readable text, artifacts removed, whitespace tidied
//! - **Language detection**: weighted pattern scoring over a fixed language set
//! - **Page processing**: concurrent per-link pipelines with URL and content dedup
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use codepeek::prelude::*;
//!
//! let config = CodepeekConfig::default();
//! let pipeline = PreviewPipeline::from_config(&config).await?;
//!
//! if let Some(preview) = pipeline.preview("https://stackoverflow.com/questions/4743730").await? {
//!     println!("{}: {}", preview.language, preview.snippet);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod classifier;
pub mod config;
pub mod errors;
pub mod events;
pub mod extract;
pub mod fetch;
pub mod language;
pub mod normalize;
pub mod pipeline;
pub mod testing;

#[cfg(feature = "discovery")]
pub mod discovery;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::classifier::{is_code_url, UrlClassifier};
    pub use crate::config::{
        CodepeekConfig, DetectionConfig, ExtractionConfig, FetchConfig, PageConfig, Settings,
        Theme,
    };
    pub use crate::errors::{CodepeekError, FetchError, Result};
    pub use crate::events::{EventSink, LoggingEventSink, NoOpEventSink};
    pub use crate::extract::{extract_answer, extract_answer_link, AnswerExtractor, AnswerRule};
    pub use crate::fetch::{FetchResolver, Fetcher, PrivilegedFetcher};
    pub use crate::language::{detect_language, Confidence, Language, LanguageDetector};
    pub use crate::normalize::{normalize_snippet, NormalizedSnippet, SnippetNormalizer};
    pub use crate::pipeline::{
        CandidateLink, Preview, PreviewOutcome, PreviewPipeline, PreviewSession, PreviewTarget,
        SkipReason,
    };

    #[cfg(feature = "discovery")]
    pub use crate::discovery::SearchPageScanner;
    #[cfg(feature = "http")]
    pub use crate::fetch::HttpFetcher;
}
