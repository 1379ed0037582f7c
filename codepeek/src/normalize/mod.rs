//! Snippet normalization.
//!
//! Turns an extracted HTML fragment into display text:
//!
//! 1. decide whether markup is the payload ([`contains_html_as_code`])
//! 2. convert tags to text, or only unwrap `<pre>`/`<code>` when markup is code
//! 3. decode every entity, for fragments that skipped the tag-to-text step
//! 4. strip scraper artifacts
//! 5. detect the language on the result
//! 6. reflow statements, unless the language is markup, data or SQL
//! 7. collapse blank lines and trim

pub mod artifacts;
pub mod entities;
pub mod html_detection;
pub mod tags;
pub mod whitespace;

pub use html_detection::contains_html_as_code;
pub use whitespace::collapse_blank_lines;

use serde::{Deserialize, Serialize};

use crate::language::{Confidence, Detection, Language, LanguageDetector};

/// A cleaned snippet ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedSnippet {
    /// Display text.
    pub text: String,
    /// Detected language.
    pub language: Language,
    /// Detection confidence.
    pub confidence: Confidence,
    /// Whether markup was kept as part of the code.
    pub html_as_code: bool,
}

impl NormalizedSnippet {
    /// Returns true if nothing is left to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Runs the normalization steps with a given detector.
#[derive(Debug, Clone, Default)]
pub struct SnippetNormalizer {
    detector: LanguageDetector,
}

impl SnippetNormalizer {
    /// Creates a normalizer around a detector.
    #[must_use]
    pub fn new(detector: LanguageDetector) -> Self {
        Self { detector }
    }

    /// The detector used for step 5.
    #[must_use]
    pub fn detector(&self) -> &LanguageDetector {
        &self.detector
    }

    /// Normalizes a raw fragment.
    #[must_use]
    pub fn normalize(&self, fragment: &str) -> NormalizedSnippet {
        let html_as_code = contains_html_as_code(fragment);

        // The tag path has already unescaped one level; decoding again would
        // turn `&amp;lt;` into `<`.
        let text = if html_as_code {
            entities::decode_all(&tags::unwrap_code_wrappers(fragment))
        } else {
            let text = tags::tags_to_text(fragment);
            let text = entities::decode_named_entities(&text);
            entities::strip_carriage_returns(&text)
        };
        let text = artifacts::remove_artifacts(&text);

        let Detection {
            language,
            confidence,
            ..
        } = self.detector.detect(&text);

        let text = if language.reflows_statements() {
            whitespace::reflow_statements(&text)
        } else {
            text
        };

        NormalizedSnippet {
            text: collapse_blank_lines(&text),
            language,
            confidence,
            html_as_code,
        }
    }
}

/// Normalizes with the built-in detector.
#[must_use]
pub fn normalize_snippet(fragment: &str) -> NormalizedSnippet {
    SnippetNormalizer::default().normalize(fragment)
}
