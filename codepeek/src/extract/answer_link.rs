//! Canonical answer URL discovery.

use regex::Regex;
use std::sync::LazyLock;

/// Link patterns in priority order. The first full match wins.
pub const ANSWER_LINK_PATTERNS: [&str; 11] = [
    r"https?://stackoverflow\.com/questions/\d+",
    r"https?://github\.com/.+/issues/\d+",
    r"https?://docs\.microsoft\.com/.+/\d+",
    r"https?://(?:\w+\.)?stackexchange\.com/questions/\d+",
    r#"https?://learn\.microsoft\.com/[^"'\s<>]+"#,
    r#"https?://docs\.microsoft\.com/[^"'\s<>]+"#,
    r"https?://www\.c-sharpcorner\.com/.+/\d+",
    r"https?://www\.codeproject\.com/\w+/\d+",
    r"https?://dev\.to/.+/\w+",
    r"https?://www\.reddit\.com/r/\w+/comments/\w+/\w+",
    r"https?://dzone\.com/articles/\w+",
];

#[allow(clippy::expect_used)]
static DEFAULT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ANSWER_LINK_PATTERNS
        .iter()
        .map(|src| Regex::new(src).expect("ANSWER_LINK_PATTERNS regex"))
        .collect()
});

/// Scans raw HTML for a deep link to the answer.
#[derive(Debug, Clone)]
pub struct AnswerLinkExtractor {
    patterns: Vec<Regex>,
}

impl Default for AnswerLinkExtractor {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_PATTERNS.clone(),
        }
    }
}

impl AnswerLinkExtractor {
    /// Creates an extractor with the built-in patterns.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pattern with the lowest priority.
    #[must_use]
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.patterns.push(pattern);
        self
    }

    /// Returns the first pattern's full match, trying patterns in order.
    #[must_use]
    pub fn extract(&self, html: &str) -> Option<String> {
        self.patterns
            .iter()
            .find_map(|pattern| pattern.find(html))
            .map(|m| m.as_str().to_string())
    }
}

/// Extracts with the built-in patterns.
#[must_use]
pub fn extract_answer_link(html: &str) -> Option<String> {
    static DEFAULT: LazyLock<AnswerLinkExtractor> = LazyLock::new(AnswerLinkExtractor::default);
    DEFAULT.extract(html)
}
