//! URL classification: is a search result worth a code preview?
//!
//! A precision-optional prefilter. A URL qualifies when it contains any of a
//! fixed list of site/ecosystem keywords or matches one of a fixed list of
//! path/domain patterns. False positives cost one wasted fetch.

use regex::Regex;
use std::sync::LazyLock;

/// Substrings that mark a URL as code-related (compared case-insensitively).
pub const CODE_KEYWORDS: [&str; 21] = [
    "stackoverflow",
    "github",
    "codepen",
    "code",
    "learn.microsoft",
    "learn",
    "tech",
    "c-sharpcorner",
    "connectionstrings",
    "docker",
    "java",
    "stackexchange",
    "sql",
    "getbootstrap",
    "bootstrap",
    "atlassian",
    "git",
    "linux",
    "debian",
    "ubuntu",
    "tutorial",
];

const CODE_PATTERN_SOURCES: [&str; 14] = [
    r"(?i)/blog/",
    r"(?i)/tutorial/",
    r"(?i)/code/",
    r"(?i)stackoverflow\.com",
    r"(?i)stackexchange\.com",
    r"(?i)docs\.microsoft\.com",
    r"(?i)learn\.microsoft\.com",
    r"(?i)c-sharpcorner\.com",
    r"(?i)connectionstrings\.com",
    r"(?i)getbootstrap\.com",
    r"(?i)docs\.docker\.com",
    r"(?i)atlassian\.com",
    r"(?i)git-scm\.com",
    r"(?i)tutorialspoint\.com",
];

#[allow(clippy::expect_used)]
static CODE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    CODE_PATTERN_SOURCES
        .iter()
        .map(|src| Regex::new(src).expect("CODE_PATTERNS regex"))
        .collect()
});

/// Decides whether a link points at a programming Q&A or documentation page.
#[derive(Debug, Clone)]
pub struct UrlClassifier {
    keywords: Vec<String>,
    patterns: Vec<Regex>,
}

impl Default for UrlClassifier {
    fn default() -> Self {
        Self {
            keywords: CODE_KEYWORDS.iter().map(|k| (*k).to_string()).collect(),
            patterns: CODE_PATTERNS.clone(),
        }
    }
}

impl UrlClassifier {
    /// Creates a classifier with the built-in lists.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a keyword.
    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into().to_lowercase());
        self
    }

    /// Adds a pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.patterns.push(pattern);
        self
    }

    /// Returns true if the URL looks code-related.
    #[must_use]
    pub fn is_code_url(&self, url: &str) -> bool {
        let lowered = url.to_lowercase();
        self.keywords.iter().any(|k| lowered.contains(k.as_str()))
            || self.patterns.iter().any(|p| p.is_match(url))
    }
}

/// Classifies with the built-in lists.
#[must_use]
pub fn is_code_url(url: &str) -> bool {
    static DEFAULT: LazyLock<UrlClassifier> = LazyLock::new(UrlClassifier::default);
    DEFAULT.is_code_url(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sites_match() {
        assert!(is_code_url("https://stackoverflow.com/questions/11227809/why"));
        assert!(is_code_url("https://github.com/rust-lang/rust/issues/1"));
        assert!(is_code_url("https://learn.microsoft.com/en-us/dotnet/csharp/"));
        assert!(is_code_url("https://superuser.STACKEXCHANGE.com/q/1"));
    }

    #[test]
    fn test_path_patterns_match() {
        assert!(is_code_url("https://example.com/blog/post-1"));
        assert!(is_code_url("https://www.tutorialspoint.com/index.htm"));
    }

    #[test]
    fn test_unrelated_urls_do_not_match() {
        for url in [
            "https://www.bbc.co.uk/news/world",
            "https://en.wikipedia.org/wiki/Bread",
            "https://www.amazon.com/dp/B000",
            "https://maps.example.org/place/paris",
        ] {
            assert!(!is_code_url(url), "{url} should not be code-related");
        }
    }

    #[test]
    fn test_every_builtin_pattern_compiles_and_matches_its_domain() {
        assert_eq!(CODE_PATTERNS.len(), CODE_PATTERN_SOURCES.len());
        assert!(CODE_PATTERNS[12].is_match("https://git-scm.com/book"));
    }

    #[test]
    fn test_custom_keyword() {
        let classifier = UrlClassifier::new().with_keyword("RustLang");
        assert!(classifier.is_code_url("https://www.rustlang.example/"));
        assert!(!UrlClassifier::new().is_code_url("https://www.rustlang.example/"));
    }

    #[test]
    fn test_custom_pattern() {
        let classifier = UrlClassifier::new().with_pattern(Regex::new(r"docs\.rs").unwrap());
        assert!(classifier.is_code_url("https://docs.rs/regex"));
    }
}
