//! Scraper noise removal.

use regex::Regex;
use std::sync::LazyLock;

const ARTIFACT_PATTERNS: [(&str, &str); 5] = [
    // Standalone line-ending labels, with their line.
    (r"(?m)^[ \t]*(?:CRLF|CR|LF)[ \t]*$\n?", ""),
    // Trailing line-ending labels.
    (r"(?m)[ \t]+(?:CRLF|CR|LF)[ \t]*$", ""),
    (r"(?m)^[ \t]*\d{1,4}:[ \t]", ""),
    (r"(?mi)^[ \t]*(?:copy(?: code| to clipboard)?|copied!?)[ \t]*$\n?", ""),
    (r"(?i)\b(?:show|see|read)\s+more\b\.{0,3}", ""),
];

#[allow(clippy::expect_used)]
static ARTIFACTS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    ARTIFACT_PATTERNS
        .iter()
        .map(|(pattern, replacement)| (Regex::new(pattern).expect("ARTIFACT_PATTERNS regex"), *replacement))
        .collect()
});

/// Strips line-ending labels, line-number gutters, copy-button text and
/// "show more" phrases.
#[must_use]
pub fn remove_artifacts(text: &str) -> String {
    ARTIFACTS
        .iter()
        .fold(text.to_string(), |acc, (pattern, replacement)| {
            pattern.replace_all(&acc, *replacement).into_owned()
        })
}
