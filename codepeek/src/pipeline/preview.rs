//! Renderable previews.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::PageConfig;
use crate::language::{Confidence, Language};

/// SHA-256 (hex) of the first `chars` characters of the trimmed snippet.
#[must_use]
pub fn content_fingerprint(snippet: &str, chars: usize) -> String {
    let head: String = snippet.trim().chars().take(chars).collect();
    hex::encode(Sha256::digest(head.as_bytes()))
}

/// Everything a renderer needs for one search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    /// Normalized URL of the page the snippet came from.
    pub source_url: String,
    /// Normalized snippet text.
    pub snippet: String,
    /// Detected language.
    pub language: Language,
    /// Detection confidence.
    pub confidence: Confidence,
    /// Deep link to the answer, when one was found.
    pub answer_url: Option<String>,
    /// Content fingerprint used for dedup.
    pub fingerprint: String,
    /// Whether markup in the snippet is code.
    pub html_as_code: bool,
}

/// The visible part of a snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnippetView {
    /// Text to show.
    pub text: String,
    /// Whether lines were hidden.
    pub is_collapsed: bool,
    /// Lines in the full snippet.
    pub total_lines: usize,
}

impl Preview {
    /// Class the highlighter expects on the code element.
    #[must_use]
    pub fn highlight_class(&self) -> String {
        self.language.highlight_class()
    }

    /// First `max_lines` lines, flagged when more exist.
    #[must_use]
    pub fn view(&self, max_lines: usize) -> SnippetView {
        let lines: Vec<&str> = self.snippet.split('\n').collect();
        let total_lines = lines.len();

        if total_lines > max_lines {
            SnippetView {
                text: lines[..max_lines].join("\n"),
                is_collapsed: true,
                total_lines,
            }
        } else {
            SnippetView {
                text: self.snippet.clone(),
                is_collapsed: false,
                total_lines,
            }
        }
    }

    /// The view shown before the reader expands the snippet.
    #[must_use]
    pub fn collapsed_view(&self, page: &PageConfig) -> SnippetView {
        self.view(page.collapsed_lines)
    }

    /// Text placed on the clipboard: always the full snippet.
    #[must_use]
    pub fn copy_text(&self) -> &str {
        &self.snippet
    }
}
