//! Site-independent `<pre>`/`<code>` scan.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::ExtractionConfig;

#[allow(clippy::expect_used)]
static PRE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<pre\b[^>]*>[\s\S]*?</pre>").expect("PRE_BLOCK regex"));

#[allow(clippy::expect_used)]
static CODE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<code\b[^>]*>[\s\S]*?</code>").expect("CODE_BLOCK regex"));

#[allow(clippy::expect_used)]
static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("ANY_TAG regex"));

#[allow(clippy::expect_used)]
static PRE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?pre[^>]*>").expect("PRE_TAG regex"));

#[allow(clippy::expect_used)]
static CODE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?code[^>]*>").expect("CODE_TAG regex"));

#[allow(clippy::expect_used)]
static BR_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("BR_TAG regex"));

/// Picks code out of any page.
///
/// `<pre>` blocks win when at least one has enough visible text; otherwise
/// the first few `<code>` blocks are used.
#[derive(Debug, Clone)]
pub struct GenericCodeScan {
    min_pre_text_length: usize,
    max_pre_blocks: usize,
    max_code_blocks: usize,
}

impl Default for GenericCodeScan {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

impl GenericCodeScan {
    /// Creates a scan with the given thresholds.
    #[must_use]
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            min_pre_text_length: config.min_pre_text_length,
            max_pre_blocks: config.max_pre_blocks,
            max_code_blocks: config.max_code_blocks,
        }
    }

    /// Runs the scan. Returns `None` when the page has no usable code.
    #[must_use]
    pub fn scan(&self, html: &str) -> Option<String> {
        self.scan_pre(html)
            .or_else(|| self.scan_code(html))
            .filter(|fragment| !fragment.trim().is_empty())
    }

    fn scan_pre(&self, html: &str) -> Option<String> {
        let blocks: Vec<String> = PRE_BLOCK
            .find_iter(html)
            .map(|m| m.as_str())
            .filter(|block| {
                ANY_TAG.replace_all(block, "").trim().chars().count() > self.min_pre_text_length
            })
            .take(self.max_pre_blocks)
            .map(|block| {
                let unwrapped = PRE_TAG.replace_all(block, "");
                BR_TAG.replace_all(&unwrapped, "\n").into_owned()
            })
            .collect();

        tracing::trace!(blocks = blocks.len(), "Qualifying <pre> blocks");
        (!blocks.is_empty()).then(|| blocks.join("\n\n"))
    }

    fn scan_code(&self, html: &str) -> Option<String> {
        let blocks: Vec<String> = CODE_BLOCK
            .find_iter(html)
            .take(self.max_code_blocks)
            .map(|m| {
                let unwrapped = CODE_TAG.replace_all(m.as_str(), "");
                BR_TAG.replace_all(&unwrapped, "\n").into_owned()
            })
            .collect();

        (!blocks.is_empty()).then(|| blocks.join("\n"))
    }
}
