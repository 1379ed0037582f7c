//! Weighted-vote language detection.

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use super::rules::{RuleSet, DEFAULT_RULES};
use super::Language;
use crate::config::DetectionConfig;

/// How much the winning score can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Winning score at or above the threshold.
    High,
    /// Something scored, but below the threshold.
    Low,
    /// Nothing scored; the fallback tag was used.
    None,
}

/// Outcome of a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    /// Winning language, or [`Language::Clike`] when nothing scored.
    pub language: Language,
    /// The winning total.
    pub score: u32,
    /// Confidence band.
    pub confidence: Confidence,
}

impl Detection {
    /// Returns true unless the fallback was used.
    #[must_use]
    pub fn is_detected(&self) -> bool {
        self.confidence != Confidence::None
    }
}

/// Scores a snippet against every language's rules.
///
/// Pure and deterministic: the same text always yields the same tag.
#[derive(Debug, Clone)]
pub struct LanguageDetector {
    rules: Vec<RuleSet>,
    min_confidence: u32,
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new(&DetectionConfig::default())
    }
}

impl LanguageDetector {
    /// Creates a detector with the built-in rule table.
    #[must_use]
    pub fn new(config: &DetectionConfig) -> Self {
        Self {
            rules: DEFAULT_RULES.clone(),
            min_confidence: config.min_confidence,
        }
    }

    /// Creates a detector with a custom rule table.
    ///
    /// Rule sets are scanned in the given order, which decides ties.
    #[must_use]
    pub fn with_rules(rules: Vec<RuleSet>, config: &DetectionConfig) -> Self {
        Self {
            rules,
            min_confidence: config.min_confidence,
        }
    }

    /// Per-language totals, in table order.
    #[must_use]
    pub fn scores(&self, text: &str) -> Vec<(Language, u32)> {
        self.rules
            .iter()
            .map(|set| (set.language, set.score(text)))
            .collect()
    }

    /// Picks the highest-scoring language.
    ///
    /// Only a strictly greater total replaces the current best, so the
    /// earliest language in table order wins a tie.
    #[must_use]
    pub fn detect(&self, text: &str) -> Detection {
        let mut best = (Language::FALLBACK, 0u32);
        for (language, score) in self.scores(text) {
            if score > best.1 {
                best = (language, score);
            }
        }

        let (language, score) = best;
        let confidence = if score == 0 {
            Confidence::None
        } else if score < self.min_confidence {
            Confidence::Low
        } else {
            Confidence::High
        };

        if confidence == Confidence::Low {
            tracing::debug!(language = %language, score, "Low confidence language detection");
        }

        Detection {
            language,
            score,
            confidence,
        }
    }
}

/// Detects with the built-in table and default threshold.
#[must_use]
pub fn detect_language(text: &str) -> Detection {
    static DEFAULT: LazyLock<LanguageDetector> = LazyLock::new(LanguageDetector::default);
    DEFAULT.detect(text)
}
