//! Programming-language detection for normalized snippets.
//!
//! Detection is a weighted vote: every rule of every language whose pattern
//! matches adds its weight to that language, and the highest total wins.
//! The rule table lives in [`rules`] as plain data so it can be tested rule by
//! rule; [`detector`] does the summation and arg-max.

mod detector;
pub mod rules;

pub use detector::{detect_language, Confidence, Detection, LanguageDetector};
pub use rules::{LanguageRule, RuleSet};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of tags a snippet can be labelled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// C#.
    Csharp,
    /// JavaScript.
    Javascript,
    /// Python.
    Python,
    /// Java.
    Java,
    /// C++.
    Cpp,
    /// C.
    C,
    /// HTML markup.
    Html,
    /// CSS.
    Css,
    /// SQL.
    Sql,
    /// JSON.
    Json,
    /// XML.
    Xml,
    /// Generic C-like highlighting, used when nothing scored.
    Clike,
}

impl Language {
    /// Scored languages in canonical order. Ties go to the earlier entry.
    pub const SCORED: [Self; 11] = [
        Self::Csharp,
        Self::Javascript,
        Self::Python,
        Self::Java,
        Self::Cpp,
        Self::C,
        Self::Html,
        Self::Css,
        Self::Sql,
        Self::Json,
        Self::Xml,
    ];

    /// The fallback tag.
    pub const FALLBACK: Self = Self::Clike;

    /// Returns the tag string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csharp => "csharp",
            Self::Javascript => "javascript",
            Self::Python => "python",
            Self::Java => "java",
            Self::Cpp => "cpp",
            Self::C => "c",
            Self::Html => "html",
            Self::Css => "css",
            Self::Sql => "sql",
            Self::Json => "json",
            Self::Xml => "xml",
            Self::Clike => "clike",
        }
    }

    /// Whether semicolons should be reflowed into line breaks.
    #[must_use]
    pub fn reflows_statements(self) -> bool {
        !matches!(
            self,
            Self::Json | Self::Html | Self::Css | Self::Sql | Self::Xml
        )
    }

    /// CSS class the highlighter expects on the code element.
    #[must_use]
    pub fn highlight_class(self) -> String {
        format!("language-{}", self.as_str())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::SCORED
            .iter()
            .chain(std::iter::once(&Self::Clike))
            .find(|lang| lang.as_str() == lowered)
            .copied()
            .ok_or_else(|| format!("Unknown language tag: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_round_trip() {
        for lang in Language::SCORED {
            assert_eq!(lang.as_str().parse::<Language>().unwrap(), lang);
        }
        assert_eq!("clike".parse::<Language>().unwrap(), Language::Clike);
        assert!("cobol".parse::<Language>().is_err());
    }

    #[test]
    fn test_reflow_exclusions() {
        assert!(Language::Javascript.reflows_statements());
        assert!(Language::Clike.reflows_statements());
        for lang in [Language::Json, Language::Html, Language::Css, Language::Sql, Language::Xml] {
            assert!(!lang.reflows_statements());
        }
    }

    #[test]
    fn test_serde_uses_tag() {
        assert_eq!(serde_json::to_string(&Language::Csharp).unwrap(), "\"csharp\"");
        assert_eq!(Language::Cpp.highlight_class(), "language-cpp");
    }
}
