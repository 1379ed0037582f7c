//! Answer-fragment extraction.
//!
//! Domain rules are plain trait objects evaluated in priority order. A rule
//! identifies its site by a substring of the HTML (so mirrors and redirects
//! still match) and extracts with a regex whose alternatives cover the site's
//! markup variants. When no rule yields, [`GenericCodeScan`] takes over.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use super::generic::GenericCodeScan;
use super::truncate_chars;
use crate::config::ExtractionConfig;

/// One site-specific extraction strategy.
pub trait AnswerRule: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Returns true if the page looks like it came from this site.
    fn identifies(&self, html: &str) -> bool;

    /// Pulls the answer fragment out of the page.
    fn extract(&self, html: &str) -> Option<String>;
}

/// Substring marker plus capture regex.
///
/// The first non-empty capture group of the leftmost match is the fragment.
#[derive(Debug, Clone)]
pub struct DomainRule {
    marker: String,
    pattern: Regex,
}

impl DomainRule {
    /// Creates a rule.
    pub fn new(marker: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            marker: marker.into(),
            pattern: Regex::new(pattern)?,
        })
    }

    /// Creates a rule from alternative patterns, tried as one alternation.
    pub fn with_alternatives(
        marker: impl Into<String>,
        alternatives: &[&str],
    ) -> Result<Self, regex::Error> {
        let joined = alternatives
            .iter()
            .map(|alt| format!("(?:{alt})"))
            .collect::<Vec<_>>()
            .join("|");
        Self::new(marker, &format!("(?i){joined}"))
    }

    /// The identifying substring.
    #[must_use]
    pub fn marker(&self) -> &str {
        &self.marker
    }
}

impl AnswerRule for DomainRule {
    fn name(&self) -> &str {
        &self.marker
    }

    fn identifies(&self, html: &str) -> bool {
        html.contains(&self.marker)
    }

    fn extract(&self, html: &str) -> Option<String> {
        let captures = self.pattern.captures(html)?;
        captures
            .iter()
            .skip(1)
            .flatten()
            .map(|group| group.as_str())
            .find(|group| !group.is_empty())
            .map(str::to_string)
    }
}

const QA_ANSWER: &str =
    r#"<div\s+class="answercell[^"]*"[\s\S]*?<div\s+class="s-prose[^"]*"[^>]*>([\s\S]*?)</div>"#;
const LANG_CODE: &str = r#"<code\s+class="lang-[^"]*"[^>]*>([\s\S]*?)</code>"#;

/// Built-in `(marker, alternatives)` table in priority order.
pub const DEFAULT_DOMAIN_RULES: [(&str, &[&str]); 11] = [
    ("stackoverflow.com", &[QA_ANSWER]),
    (
        "github.com",
        &[
            r#"<div\s+class="comment-body[^"]*"[^>]*>([\s\S]*?)</div>"#,
            r#"<div\s+class="markdown-body[^"]*"[^>]*>([\s\S]*?)</div>"#,
            r#"<article[^>]*class="markdown-body[^"]*"[^>]*>([\s\S]*?)</article>"#,
        ],
    ),
    ("stackexchange.com", &[QA_ANSWER]),
    ("webmasters.stackexchange.com", &[QA_ANSWER]),
    ("learn.microsoft.com", &[LANG_CODE]),
    ("docs.microsoft.com", &[LANG_CODE]),
    (
        "c-sharpcorner.com",
        &[r#"<div\s+class="answer-body">\s*<div\s+class="main">\s*([\s\S]*?)</div>"#],
    ),
    ("codeproject.com", &[r#"<div\s+class="article-content"[^>]*>([\s\S]*?)</div>"#]),
    ("dev.to", &[r#"<div\s+class="article-body"[^>]*>([\s\S]*?)</div>"#]),
    ("reddit.com", &[r"<code[^>]*>([\s\S]*?)</code>"]),
    ("dzone.com", &[r#"<div\s+class="body"[^>]*>([\s\S]*?)</div>"#]),
];

/// Built-in domain rules.
///
/// # Panics
///
/// Panics if a built-in pattern fails to compile.
#[must_use]
#[allow(clippy::expect_used)]
pub fn default_rules() -> Vec<Box<dyn AnswerRule>> {
    DEFAULT_DOMAIN_RULES
        .iter()
        .map(|(marker, alternatives)| {
            Box::new(
                DomainRule::with_alternatives(*marker, alternatives)
                    .expect("DEFAULT_DOMAIN_RULES regex"),
            ) as Box<dyn AnswerRule>
        })
        .collect()
}

/// Finds the most likely answer fragment on a page.
pub struct AnswerExtractor {
    rules: Vec<Box<dyn AnswerRule>>,
    generic: GenericCodeScan,
    max_chars: usize,
}

impl fmt::Debug for AnswerExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnswerExtractor")
            .field("rules", &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>())
            .field("generic", &self.generic)
            .field("max_chars", &self.max_chars)
            .finish()
    }
}

impl Default for AnswerExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

impl AnswerExtractor {
    /// Creates an extractor with the built-in rules.
    #[must_use]
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            rules: default_rules(),
            generic: GenericCodeScan::new(config),
            max_chars: config.max_snippet_chars,
        }
    }

    /// Creates an extractor with no domain rules; only the generic scan runs.
    #[must_use]
    pub fn generic_only(config: &ExtractionConfig) -> Self {
        Self {
            rules: Vec::new(),
            ..Self::new(config)
        }
    }

    /// Appends a rule after the existing ones.
    #[must_use]
    pub fn with_rule(mut self, rule: impl AnswerRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Names of the rules, in evaluation order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Extracts the answer fragment, truncated to the character budget.
    #[must_use]
    pub fn extract(&self, html: &str) -> Option<String> {
        let fragment = self
            .rules
            .iter()
            .filter(|rule| rule.identifies(html))
            .find_map(|rule| {
                let fragment = rule.extract(html);
                match &fragment {
                    Some(f) => tracing::debug!(rule = rule.name(), len = f.len(), "Answer extracted"),
                    None => tracing::debug!(rule = rule.name(), "Rule identified page but found no answer"),
                }
                fragment
            })
            .or_else(|| self.generic.scan(html))?;

        Some(truncate_chars(&fragment, self.max_chars))
    }
}

static DEFAULT_EXTRACTOR: LazyLock<AnswerExtractor> = LazyLock::new(AnswerExtractor::default);

/// Extracts the answer fragment with the built-in rules and limits.
#[must_use]
pub fn extract_answer(html: &str) -> Option<String> {
    DEFAULT_EXTRACTOR.extract(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;
    use pretty_assertions::assert_eq;

    struct MarkerRule;

    impl AnswerRule for MarkerRule {
        fn name(&self) -> &str {
            "marker"
        }

        fn identifies(&self, html: &str) -> bool {
            html.contains("data-marker")
        }

        fn extract(&self, _html: &str) -> Option<String> {
            Some("from marker rule".to_string())
        }
    }

    #[test]
    fn test_stack_overflow_answer() {
        let fragment = AnswerExtractor::default()
            .extract(fixtures::STACK_OVERFLOW_ANSWER_PAGE)
            .unwrap();
        assert!(fragment.contains("console.log(&quot;hi&quot;);"));
        assert!(!fragment.contains("answercell"));
    }

    #[test]
    fn test_github_alternatives() {
        let fragment = AnswerExtractor::default()
            .extract(fixtures::GITHUB_ISSUE_PAGE)
            .unwrap();
        assert!(fragment.contains("cargo build --release"));
    }

    #[test]
    fn test_github_article_variant() {
        let html = r#"<a href="https://github.com/x">x</a><article id="readme" class="markdown-body entry">Readme body</article>"#;
        assert_eq!(AnswerExtractor::default().extract(html).unwrap(), "Readme body");
    }

    #[test]
    fn test_microsoft_lang_code() {
        let html = r#"<link href="https://learn.microsoft.com/x"><code class="lang-csharp">var x = 1;</code>"#;
        assert_eq!(AnswerExtractor::default().extract(html).unwrap(), "var x = 1;");
    }

    #[test]
    fn test_identified_rule_without_match_falls_through() {
        let html = "<p>stackoverflow.com mirror</p><pre>print('a fairly long line')</pre>";
        assert_eq!(
            AnswerExtractor::default().extract(html).unwrap(),
            "print('a fairly long line')"
        );
    }

    #[test]
    fn test_unknown_site_uses_generic_scan() {
        let html = "<html><pre>SELECT * FROM users WHERE id = 1</pre></html>";
        assert_eq!(
            AnswerExtractor::default().extract(html).unwrap(),
            "SELECT * FROM users WHERE id = 1"
        );
    }

    #[test]
    fn test_nothing_found() {
        assert!(extract_answer("<p>prose only</p>").is_none());
    }

    #[test]
    fn test_truncated_to_budget() {
        let long = "x".repeat(50);
        let html = format!("<pre>{long}</pre>");
        let extractor = AnswerExtractor::new(&ExtractionConfig::new().with_max_snippet_chars(30));

        let fragment = extractor.extract(&html).unwrap();
        assert_eq!(fragment, format!("{} ...", "x".repeat(30)));
    }

    #[test]
    fn test_custom_rule_plugs_in() {
        let extractor = AnswerExtractor::generic_only(&ExtractionConfig::default()).with_rule(MarkerRule);
        assert_eq!(extractor.rule_names(), vec!["marker"]);
        assert_eq!(
            extractor.extract("<div data-marker></div>").unwrap(),
            "from marker rule"
        );
    }

    #[test]
    fn test_default_rule_order() {
        let extractor = AnswerExtractor::default();
        let names = extractor.rule_names();
        assert_eq!(names.first(), Some(&"stackoverflow.com"));
        assert_eq!(names.last(), Some(&"dzone.com"));
        assert_eq!(names.len(), 11);
    }
}
