//! Markup to readable text.

use regex::Regex;
use std::sync::LazyLock;

/// Ordered `(pattern, replacement)` rewrites applied by [`tags_to_text`].
/// Anchors must be rewritten before the final catch-all strip.
const TAG_REWRITES: [(&str, &str); 18] = [
    (r"(?i)<p\b[^>]*>", "\n"),
    (r"(?i)</p>", "\n"),
    (r"(?i)<br\s*/?>", "\n"),
    (r"(?i)<div\b[^>]*>", "\n"),
    (r"(?i)</div>", "\n"),
    (r"(?i)<h[1-6]\b[^>]*>", "\n\n## "),
    (r"(?i)</h[1-6]>", "\n"),
    (r"(?i)<li\b[^>]*>", "\n• "),
    (r"(?i)</li>", ""),
    (r"(?i)</?(?:ul|ol)\b[^>]*>", "\n"),
    (r#"(?i)<a\b[^>]*?href=["']([^"']+)["'][^>]*>(.*?)</a>"#, "${2} (${1})"),
    (r"(?i)<code\b[^>]*>", "`"),
    (r"(?i)</code>", "`"),
    (r"(?i)<pre\b[^>]*>", "\n```\n"),
    (r"(?i)</pre>", "\n```\n"),
    (r"(?i)<(?:strong|b)\b[^>]*>|</(?:strong|b)>", "**"),
    (r"(?i)<(?:em|i)\b[^>]*>|</(?:em|i)>", "*"),
    (r"<[^>]+>", ""),
];

#[allow(clippy::expect_used)]
static TAG_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    TAG_REWRITES
        .iter()
        .map(|(pattern, replacement)| (Regex::new(pattern).expect("TAG_REWRITES regex"), *replacement))
        .collect()
});

#[allow(clippy::expect_used)]
static CODE_WRAPPERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?(?:pre|code)\b[^>]*>").expect("CODE_WRAPPERS regex"));

#[allow(clippy::expect_used)]
static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("LINE_BREAK regex"));

/// Converts formatting markup into plain text with markdown-ish markers.
#[must_use]
pub fn tags_to_text(html: &str) -> String {
    TAG_RULES
        .iter()
        .fold(html.to_string(), |text, (pattern, replacement)| {
            pattern.replace_all(&text, *replacement).into_owned()
        })
}

/// Unwraps `<pre>`/`<code>` wrappers and turns `<br>` into newlines, leaving
/// every other tag in place.
#[must_use]
pub fn unwrap_code_wrappers(html: &str) -> String {
    let unwrapped = CODE_WRAPPERS.replace_all(html, "");
    LINE_BREAK.replace_all(&unwrapped, "\n").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_paragraphs_become_newlines() {
        assert_eq!(tags_to_text("<p>one</p><p>two</p>"), "\none\n\ntwo\n");
    }

    #[test]
    fn test_headings_and_lists() {
        assert_eq!(tags_to_text("<h2>Title</h2>"), "\n\n## Title\n");
        assert_eq!(tags_to_text("<ul><li>a</li><li>b</li></ul>"), "\n\n• a\n• b\n");
    }

    #[test]
    fn test_anchor_keeps_text_and_url() {
        assert_eq!(
            tags_to_text(r#"see <a href="https://docs.rs/x" rel="nofollow">the docs</a>"#),
            "see the docs (https://docs.rs/x)"
        );
    }

    #[test]
    fn test_code_and_pre_fences() {
        assert_eq!(tags_to_text("<code>x</code>"), "`x`");
        assert_eq!(
            tags_to_text("<pre><code>let a;</code></pre>"),
            "\n```\n`let a;`\n```\n"
        );
    }

    #[test]
    fn test_inline_emphasis() {
        assert_eq!(tags_to_text("<strong>a</strong> <em>b</em> <b>c</b>"), "**a** *b* **c**");
    }

    #[test]
    fn test_pre_is_not_a_paragraph() {
        assert!(tags_to_text("<pre>x</pre>").contains("```"));
    }

    #[test]
    fn test_unknown_tags_are_removed() {
        assert_eq!(tags_to_text("<span class=\"k\">int</span> x"), "int x");
    }

    #[test]
    fn test_unwrap_code_wrappers_keeps_payload_markup() {
        assert_eq!(
            unwrap_code_wrappers("<pre><code>el.innerHTML = '<b>hi</b>';<br/>x</code></pre>"),
            "el.innerHTML = '<b>hi</b>';\nx"
        );
    }
}
