//! Decides whether markup in a fragment is the payload rather than formatting.

use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static FORMATTING_TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)</?(?:p|em|strong|b|i|a|code|pre|br|span|ul|ol|li|h[1-6]|blockquote|hr)\b[^>]*>",
    )
    .expect("FORMATTING_TAGS regex")
});

#[allow(clippy::expect_used)]
static STRUCTURAL_TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)<!doctype|</?(?:html|head|body|div|script|style|input|button|form|template|section|nav|header|footer|main|label|select|option|textarea|iframe|link|meta|canvas|svg)\b",
    )
    .expect("STRUCTURAL_TAGS regex")
});

// Case-sensitive on purpose: `<MyWidget` is component syntax, `<my` is not.
#[allow(clippy::expect_used)]
static COMPONENT_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[A-Z][A-Za-z0-9]*[\s/>]").expect("COMPONENT_TAG regex"));

#[allow(clippy::expect_used)]
static TEMPLATE_LITERAL_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`[^`]*<[a-zA-Z][^`]*`").expect("TEMPLATE_LITERAL_TAG regex"));

#[allow(clippy::expect_used)]
static MARKUP_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:inner|outer)HTML\s*\+?=|insertAdjacentHTML").expect("MARKUP_ASSIGNMENT regex")
});

#[allow(clippy::expect_used)]
static ELEMENT_CONSTRUCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"document\.createElement\(|React\.createElement\(|\$\(\s*['"]<"#)
        .expect("ELEMENT_CONSTRUCTION regex")
});

/// Returns true when the fragment contains HTML as code.
///
/// Formatting wrappers are removed first; whatever markup-looking text
/// survives (page structure tags, component tags, tags inside template
/// literals, markup assignment, element construction calls) is treated as
/// part of the snippet.
#[must_use]
pub fn contains_html_as_code(fragment: &str) -> bool {
    let stripped = FORMATTING_TAGS.replace_all(fragment, "");
    let found = STRUCTURAL_TAGS.is_match(&stripped)
        || COMPONENT_TAG.is_match(&stripped)
        || TEMPLATE_LITERAL_TAG.is_match(&stripped)
        || MARKUP_ASSIGNMENT.is_match(&stripped)
        || ELEMENT_CONSTRUCTION.is_match(&stripped);

    if found {
        tracing::trace!("Fragment carries markup as code");
    }
    found
}
