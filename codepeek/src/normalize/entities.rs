//! Entity decoding and carriage-return stripping.

use regex::Regex;
use std::sync::LazyLock;

/// Named entities decoded by the tag-to-text step. `&amp;` goes last so an
/// escaped entity such as `&amp;lt;` is only unescaped one level here.
pub const NAMED_ENTITIES: [(&str, &str); 17] = [
    ("&quot;", "\""),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&nbsp;", " "),
    ("&copy;", "©"),
    ("&reg;", "®"),
    ("&ldquo;", "\""),
    ("&rdquo;", "\""),
    ("&lsquo;", "'"),
    ("&rsquo;", "'"),
    ("&hellip;", "..."),
    ("&mdash;", "—"),
    ("&ndash;", "–"),
    ("&#47;", "/"),
    ("&#39;", "'"),
    ("&apos;", "'"),
    ("&amp;", "&"),
];

#[allow(clippy::expect_used)]
static CARRIAGE_RETURN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\r|&#13;|&#x0*d;").expect("CARRIAGE_RETURN regex"));

/// Decodes the fixed set of named entities.
#[must_use]
pub fn decode_named_entities(text: &str) -> String {
    NAMED_ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (entity, replacement)| {
            if acc.contains(entity) {
                acc.replace(entity, replacement)
            } else {
                acc
            }
        })
}

/// Removes literal and entity-encoded carriage returns.
#[must_use]
pub fn strip_carriage_returns(text: &str) -> String {
    CARRIAGE_RETURN.replace_all(text, "").into_owned()
}

/// Full HTML entity decoding, numeric and named. Only for fragments that
/// did not go through [`decode_named_entities`].
#[must_use]
pub fn decode_all(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}
