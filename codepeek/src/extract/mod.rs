//! Extraction of the answer fragment and the answer link from raw page HTML.

pub mod answer;
pub mod answer_link;
pub mod generic;

pub use answer::{extract_answer, AnswerExtractor, AnswerRule, DomainRule};
pub use answer_link::{extract_answer_link, AnswerLinkExtractor};
pub use generic::GenericCodeScan;

/// Marker appended to a truncated fragment.
pub const TRUNCATION_MARKER: &str = " ...";

/// Cuts `text` to at most `max_chars` characters, appending
/// [`TRUNCATION_MARKER`] when anything was dropped.
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}{TRUNCATION_MARKER}", &text[..byte_index]),
        None => text.to_string(),
    }
}
