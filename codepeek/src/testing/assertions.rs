//! Test assertions for preview outcomes.

use crate::language::Language;
use crate::pipeline::{Preview, PreviewOutcome, SkipReason};

/// Asserts that a preview was rendered and returns it.
pub fn assert_rendered(outcome: &PreviewOutcome) -> &Preview {
    match outcome {
        PreviewOutcome::Rendered { preview } => preview,
        other => panic!("Expected a rendered preview, got {other:?}"),
    }
}

/// Asserts that the candidate was skipped for the given reason.
pub fn assert_skipped(outcome: &PreviewOutcome, expected: SkipReason) {
    assert_eq!(
        outcome.skip_reason(),
        Some(expected),
        "Expected skip {expected}, got {outcome:?}"
    );
}

/// Asserts that the candidate failed to fetch.
pub fn assert_failed(outcome: &PreviewOutcome) {
    assert!(
        matches!(outcome, PreviewOutcome::Failed { .. }),
        "Expected failure, got {outcome:?}"
    );
}

/// Asserts the detected language of a rendered preview.
pub fn assert_language(outcome: &PreviewOutcome, expected: Language) {
    let preview = assert_rendered(outcome);
    assert_eq!(
        preview.language, expected,
        "Expected language {expected}, got {}",
        preview.language
    );
}
