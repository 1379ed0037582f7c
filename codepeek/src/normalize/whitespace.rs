//! Statement reflow and blank-line collapse.

use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static STATEMENT_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r";[ \t]*(?:\r?\n)?").expect("STATEMENT_END regex"));

#[allow(clippy::expect_used)]
static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+").expect("BLANK_RUN regex"));

/// Puts a line break after every `;`, reusing one that is already there.
#[must_use]
pub fn reflow_statements(text: &str) -> String {
    STATEMENT_END.replace_all(text, ";\n").into_owned()
}

/// Collapses runs of blank lines to a single blank line and trims.
///
/// `collapse_blank_lines(collapse_blank_lines(x)) == collapse_blank_lines(x)`.
#[must_use]
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_RUN.replace_all(text, "\n\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reflow_splits_inline_statements() {
        assert_eq!(reflow_statements("a(); b(); c();"), "a();\nb();\nc();\n");
    }

    #[test]
    fn test_reflow_does_not_double_existing_breaks() {
        assert_eq!(reflow_statements("a();\nb();\r\n"), "a();\nb();\n");
    }

    #[test]
    fn test_collapse_blank_runs() {
        assert_eq!(collapse_blank_lines("a\n\n\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n  \n\t\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("\n\n  a  \n\n\n"), "a");
    }

    #[test]
    fn test_collapse_is_idempotent() {
        for input in [
            "a\n\n\n\nb\n \n \n c",
            "\n\n\nx;\n\n\n\ny;\n",
            "  lone  ",
            "",
            "one\n \ntwo\n\n \n\nthree",
        ] {
            let once = collapse_blank_lines(input);
            assert_eq!(collapse_blank_lines(&once), once, "input {input:?}");
        }
    }
}
