//! Weighted pattern table, one rule list per language.
//!
//! Every pattern is compiled case-insensitively and tested anywhere in the
//! snippet. Rules are independent: several rules of one language may fire on
//! the same text.

use regex::Regex;
use std::sync::LazyLock;

use super::Language;

/// One `(pattern, weight)` entry.
#[derive(Debug, Clone)]
pub struct LanguageRule {
    /// Source pattern, before the case-insensitive flag is added.
    pub source: &'static str,
    /// Compiled pattern.
    pub pattern: Regex,
    /// Score added when the pattern matches.
    pub weight: u32,
}

impl LanguageRule {
    /// Compiles a rule.
    ///
    /// # Panics
    ///
    /// Panics if the pattern is not a valid regex. Only used for the static table.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new(source: &'static str, weight: u32) -> Self {
        let pattern = Regex::new(&format!("(?i){source}")).expect("LanguageRule regex");
        Self {
            source,
            pattern,
            weight,
        }
    }

    /// Returns true if the rule fires on the text.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// The rules of one language.
#[derive(Debug, Clone)]
pub struct RuleSet {
    /// Language these rules vote for.
    pub language: Language,
    /// Ordered rules.
    pub rules: Vec<LanguageRule>,
}

impl RuleSet {
    fn new(language: Language, rules: &[(&'static str, u32)]) -> Self {
        Self {
            language,
            rules: rules
                .iter()
                .map(|(source, weight)| LanguageRule::new(source, *weight))
                .collect(),
        }
    }

    /// Sum of the weights of every rule that fires.
    #[must_use]
    pub fn score(&self, text: &str) -> u32 {
        self.rules
            .iter()
            .filter(|rule| rule.matches(text))
            .map(|rule| rule.weight)
            .sum()
    }
}

const CSHARP: &[(&str, u32)] = &[
    (r"\busing\s+system", 10),
    (r"\busing\s+\w+(\.\w+)*;", 7),
    (r"\bnamespace\s+\w+", 10),
    (r"\bconsole\.writeline\(", 10),
    (r"\bconsole\.write\(", 9),
    (r"\bpublic\s+record\s+\w+", 10),
    (r"\brecord\s+\w+\s*\(", 10),
    (
        r"\b(public|private|protected|internal)\s+(static\s+)?(class|interface|enum|struct|record)\s+\w+",
        10,
    ),
    (
        r"\b(public|private|protected|internal)\s+(static\s+)?(void|string|int|bool|double|float|decimal|long|short|byte|char|object|Task)\s+\w+\s*\(",
        9,
    ),
    (
        r"\b(string|int|bool|double|float|decimal|var|long|short|byte|char|object)\s+\w+\s*=",
        6,
    ),
    (r"\bnew\s*\([^)]*\);", 8),
    (
        r"\b(List|Dictionary|ArrayList|HashSet|Queue|Stack|IEnumerable|ICollection)<.+>",
        9,
    ),
    (r"\basync\s+Task", 9),
    (r"\bTask<\w+>", 9),
    (r"\bawait\s+\w+\..*\(", 5),
    (r"\.net|c#|csharp", 10),
    (r"\b(linq|entity|wpf|asp\.net|mvc)\b", 8),
    (r"\{\s*get\s*;", 8),
    (r"\{\s*set\s*;", 8),
    (r"\bget\s*=>", 7),
    (r"\binit\s*;", 8),
    (r"\[HttpGet\]|\[HttpPost\]|\[Route\]", 10),
    (r"\bMain\s*\(\s*\)", 8),
    (r"\bstatic\s+void\s+Main", 10),
];

const JAVASCRIPT: &[(&str, u32)] = &[
    (r"\bconsole\.log\(", 10),
    (r"\bconsole\.(warn|error|info|debug)\(", 9),
    (r"\bconst\s+\w+\s*=", 9),
    (r"\blet\s+\w+\s*=", 9),
    (r"\bvar\s+\w+\s*=", 7),
    (r"\bfunction\s+\w+\s*\(", 8),
    (r"\bfunction\s*\(", 7),
    (r"\(\s*\)\s*=>", 8),
    (r"\w+\s*=>\s*\{", 7),
    (r"\w+\s*=>\s*\w+", 6),
    (r"\b(document|window)\.", 10),
    (r"\bjquery|\$\(", 9),
    (r"\basync\s+function", 8),
    (r"\basync\s+\w+\s*\(", 7),
    (r"\basync\s+\(", 7),
    (r"\b(npm|node|nodejs|react|vue|angular|express|webpack)\b", 9),
    (r"\.then\(", 7),
    (r"\.catch\(", 7),
    (r"\.finally\(", 7),
    (r"\bnew\s+Promise\(", 9),
    (r#"require\(['"]"#, 9),
    (r#"import\s+.*from\s+['"]"#, 9),
    (r"export\s+(default|const|function|class)", 9),
    (r"\bsetTimeout|setInterval|clearTimeout|clearInterval\b", 8),
    (r"addEventListener|removeEventListener", 8),
    (r"\bJSON\.(parse|stringify)\(", 8),
    (r#"===|!==|typeof\s+\w+\s+===\s+["']\w+["']"#, 6),
];

const PYTHON: &[(&str, u32)] = &[
    (r"\bdef\s+\w+\s*\(", 10),
    (r"\bimport\s+\w+", 8),
    (r"\bfrom\s+\w+\s+import", 8),
    (r"\bprint\s*\(", 8),
    (r"\b(if|elif|else)\s+.*:", 6),
    (r"\bfor\s+\w+\s+in\s+", 7),
    (r"\bwhile\s+.*:", 5),
    (r"\bclass\s+\w+(\(.*\))?:", 8),
    (r"\bself\.", 8),
    // `#` then space or `!`, so `#include` and `#define` lines do not count.
    (r"(?m)^\s*#(?:[\s!].*)?$", 3),
    (r"\b(django|flask|pandas|numpy)\b", 8),
];

const JAVA: &[(&str, u32)] = &[
    (r"\bpublic\s+(static\s+)?class\s+\w+", 10),
    (r"\bpublic\s+static\s+void\s+main\s*\(", 10),
    (r"\bsystem\.out\.println\(", 10),
    (r"\bprivate\s+(static\s+)?(int|string|void|boolean)\b", 7),
    (r"\bimport\s+java\.", 10),
    (r"\bnew\s+\w+\s*\(", 4),
    (r"\b(arraylist|hashmap|string)\s*<", 6),
    (r"@override\b", 8),
    (r"\bextends\s+\w+", 6),
    (r"\bimplements\s+\w+", 6),
];

const CPP: &[(&str, u32)] = &[
    (r"#include\s*<\w+>", 10),
    (r"\bstd::cout\s*<<", 10),
    (r"\bstd::cin\s*>>", 10),
    (r"\busing\s+namespace\s+std", 10),
    (r"\bclass\s+\w+\s*\{", 6),
    (r"\bpublic:|private:|protected:", 7),
    (r"\bvirtual\s+\w+", 7),
    (r"\btemplate\s*<", 8),
    (r"\bstd::(string|vector|map)", 7),
];

const C: &[(&str, u32)] = &[
    (r"#include\s*<(stdio|stdlib|string|math)\.h>", 10),
    (r"\bprintf\s*\(", 9),
    (r"\bscanf\s*\(", 9),
    (r"\bmalloc\s*\(", 8),
    (r"\bfree\s*\(", 7),
    (r"\bstruct\s+\w+\s*\{", 7),
    (r"\bmain\s*\(\s*(void|int\s+argc)", 6),
];

const HTML: &[(&str, u32)] = &[
    (r"<(!DOCTYPE|html|head|body|div|span|p|a|img|script|style)\b", 10),
    (r"</\w+>", 8),
    (r#"\bclass\s*=\s*["']"#, 5),
    (r#"\bid\s*=\s*["']"#, 5),
    (r"<\w+[^>]*>", 4),
];

const CSS: &[(&str, u32)] = &[
    (r"\{[^}]*:\s*[^;]+;", 10),
    (r"\.([\w-]+)\s*\{", 8),
    (r"#([\w-]+)\s*\{", 7),
    (r"\b(color|background|margin|padding|font):", 6),
    (r"@media|@keyframes|@import", 8),
];

const SQL: &[(&str, u32)] = &[
    (r"\bselect\s+.*\bfrom\b", 10),
    (r"\binsert\s+into\b", 10),
    (r"\bupdate\s+\w+\s+set\b", 10),
    (r"\bdelete\s+from\b", 10),
    (r"\bwhere\s+\w+\s*=", 7),
    (r"\b(inner|left|right|outer)\s+join\b", 8),
    (r"\bcreate\s+(table|database|index)\b", 9),
];

const JSON: &[(&str, u32)] = &[
    (r"^\s*\{[\s\S]*\}\s*$", 10),
    (r#""\w+"\s*:\s*["\[\{]"#, 8),
    (r"^\s*\[[\s\S]*\]\s*$", 7),
];

const XML: &[(&str, u32)] = &[
    (r"<\?xml", 10),
    (r"<\w+[^>]*>[\s\S]*</\w+>", 7),
    (r"<\w+[^>]*/>", 6),
];

/// The built-in table in canonical language order.
pub static DEFAULT_RULES: LazyLock<Vec<RuleSet>> = LazyLock::new(|| {
    Language::SCORED
        .iter()
        .map(|lang| RuleSet::new(*lang, table_for(*lang)))
        .collect()
});

fn table_for(language: Language) -> &'static [(&'static str, u32)] {
    match language {
        Language::Csharp => CSHARP,
        Language::Javascript => JAVASCRIPT,
        Language::Python => PYTHON,
        Language::Java => JAVA,
        Language::Cpp => CPP,
        Language::C => C,
        Language::Html => HTML,
        Language::Css => CSS,
        Language::Sql => SQL,
        Language::Json => JSON,
        Language::Xml => XML,
        Language::Clike => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules_for(language: Language) -> &'static RuleSet {
        DEFAULT_RULES
            .iter()
            .find(|set| set.language == language)
            .unwrap()
    }

    fn fires(language: Language, source: &str, text: &str) -> bool {
        rules_for(language)
            .rules
            .iter()
            .find(|rule| rule.source == source)
            .unwrap_or_else(|| panic!("no rule {source}"))
            .matches(text)
    }

    #[test]
    fn test_table_follows_canonical_order() {
        let order: Vec<Language> = DEFAULT_RULES.iter().map(|set| set.language).collect();
        assert_eq!(order, Language::SCORED.to_vec());
        assert!(DEFAULT_RULES.iter().all(|set| !set.rules.is_empty()));
    }

    #[test]
    fn test_rules_are_case_insensitive() {
        assert!(fires(Language::Csharp, r"\bconsole\.writeline\(", "Console.WriteLine(x)"));
        assert!(fires(Language::Sql, r"\bselect\s+.*\bfrom\b", "SELECT id FROM users"));
    }

    #[test]
    fn test_csharp_property_rules() {
        assert!(fires(Language::Csharp, r"\{\s*get\s*;", "public int Id { get; set; }"));
        assert!(fires(Language::Csharp, r"\[HttpGet\]|\[HttpPost\]|\[Route\]", "[HttpGet]"));
    }

    #[test]
    fn test_include_rules_match_at_line_start() {
        assert!(fires(Language::Cpp, r"#include\s*<\w+>", "#include <iostream>"));
        assert!(fires(Language::C, r"#include\s*<(stdio|stdlib|string|math)\.h>", "#include <stdio.h>"));
        assert!(!fires(Language::Cpp, r"#include\s*<\w+>", "#include <stdio.h>"));
    }

    #[test]
    fn test_java_override_annotation() {
        assert!(fires(Language::Java, r"@override\b", "@Override\npublic String toString()"));
    }

    #[test]
    fn test_json_anchors_cover_whole_text() {
        assert!(fires(Language::Json, r"^\s*\{[\s\S]*\}\s*$", "{\n  \"a\": 1\n}"));
        assert!(!fires(Language::Json, r"^\s*\{[\s\S]*\}\s*$", "x = {\"a\": 1}"));
    }

    const PYTHON_COMMENT: &str = r"(?m)^\s*#(?:[\s!].*)?$";

    #[test]
    fn test_python_comment_rule_is_multiline() {
        assert!(fires(Language::Python, PYTHON_COMMENT, "x = 1\n# note"));
        assert!(fires(Language::Python, PYTHON_COMMENT, "#!/usr/bin/env python3\nimport os"));
        assert!(fires(Language::Python, PYTHON_COMMENT, "x = 1\n#\ny = 2"));
    }

    #[test]
    fn test_python_comment_rule_skips_preprocessor_lines() {
        assert!(!fires(Language::Python, PYTHON_COMMENT, "#include <stdio.h>"));
        assert!(!fires(
            Language::Python,
            PYTHON_COMMENT,
            "#define MAX 10\n#pragma once\nint main(void) { return 0; }"
        ));
    }

    #[test]
    fn test_rule_set_score_sums_matching_weights() {
        let set = rules_for(Language::Sql);
        // select..from (10) + where (7)
        assert_eq!(set.score("select * from t where id = 1"), 17);
        assert_eq!(set.score(""), 0);
    }
}
