//! Markdown-artifact cleanup.
//!
//! The prompts forbid markup, but models still leak asterisks, bracketed
//! citation markers, and URLs into devotional prose. This is the single
//! cleanup step applied to every extracted field and, recursively, to every
//! string in a JSON-mode value.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static ASTERISKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*+").expect("valid asterisk pattern"));
static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]\n]*\]").expect("valid bracket pattern"));
static URLS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("valid url pattern"));
static BACKTICKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`+").expect("valid backtick pattern"));
static HEADINGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,6}[ \t]+").expect("valid heading pattern"));
static DOUBLE_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__").expect("valid underscore pattern"));
static SPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("valid space pattern"));

/// Strips residual Markdown artifacts from one extracted string.
pub fn clean_text(text: &str) -> String {
    let cleaned = ASTERISKS.replace_all(text, "");
    let cleaned = BRACKETED.replace_all(&cleaned, "");
    let cleaned = URLS.replace_all(&cleaned, "");
    let cleaned = BACKTICKS.replace_all(&cleaned, "");
    let cleaned = HEADINGS.replace_all(&cleaned, "");
    let cleaned = DOUBLE_UNDERSCORE.replace_all(&cleaned, "");
    let cleaned = SPACE_RUNS.replace_all(&cleaned, " ");
    cleaned.trim().to_string()
}

/// Applies [`clean_text`] to every string value in a JSON tree.
/// Keys are left untouched.
pub fn clean_json_value(value: Value) -> Value {
    match value {
        Value::String(s) => Value::String(clean_text(&s)),
        Value::Array(items) => Value::Array(items.into_iter().map(clean_json_value).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, clean_json_value(v)))
                .collect(),
        ),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_prose_passes_through() {
        let text = "Patience (sabr) is half of faith.";
        assert_eq!(clean_text(text), text);
    }

    #[test]
    fn test_asterisk_emphasis_is_stripped() {
        assert_eq!(clean_text("**Patience** is *beautiful*"), "Patience is beautiful");
    }

    #[test]
    fn test_bracketed_citations_are_stripped() {
        assert_eq!(
            clean_text("The scholars agree [Ibn Kathir, 4:12] on this point."),
            "The scholars agree on this point."
        );
    }

    #[test]
    fn test_urls_are_stripped() {
        assert_eq!(
            clean_text("See https://example.com/tafsir for more."),
            "See for more."
        );
    }

    #[test]
    fn test_headings_and_backticks_are_stripped() {
        assert_eq!(clean_text("## A Heading\n`term`"), "A Heading\nterm");
    }

    #[test]
    fn test_single_underscores_in_transliterations_survive(){
        assert_eq!(clean_text("the du_a of the traveler"), "the du_a of the traveler");
        assert_eq!(clean_text("__emphasis__"), "emphasis");
    }

    #[test]
    fn test_newlines_and_stanza_breaks_survive() {
        let poem = "Line one\nLine two\n\nLine three";
        assert_eq!(clean_text(poem), poem);
    }

    #[test]
    fn test_json_values_are_cleaned_recursively() {
        let value = json!({
            "title": "**The Light**",
            "imagery": [{"sub": "See [1] and https://x.test/a"}],
            "count": 4
        });
        let cleaned = clean_json_value(value);
        assert_eq!(cleaned["title"], "The Light");
        assert_eq!(cleaned["imagery"][0]["sub"], "See and");
        assert_eq!(cleaned["count"], 4);
    }
}
