//! Delimited output extraction.
//!
//! Model output is expected to wrap each field as `NAME===content===NAME`
//! (or the asymmetric `NAME===content===`). Models deviate, so each field
//! resolves through an explicit step sequence: strict match → loose match →
//! caller-supplied default. Missing fields are always absorbed; this module
//! never fails in delimiter mode.

pub mod clean;
pub mod json;

use std::collections::HashMap;

use regex::Regex;

use crate::extraction::clean::clean_text;

/// One named field expected in delimited model output, with the default
/// substituted when neither match step finds it.
#[derive(Debug, Clone)]
pub struct FieldSpec<'a> {
    pub name: &'a str,
    pub default: &'a str,
}

impl<'a> FieldSpec<'a> {
    pub fn new(name: &'a str, default: &'a str) -> Self {
        Self { name, default }
    }
}

/// Outcome of matching a single field within the current search window.
enum FieldMatch {
    /// `NAME=== content ===NAME` found; offset is the end of the close token.
    Strict { value: String, end: usize },
    /// Open token found but no close; content runs to the next sentinel or
    /// end of text, and the offset stops before that sentinel so a following
    /// field can still claim it.
    Loose { value: String, end: usize },
    Missing,
}

/// Extracts all declared fields from raw model text.
///
/// Fields are processed in caller-declared order, and each field's search
/// starts after the end of the previous field's matched span, so one field's
/// close token is never mistaken for another's. Every declared name is
/// present in the result: matched content is run through the Markdown
/// cleanup step, unmatched fields get the caller's default verbatim.
pub fn extract_fields(text: &str, fields: &[FieldSpec<'_>]) -> HashMap<String, String> {
    let mut out = HashMap::with_capacity(fields.len());
    let mut cursor = 0usize;

    for field in fields {
        match match_field(&text[cursor..], field.name) {
            FieldMatch::Strict { value, end } | FieldMatch::Loose { value, end } => {
                cursor += end;
                out.insert(field.name.to_string(), clean_text(&value));
            }
            FieldMatch::Missing => {
                out.insert(field.name.to_string(), field.default.to_string());
            }
        }
    }

    out
}

fn match_field(window: &str, name: &str) -> FieldMatch {
    if let Some((value, end)) = try_strict(window, name) {
        return FieldMatch::Strict { value, end };
    }
    if let Some((value, end)) = try_loose(window, name) {
        return FieldMatch::Loose { value, end };
    }
    FieldMatch::Missing
}

/// `NAME=== content ===NAME`, non-greedy, spanning lines.
fn try_strict(window: &str, name: &str) -> Option<(String, usize)> {
    let escaped = regex::escape(name);
    let pattern = format!(r"(?s){escaped}===\s*(.*?)\s*==={escaped}");
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(window)?;
    let whole = caps.get(0)?;
    let content = caps.get(1)?;
    Some((content.as_str().to_string(), whole.end()))
}

/// `NAME===` through the next sentinel or end of text. The sentinel is
/// either another field's open token (`OTHER===`) or a bare `===` close.
fn try_loose(window: &str, name: &str) -> Option<(String, usize)> {
    let escaped = regex::escape(name);
    let pattern = format!(r"(?s){escaped}===\s*(.*?)\s*(?:[A-Z][A-Z0-9_]*===|===|$)");
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(window)?;
    let content = caps.get(1)?;
    Some((content.as_str().to_string(), content.end()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_field(text: &str, name: &str, default: &str) -> String {
        let spec = [FieldSpec::new(name, default)];
        let mut fields = extract_fields(text, &spec);
        fields.remove(name).unwrap()
    }

    #[test]
    fn test_well_formed_pair_extracts_exact_content() {
        let text = "TITLE===Morning Light===TITLE";
        let fields = extract_fields(text, &[FieldSpec::new("TITLE", "Untitled")]);
        assert_eq!(fields["TITLE"], "Morning Light");
    }

    #[test]
    fn test_title_and_poem_scenario() {
        let text = "TITLE===Morning Light===TITLE\nPOEM===\nLine one\n===POEM";
        let fields = extract_fields(
            text,
            &[
                FieldSpec::new("TITLE", "Untitled"),
                FieldSpec::new("POEM", ""),
            ],
        );
        assert_eq!(fields["TITLE"], "Morning Light");
        assert_eq!(fields["POEM"], "Line one");
    }

    #[test]
    fn test_extraction_is_idempotent_when_rewrapped() {
        let text = "STORY===Once there was a traveler.===STORY";
        let first = extract_field(text, "STORY", "none");
        assert_eq!(first, "Once there was a traveler.");
        let rewrapped = format!("STORY==={first}===STORY");
        let second = extract_field(&rewrapped, "STORY", "none");
        assert_eq!(second, first);
    }

    #[test]
    fn test_missing_close_falls_back_to_next_field_open() {
        let text = "INTERPRETATION=== The verse calls us to patience. IMAGE_PROMPT===A desert at dawn===IMAGE_PROMPT";
        let fields = extract_fields(
            text,
            &[
                FieldSpec::new("INTERPRETATION", "Unable to generate."),
                FieldSpec::new("IMAGE_PROMPT", "A serene scene"),
            ],
        );
        assert_eq!(fields["INTERPRETATION"], "The verse calls us to patience.");
        assert_eq!(fields["IMAGE_PROMPT"], "A desert at dawn");
    }

    #[test]
    fn test_missing_close_at_end_of_text_runs_to_eot() {
        let text = "POEM===\nA single line of verse";
        let value = extract_field(text, "POEM", "");
        assert_eq!(value, "A single line of verse");
    }

    #[test]
    fn test_asymmetric_close_is_accepted() {
        let text = "TITLE===Evening Rain===";
        let value = extract_field(text, "TITLE", "Untitled");
        assert_eq!(value, "Evening Rain");
    }

    #[test]
    fn test_absent_field_returns_default_exactly() {
        let text = "The model ignored the format entirely.";
        let fields = extract_fields(text, &[FieldSpec::new("TITLE", "A Story of Faith")]);
        assert_eq!(fields["TITLE"], "A Story of Faith");
    }

    #[test]
    fn test_every_declared_field_is_present_in_result() {
        let text = "TITLE===Here===TITLE";
        let fields = extract_fields(
            text,
            &[
                FieldSpec::new("TITLE", "t"),
                FieldSpec::new("STORY", "s"),
                FieldSpec::new("IMAGE", "i"),
            ],
        );
        assert_eq!(fields.len(), 3);
        assert_eq!(fields["STORY"], "s");
        assert_eq!(fields["IMAGE"], "i");
    }

    #[test]
    fn test_declared_order_controls_overlapping_spans() {
        // STORY's close is missing; IMAGE must still be found after it.
        let text = "STORY===He walked to the masjid. IMAGE===minarets at sunset===IMAGE";
        let fields = extract_fields(
            text,
            &[
                FieldSpec::new("STORY", "default story"),
                FieldSpec::new("IMAGE", "default image"),
            ],
        );
        assert_eq!(fields["STORY"], "He walked to the masjid.");
        assert_eq!(fields["IMAGE"], "minarets at sunset");
    }

    #[test]
    fn test_search_starts_after_previous_match() {
        // A stray IMAGE=== inside the first field's span must not be picked
        // up once the first field has consumed past it.
        let text = "A===one===A B===two===B";
        let fields = extract_fields(
            text,
            &[FieldSpec::new("A", "da"), FieldSpec::new("B", "db")],
        );
        assert_eq!(fields["A"], "one");
        assert_eq!(fields["B"], "two");
    }

    #[test]
    fn test_numbered_story_fields() {
        let text = "STORY_1_TITLE===\nThe Quiet Dawn\n===STORY_1_TITLE\n\nSTORY_1_TEXT===\nAmira woke before fajr.\n===STORY_1_TEXT\n\nSTORY_2_TITLE===\nThe Scholar's Lamp\n===STORY_2_TITLE";
        let fields = extract_fields(
            text,
            &[
                FieldSpec::new("STORY_1_TITLE", "Untitled"),
                FieldSpec::new("STORY_1_TEXT", "missing"),
                FieldSpec::new("STORY_2_TITLE", "Untitled"),
            ],
        );
        assert_eq!(fields["STORY_1_TITLE"], "The Quiet Dawn");
        assert_eq!(fields["STORY_1_TEXT"], "Amira woke before fajr.");
        assert_eq!(fields["STORY_2_TITLE"], "The Scholar's Lamp");
    }

    #[test]
    fn test_multiline_content_is_preserved() {
        let text = "POEM===\nFirst line\nSecond line\n\nThird line after a stanza break\n===POEM";
        let value = extract_field(text, "POEM", "");
        assert_eq!(
            value,
            "First line\nSecond line\n\nThird line after a stanza break"
        );
    }

    #[test]
    fn test_extracted_content_is_cleaned_of_markdown() {
        let text = "TITLE===**Morning** Light===TITLE";
        let value = extract_field(text, "TITLE", "Untitled");
        assert_eq!(value, "Morning Light");
    }

    #[test]
    fn test_default_is_not_cleaned() {
        let text = "no delimiters here";
        let value = extract_field(text, "TITLE", "**keep my asterisks**");
        assert_eq!(value, "**keep my asterisks**");
    }
}
