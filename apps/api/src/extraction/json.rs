//! JSON-mode extraction.
//!
//! Some endpoints ask the model for a bare JSON object, optionally wrapped
//! in Markdown code fences. Extraction is: strip fences → slice to the
//! outermost braces → strict parse → one repair pass → retry. Unlike
//! delimiter mode there is no safe structural default for a whole object,
//! so an unrepairable payload is the one failure this module surfaces.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("model output contained no parseable JSON object: {0}")]
    MalformedOutput(#[from] serde_json::Error),
}

/// Locates and parses the JSON object embedded in raw model output.
pub fn extract_json(text: &str) -> Result<Value, ExtractError> {
    let stripped = strip_code_fences(text);
    let candidate = slice_outer_object(stripped).unwrap_or(stripped);

    match serde_json::from_str(candidate) {
        Ok(value) => Ok(value),
        Err(_) => {
            let repaired = repair_json(candidate);
            serde_json::from_str(&repaired).map_err(ExtractError::from)
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or_else(|| stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or_else(|| stripped.trim_start())
    } else {
        text
    }
}

/// Slices from the first `{` to the last `}`, dropping stray prose the model
/// wrote around the object. None when no brace pair exists.
fn slice_outer_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Best-effort repair of near-valid JSON: drops trailing commas before a
/// closing brace/bracket and escapes raw control characters inside strings.
fn repair_json(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in input.chars() {
        if in_string {
            if escaped {
                out.push(c);
                escaped = false;
                continue;
            }
            match c {
                '\\' => {
                    out.push(c);
                    escaped = true;
                }
                '"' => {
                    out.push(c);
                    in_string = false;
                }
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if (c as u32) < 0x20 => {
                    out.push_str(&format!("\\u{:04x}", c as u32));
                }
                _ => out.push(c),
            }
        } else {
            match c {
                '"' => {
                    out.push(c);
                    in_string = true;
                }
                '}' | ']' => {
                    while out.ends_with(|ch: char| ch.is_ascii_whitespace()) {
                        out.pop();
                    }
                    if out.ends_with(',') {
                        out.pop();
                    }
                    out.push(c);
                }
                _ => out.push(c),
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_object_parses() {
        let value = extract_json(r#"{"reference": "Al-Fatiha (1:1)"}"#).unwrap();
        assert_eq!(value["reference"], "Al-Fatiha (1:1)");
    }

    #[test]
    fn test_fenced_object_parses_identically_to_unfenced() {
        let bare = r#"{"a": 1, "b": "two"}"#;
        let fenced = format!("```json\n{bare}\n```");
        assert_eq!(extract_json(bare).unwrap(), extract_json(&fenced).unwrap());
    }

    #[test]
    fn test_fence_without_language_tag() {
        let value = extract_json("```\n{\"key\": \"value\"}\n```").unwrap();
        assert_eq!(value, json!({"key": "value"}));
    }

    #[test]
    fn test_trailing_comma_is_repaired() {
        let value = extract_json(r#"{"a":1,}"#).unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_trailing_comma_in_array_is_repaired() {
        let value = extract_json(r#"{"items": [1, 2, 3,]}"#).unwrap();
        assert_eq!(value, json!({"items": [1, 2, 3]}));
    }

    #[test]
    fn test_trailing_comma_with_whitespace_is_repaired() {
        let value = extract_json("{\"a\": 1,\n  }").unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_raw_newline_inside_string_is_repaired() {
        let value = extract_json("{\"text\": \"line one\nline two\"}").unwrap();
        assert_eq!(value["text"], "line one\nline two");
    }

    #[test]
    fn test_raw_tab_inside_string_is_repaired() {
        let value = extract_json("{\"text\": \"a\tb\"}").unwrap();
        assert_eq!(value["text"], "a\tb");
    }

    #[test]
    fn test_prose_around_object_is_trimmed() {
        let text = "Here is the JSON you asked for:\n{\"a\": 1}\nHope that helps!";
        assert_eq!(extract_json(text).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_plain_prose_is_malformed_output() {
        let result = extract_json("I am unable to produce that content.");
        assert!(matches!(result, Err(ExtractError::MalformedOutput(_))));
    }

    #[test]
    fn test_unclosed_object_is_malformed_output() {
        let result = extract_json(r#"{"a": "#);
        assert!(result.is_err());
    }

    #[test]
    fn test_escaped_quote_inside_string_survives_repair() {
        let value = extract_json(r#"{"text": "he said \"salaam\","}"#);
        // the trailing comma after the string is dropped, the escape is kept
        assert_eq!(value.unwrap()["text"], r#"he said "salaam","#);
    }

    #[test]
    fn test_commas_inside_strings_are_not_touched() {
        let value = extract_json(r#"{"text": "one, two, three,"}"#).unwrap();
        assert_eq!(value["text"], "one, two, three,");
    }

    #[test]
    fn test_nested_object_parses() {
        let text = r#"{"context": {"setting": "Madinah"}, "context_image_prompt": "a courtyard"}"#;
        let value = extract_json(text).unwrap();
        assert_eq!(value["context"]["setting"], "Madinah");
    }
}
