//! Tolerant decoding of LLM responses.
//!
//! Each decoder returns a tagged result instead of raising, so the fallback
//! policy lives in one place per component and is testable on its own.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::llm_client::strip_json_fences;

/// Outcome of decoding a bullet-list response.
#[derive(Debug, Clone, PartialEq)]
pub enum BulletDecode {
    /// A non-empty list of bullet strings, in response order.
    Bullets(Vec<String>),
    /// No response, non-JSON text, or JSON of an unusable shape.
    Malformed,
}

/// Decodes a rewrite response, trying shapes in fixed priority order:
///
/// 1. a bare JSON list: `["...", "..."]`
/// 2. an object with a `bullets` key: `{"bullets": [...]}`
/// 3. an object whose first value (document order) is a list: `{"items": [...]}`
///
/// Lists must hold only strings and at least one entry.
pub fn decode_bullets(response: Option<&str>) -> BulletDecode {
    let Some(value) = response.and_then(parse_json) else {
        return BulletDecode::Malformed;
    };

    let candidate = match &value {
        Value::Array(_) => Some(&value),
        Value::Object(map) => match map.get("bullets") {
            Some(bullets) => Some(bullets),
            None => map.values().next(),
        },
        _ => None,
    };

    candidate
        .and_then(string_list)
        .filter(|bullets| !bullets.is_empty())
        .map(BulletDecode::Bullets)
        .unwrap_or(BulletDecode::Malformed)
}

/// Decodes a response into a typed record, `None` on any failure.
pub fn decode_record<T: DeserializeOwned>(response: Option<&str>) -> Option<T> {
    let text = strip_json_fences(response?);
    serde_json::from_str(text).ok()
}

/// Parses a response as JSON after stripping code fences.
pub fn parse_json(response: &str) -> Option<Value> {
    serde_json::from_str(strip_json_fences(response)).ok()
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

/// Returns at most `max_chars` leading characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
