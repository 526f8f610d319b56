//! Best-effort extraction of a human message from an API error body.

use serde::Deserialize;
use serde_json::Value;

const SNIPPET_MAX: usize = 500;

// Twitter v1.1: {"errors":[{"code":187,"message":"Status is a duplicate."}]}
#[derive(Deserialize)]
struct TwErrors {
    errors: Vec<TwErr>,
}

#[derive(Deserialize)]
struct TwErr {
    #[serde(default)]
    message: String,
    #[serde(default)]
    detail: String,
    #[serde(default)]
    title: String,
}

/// Pull the most specific message out of known error envelopes, falling
/// back to a truncated body snippet.
///
/// Handles Twitter v1.1 `errors[]`, Twitter v2 problem documents
/// (`detail`/`title`) and WordPress `{"error": code, "message": text}`.
pub(crate) fn extract_error_message(body: &[u8]) -> String {
    if let Ok(tw) = serde_json::from_slice::<TwErrors>(body) {
        if let Some(first) = tw.errors.into_iter().next() {
            for candidate in [first.message, first.detail, first.title] {
                if !candidate.is_empty() {
                    return candidate;
                }
            }
        }
    }
    if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) {
        for key in ["message", "detail", "title", "error"] {
            if let Some(s) = map.get(key).and_then(Value::as_str) {
                if !s.is_empty() {
                    return s.to_string();
                }
            }
        }
    }
    snip_body(body)
}

pub(crate) fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if truncate_on_char_boundary(&mut snip, SNIPPET_MAX) {
        snip.push_str("...");
    }
    snip
}

/// Shorten `s` to at most `max` bytes without splitting a character.
/// Returns whether anything was cut.
pub(crate) fn truncate_on_char_boundary(s: &mut String, max: usize) -> bool {
    if s.len() <= max {
        return false;
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    s.truncate(cut);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twitter_v1_errors_array() {
        let body = br#"{"errors":[{"code":187,"message":"Status is a duplicate."}]}"#;
        assert_eq!(extract_error_message(body), "Status is a duplicate.");
    }

    #[test]
    fn twitter_v2_problem_document() {
        let body = br#"{"title":"Forbidden","detail":"You are not allowed to create a Tweet with duplicate content.","status":403}"#;
        assert_eq!(
            extract_error_message(body),
            "You are not allowed to create a Tweet with duplicate content."
        );
    }

    #[test]
    fn wordpress_error_prefers_message_over_code() {
        let body = br#"{"error":"unknown_blog","message":"Unknown blog"}"#;
        assert_eq!(extract_error_message(body), "Unknown blog");
    }

    #[test]
    fn non_json_falls_back_to_snippet() {
        let body = "x".repeat(800);
        let msg = extract_error_message(body.as_bytes());
        assert!(msg.ends_with("..."));
        assert_eq!(msg.len(), 503);
    }
}
