//! Argument sanitization for tool inputs.
//!
//! The generator sometimes over-runs the `Action Input:` line and starts
//! emitting the next protocol line (`Question:` or `Thought:`) in the same
//! breath. Every argument is scrubbed here before it reaches a tool.

/// Protocol keywords that mark the start of the next expected line.
const PROTOCOL_KEYWORDS: [&str; 2] = ["Question:", "Thought:"];

/// Strips trailing protocol artifacts from a tool argument.
///
/// Trim, cut at the first newline, cut at the first protocol keyword, trim
/// again. Idempotent: sanitizing an already-clean string is a no-op.
pub fn sanitize_input(input: &str) -> String {
    let mut text = input.trim();

    if let Some(pos) = text.find('\n') {
        text = &text[..pos];
    }

    if let Some(pos) = PROTOCOL_KEYWORDS.iter().filter_map(|k| text.find(k)).min() {
        text = &text[..pos];
    }

    text.trim().to_string()
}

/// Normalizes a lookup key: trim surrounding whitespace.
///
/// Identifiers are compared as strings, so `" 10026 "` and `"10026"` are the
/// same key. Idempotent.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_string()
}
