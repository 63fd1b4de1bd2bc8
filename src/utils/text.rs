// src/utils/text.rs

//! Text normalization helpers.

use std::sync::OnceLock;

use regex::Regex;

/// Collapse runs of whitespace to single spaces and trim the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Also matches a trailing unterminated tag at end of input.
    RE.get_or_init(|| Regex::new(r"</?[^>]+(>|$)").expect("static regex"))
}

/// Remove HTML tags, best-effort. Not a parser; tolerates malformed input.
pub fn strip_tags(s: &str) -> String {
    tag_regex().replace_all(s, "").into_owned()
}

/// Truncate to at most `max_chars` Unicode scalar values.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}
