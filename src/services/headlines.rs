// src/services/headlines.rs

//! In-article headline extraction.
//!
//! Walks the nested content tree of a full post plus any raw HTML fragments
//! and collects candidate headline strings. Every source funnels through a
//! single [`HeadlineCollector::offer`] call, so dedupe is global and the
//! result keeps first-offered order.
//!
//! The HTML handling is a regex heuristic over arbitrary, possibly malformed
//! markup, not a parser. It tolerates attributes, is case-insensitive on tag
//! names, and is non-greedy on element contents.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::models::Post;
use crate::utils::text::normalize_whitespace;

/// Insertion-ordered set of normalized headline strings.
#[derive(Debug, Default)]
pub struct HeadlineCollector {
    seen: HashSet<String>,
    headlines: Vec<String>,
}

impl HeadlineCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a candidate headline.
    ///
    /// The text is whitespace-normalized; empty results and repeats are
    /// dropped. This is the only mutation point.
    pub fn offer(&mut self, text: &str) {
        let clean = normalize_whitespace(text);
        if clean.is_empty() {
            return;
        }
        if self.seen.insert(clean.clone()) {
            self.headlines.push(clean);
        }
    }

    pub fn len(&self) -> usize {
        self.headlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headlines.is_empty()
    }

    pub fn into_headlines(self) -> Vec<String> {
        self.headlines
    }
}

fn heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<h[1-4][^>]*>.*?</h[1-4]>").expect("static regex"))
}

fn any_heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<h[1-6][^>]*>.*?</h[1-6]>").expect("static regex"))
}

fn bold_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)<(?:strong|b)[^>]*>[^<]{10,}?</(?:strong|b)>").expect("static regex")
    })
}

fn inner_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("static regex"))
}

fn strip_element(fragment: &str) -> String {
    inner_tag_regex()
        .replace_all(fragment, "")
        .trim()
        .to_string()
}

/// Extract headline-like substrings from a raw HTML fragment, in document
/// order per pass: `<h1>`..`<h4>` text first, then `<strong>`/`<b>` runs
/// that are long enough to be a bolded headline but shorter than a
/// paragraph (raw inner text of at least 10 and fewer than 200 characters).
pub fn extract_from_html(html: &str) -> Vec<String> {
    let mut results = Vec::new();
    for m in heading_regex().find_iter(html) {
        let text = strip_element(m.as_str());
        if !text.is_empty() {
            results.push(text);
        }
    }
    for m in bold_regex().find_iter(html) {
        let text = strip_element(m.as_str());
        if !text.is_empty() && text.chars().count() < 200 {
            results.push(text);
        }
    }
    results
}

/// Extract the text of every `<h1>`..`<h6>` element in an embedded HTML
/// fragment (used for `items[].embed` blocks).
fn embedded_headings(html: &str) -> Vec<String> {
    any_heading_regex()
        .find_iter(html)
        .map(|m| strip_element(m.as_str()))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Recursive walk over a content node.
///
/// Plain strings are leaf data, never headlines themselves; only
/// string-valued fields of a mapping are eligible.
fn traverse(node: &Value, out: &mut HeadlineCollector) {
    match node {
        Value::Array(items) => {
            for item in items {
                traverse(item, out);
            }
        }
        Value::Object(map) => traverse_object(map, out),
        _ => {}
    }
}

fn traverse_object(map: &Map<String, Value>, out: &mut HeadlineCollector) {
    let memoq = map.get("_memoq").and_then(Value::as_object);

    if let Some(meta) = memoq {
        if let Some(text) = meta.get("title").and_then(Value::as_str) {
            out.offer(text);
        }
        if let Some(text) = meta.get("subtitle").and_then(Value::as_str) {
            out.offer(text);
        }
    }
    if let Some(text) = map.get("title").and_then(Value::as_str) {
        out.offer(text);
    }
    if let Some(text) = map.get("heading").and_then(Value::as_str) {
        out.offer(text);
    }

    if map.get("_template").and_then(Value::as_str) == Some("HTMLElement") {
        if let Some(html) = memoq.and_then(|m| m.get("content")).and_then(Value::as_str) {
            for text in extract_from_html(html) {
                out.offer(&text);
            }
        }
    }

    // Items carry their own caption/title/embed fields in addition to being
    // a recursion point below.
    if let Some(items) = map.get("items").and_then(Value::as_array) {
        for item in items {
            let Some(obj) = item.as_object() else {
                continue;
            };
            if let Some(text) = obj.get("caption").and_then(Value::as_str) {
                out.offer(text);
            }
            if let Some(text) = obj.get("title").and_then(Value::as_str) {
                out.offer(text);
            }
            if let Some(embed) = obj.get("embed").and_then(Value::as_str) {
                for text in embedded_headings(embed) {
                    out.offer(&text);
                }
            }
        }
    }

    const RECURSE_KEYS: [&str; 4] = ["content", "children", "items", "images"];
    for key in RECURSE_KEYS {
        if let Some(value) = map.get(key) {
            traverse(value, out);
        }
    }

    // Generic fallback into every other structured field. The template tag
    // and display metadata are excluded so they are not reprocessed.
    for (key, value) in map {
        if matches!(
            key.as_str(),
            "_template" | "_memoq" | "content" | "children" | "items" | "images"
        ) {
            continue;
        }
        if value.is_object() || value.is_array() {
            traverse(value, out);
        }
    }
}

/// Extract up to `max_count` unique headlines from a post.
///
/// Top-level metadata (`subtitle`, then `title`) is offered before the body
/// content; the outer `preview` HTML is sub-extracted independently of
/// whether a structured payload was present.
pub fn extract_headlines(post: &Post, max_count: usize) -> Vec<String> {
    let mut out = HeadlineCollector::new();

    if let Some(payload) = post.tina.as_ref().and_then(|t| t.payload.as_ref()) {
        if let Some(meta) = &payload.meta {
            if let Some(text) = &meta.subtitle {
                out.offer(text);
            }
            if let Some(text) = &meta.title {
                out.offer(text);
            }
        }
        if let Some(content) = &payload.content {
            traverse(content, &mut out);
        }
    }

    if !post.preview.is_empty() {
        for text in extract_from_html(&post.preview) {
            out.offer(&text);
        }
    }

    let mut headlines = out.into_headlines();
    headlines.truncate(max_count);
    headlines
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post_with_content(content: Value) -> Post {
        serde_json::from_value(json!({
            "id": "1",
            "tina": { "payload": { "content": content } }
        }))
        .unwrap()
    }

    #[test]
    fn test_offer_normalizes_whitespace() {
        let post = post_with_content(json!({ "title": "  Foo   Bar " }));
        assert_eq!(extract_headlines(&post, 6), vec!["Foo Bar"]);
    }

    #[test]
    fn test_offer_rejects_empty_and_duplicates() {
        let mut collector = HeadlineCollector::new();
        collector.offer("   ");
        collector.offer("A");
        collector.offer(" A ");
        collector.offer("B");
        assert_eq!(collector.into_headlines(), vec!["A", "B"]);
    }

    #[test]
    fn test_embed_headings_deduped() {
        let post = post_with_content(json!({
            "items": [{ "embed": "<h2>A</h2><p>x</p><h2>A</h2>" }]
        }));
        assert_eq!(extract_headlines(&post, 6), vec!["A"]);
    }

    #[test]
    fn test_items_caption_and_title() {
        let post = post_with_content(json!({
            "items": [
                { "caption": "First", "title": "Second" },
                { "title": "Third" }
            ]
        }));
        assert_eq!(extract_headlines(&post, 6), vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_meta_offered_before_content() {
        let post: Post = serde_json::from_value(json!({
            "tina": {
                "payload": {
                    "meta": { "title": "Meta Title", "subtitle": "Meta Subtitle" },
                    "content": [{ "heading": "Body Heading" }]
                }
            }
        }))
        .unwrap();
        assert_eq!(
            extract_headlines(&post, 6),
            vec!["Meta Subtitle", "Meta Title", "Body Heading"]
        );
    }

    #[test]
    fn test_html_element_block() {
        let post = post_with_content(json!({
            "_template": "HTMLElement",
            "_memoq": { "content": "<h3 class=\"x\">Block Headline</h3>" }
        }));
        assert_eq!(extract_headlines(&post, 6), vec!["Block Headline"]);
    }

    #[test]
    fn test_plain_strings_are_not_headlines() {
        let post = post_with_content(json!(["just a string", { "title": "Real" }]));
        assert_eq!(extract_headlines(&post, 6), vec!["Real"]);
    }

    #[test]
    fn test_generic_recursion_into_unknown_keys() {
        let post = post_with_content(json!({
            "wrapper": { "deeper": { "title": "Nested" } }
        }));
        assert_eq!(extract_headlines(&post, 6), vec!["Nested"]);
    }

    #[test]
    fn test_max_count_truncates() {
        let post = post_with_content(json!([
            { "title": "One" },
            { "title": "Two" },
            { "title": "Three" }
        ]));
        assert_eq!(extract_headlines(&post, 2), vec!["One", "Two"]);
        assert!(extract_headlines(&post, 0).is_empty());
    }

    #[test]
    fn test_preview_extraction_is_independent() {
        let post: Post = serde_json::from_value(json!({
            "preview": "<h2>Preview Headline</h2><p>body text</p>"
        }))
        .unwrap();
        assert_eq!(extract_headlines(&post, 6), vec!["Preview Headline"]);
    }

    #[test]
    fn test_malformed_nodes_tolerated() {
        let post = post_with_content(json!({
            "title": 42,
            "heading": null,
            "items": "not an array",
            "children": [{ "title": "Survivor" }]
        }));
        assert_eq!(extract_headlines(&post, 6), vec!["Survivor"]);
    }

    #[test]
    fn test_extract_from_html_headings() {
        let html = "<h1>Big</h1><h4 id=\"a\">Small</h4><h5>Ignored</h5>";
        assert_eq!(extract_from_html(html), vec!["Big", "Small"]);
    }

    #[test]
    fn test_extract_from_html_bold_length_bounds() {
        let long = "x".repeat(250);
        let html = format!(
            "<strong>short</strong><b>a bolded headline here</b><strong>{long}</strong>"
        );
        assert_eq!(extract_from_html(&html), vec!["a bolded headline here"]);
    }

    #[test]
    fn test_extract_from_html_case_insensitive() {
        assert_eq!(extract_from_html("<H2>Loud</H2>"), vec!["Loud"]);
    }

    #[test]
    fn test_extract_from_html_nested_tags_stripped() {
        assert_eq!(
            extract_from_html("<h2>Part <em>One</em></h2>"),
            vec!["Part One"]
        );
    }
}
