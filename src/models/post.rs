// src/models/post.rs

//! Wire types for the Newswire content API.
//!
//! The list and detail queries return the same post shape; the detail
//! response additionally carries the full `tina.payload` content tree.
//! Every field is optional on the wire, so everything defaults.

use serde::Deserialize;
use serde_json::Value;

/// Base URL for article links.
pub const SITE_BASE: &str = "https://www.rockstargames.com";

/// A Newswire post, as returned by both the list and detail queries.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Post {
    /// Article identifier. The wire JSON carries either a string or a
    /// number here, so it is kept as-is and normalized on demand.
    pub id: Value,
    pub title: String,
    /// Site-relative URL path.
    pub url: String,
    /// Short HTML preview snippet.
    pub preview: String,
    pub img: Option<String>,
    pub image: Option<String>,
    pub hero_image: Option<String>,
    pub preview_images_parsed: Option<PreviewImages>,
    /// Full document payload, present on detail responses only.
    pub tina: Option<TinaDocument>,
}

impl Post {
    /// Identifier normalized to a string for ledger comparison.
    pub fn id_string(&self) -> String {
        match &self.id {
            Value::String(s) => s.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }

    /// Absolute link to the article on the site.
    pub fn absolute_url(&self) -> String {
        format!("{}{}", SITE_BASE, self.url)
    }
}

/// Structured preview image references.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PreviewImages {
    /// Aspect-ratio keyed image map; `d16x9` is the widescreen variant.
    pub newswire_block: Option<serde_json::Map<String, Value>>,
}

/// Document wrapper for the full article payload.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TinaDocument {
    pub payload: Option<TinaPayload>,
}

/// Full article payload: top-level metadata plus the nested content tree.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TinaPayload {
    pub meta: Option<PayloadMeta>,
    /// Arbitrarily nested content blocks; traversed as raw JSON.
    pub content: Option<Value>,
}

/// Top-level article metadata.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct PayloadMeta {
    pub title: Option<String>,
    pub subtitle: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_id_string_from_string() {
        let post: Post = serde_json::from_value(json!({ "id": "abc123" })).unwrap();
        assert_eq!(post.id_string(), "abc123");
    }

    #[test]
    fn test_id_string_from_number() {
        let post: Post = serde_json::from_value(json!({ "id": 9042 })).unwrap();
        assert_eq!(post.id_string(), "9042");
    }

    #[test]
    fn test_id_string_missing() {
        let post = Post::default();
        assert_eq!(post.id_string(), "");
    }

    #[test]
    fn test_absolute_url() {
        let post: Post =
            serde_json::from_value(json!({ "url": "/newswire/article/123/title" })).unwrap();
        assert_eq!(
            post.absolute_url(),
            "https://www.rockstargames.com/newswire/article/123/title"
        );
    }

    #[test]
    fn test_unknown_fields_tolerated() {
        let post: Post = serde_json::from_value(json!({
            "id": "1",
            "title": "T",
            "something_else": { "nested": [1, 2, 3] }
        }))
        .unwrap();
        assert_eq!(post.title, "T");
    }
}
