// src/services/images.rs

//! Preview image resolution.
//!
//! Posts reference images in several places with no guarantee any of them is
//! set. Resolution prefers the structured widescreen reference, then any
//! other structured reference, then the flat fallback fields, and finally a
//! best-effort scrape of an `<img src>` from the preview HTML.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::models::Post;

/// CDN host for site-relative image paths.
const MEDIA_BASE: &str = "https://media-rockstargames-com.akamaized.net";

/// Turn an image reference into an absolute URL.
///
/// Protocol-relative references get `https:`, site-relative paths get the
/// media CDN host, anything else passes through. Empty input yields `None`.
pub fn ensure_absolute(url: &str) -> Option<String> {
    if url.is_empty() {
        None
    } else if let Some(rest) = url.strip_prefix("//") {
        Some(format!("https://{rest}"))
    } else if url.starts_with('/') {
        Some(format!("{MEDIA_BASE}{url}"))
    } else {
        Some(url.to_string())
    }
}

fn img_src_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"<img[^>]+src="([^">]+)""#).expect("static regex"))
}

/// Resolve a representative image for a post, if any.
pub fn find_preview_image(post: &Post) -> Option<String> {
    if let Some(block) = post
        .preview_images_parsed
        .as_ref()
        .and_then(|p| p.newswire_block.as_ref())
    {
        if let Some(url) = block.get("d16x9").and_then(Value::as_str) {
            if let Some(absolute) = ensure_absolute(url) {
                return Some(absolute);
            }
        }
        for value in block.values() {
            if let Some(url) = value.as_str() {
                if let Some(absolute) = ensure_absolute(url) {
                    return Some(absolute);
                }
            }
        }
    }

    for flat in [&post.img, &post.image, &post.hero_image] {
        if let Some(url) = flat.as_deref() {
            if let Some(absolute) = ensure_absolute(url) {
                return Some(absolute);
            }
        }
    }

    if let Some(caps) = img_src_regex().captures(&post.preview) {
        if let Some(src) = caps.get(1) {
            return ensure_absolute(src.as_str());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(value: serde_json::Value) -> Post {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_ensure_absolute() {
        assert_eq!(
            ensure_absolute("//cdn.example.com/a.jpg"),
            Some("https://cdn.example.com/a.jpg".into())
        );
        assert_eq!(
            ensure_absolute("/img/a.jpg"),
            Some(format!("{MEDIA_BASE}/img/a.jpg"))
        );
        assert_eq!(
            ensure_absolute("https://x.test/a.jpg"),
            Some("https://x.test/a.jpg".into())
        );
        assert_eq!(ensure_absolute(""), None);
    }

    #[test]
    fn test_prefers_widescreen_block() {
        let p = post(json!({
            "preview_images_parsed": {
                "newswire_block": {
                    "d4x3": "/four-three.jpg",
                    "d16x9": "/wide.jpg"
                }
            },
            "img": "/flat.jpg"
        }));
        assert_eq!(
            find_preview_image(&p),
            Some(format!("{MEDIA_BASE}/wide.jpg"))
        );
    }

    #[test]
    fn test_falls_back_to_other_block_value() {
        let p = post(json!({
            "preview_images_parsed": {
                "newswire_block": { "d4x3": "/four-three.jpg" }
            }
        }));
        assert_eq!(
            find_preview_image(&p),
            Some(format!("{MEDIA_BASE}/four-three.jpg"))
        );
    }

    #[test]
    fn test_flat_field_order() {
        let p = post(json!({ "image": "/b.jpg", "hero_image": "/c.jpg" }));
        assert_eq!(find_preview_image(&p), Some(format!("{MEDIA_BASE}/b.jpg")));
    }

    #[test]
    fn test_scrapes_preview_html() {
        let p = post(json!({
            "preview": "<p>text</p><img class=\"x\" src=\"//cdn.test/pic.png\">"
        }));
        assert_eq!(
            find_preview_image(&p),
            Some("https://cdn.test/pic.png".into())
        );
    }

    #[test]
    fn test_nothing_resolves() {
        assert_eq!(find_preview_image(&Post::default()), None);
    }
}
