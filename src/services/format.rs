// src/services/format.rs

//! Embed field formatting.
//!
//! Discord caps field values, so lists are rendered as bullet blocks with a
//! truncation rule that never splits a line mid-text.

use crate::models::Post;
use crate::models::notification::FIELD_VALUE_LIMIT;

/// Truncation marker appended when a block is cut.
const TRUNCATION_MARKER: &str = "\n…";

/// Join display lines into a bullet block of at most `max_len` characters.
///
/// Empty input yields `None`. When the joined text is over budget it is cut
/// at `max_len - 2` characters and backed up to the previous newline so no
/// line is split; the marker then goes on its own line. Lengths are counted
/// in Unicode scalar values.
pub fn build_field_value(lines: &[String], max_len: usize) -> Option<String> {
    if lines.is_empty() {
        return None;
    }
    let joined = lines
        .iter()
        .map(|line| format!("- {line}"))
        .collect::<Vec<_>>()
        .join("\n");
    if joined.chars().count() <= max_len {
        return Some(joined);
    }

    let mut truncated: String = joined.chars().take(max_len.saturating_sub(2)).collect();
    if let Some(pos) = truncated.rfind('\n') {
        if pos > 0 {
            truncated.truncate(pos);
        }
    }
    truncated.push_str(TRUNCATION_MARKER);
    Some(truncated)
}

/// Render the "what else is new" field from the remaining feed items.
///
/// Skips the first `skip` items (the one being posted) and takes the next
/// `take`, each rendered as `title — <url>` with newlines flattened.
pub fn build_extras_field(results: &[Post], skip: usize, take: usize) -> Option<String> {
    let lines: Vec<String> = results
        .iter()
        .skip(skip)
        .take(take)
        .map(|post| {
            let title = if post.title.trim().is_empty() {
                "No title".to_string()
            } else {
                post.title.replace('\n', " ").trim().to_string()
            };
            format!("{} — <{}>", title, post.absolute_url())
        })
        .collect();
    build_field_value(&lines, FIELD_VALUE_LIMIT)
}
