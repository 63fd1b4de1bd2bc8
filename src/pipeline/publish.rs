// src/pipeline/publish.rs

//! The fetch-and-maybe-post pipeline.
//!
//! Linear state machine, no branching loops:
//! fetch list, check dedupe, then either skip or
//! fetch detail, extract, format, deliver, record.

use std::path::Path;

use crate::error::Result;
use crate::models::notification::{
    AUTHOR_NAME, AUTHOR_URL, BOT_USERNAME, DESCRIPTION_APPEND_LIMIT, DESCRIPTION_LIMIT,
    EMBED_COLOR, FIELD_VALUE_LIMIT,
};
use crate::models::{
    Config, Embed, EmbedAuthor, EmbedField, EmbedImage, Post, WebhookPayload,
};
use crate::services::{DeliverySink, NewsSource, format, headlines, images};
use crate::storage::{Ledger, commit_and_push};
use crate::utils::text;

/// What a pipeline run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The feed returned no articles.
    EmptyFeed,
    /// The latest article was already recorded; nothing was sent.
    AlreadyPosted { id: String },
    /// Notification delivered and recorded.
    Delivered { id: String },
    /// No sink configured; the payload was logged and the ledger advanced.
    DryRun { id: String },
}

/// Run one publish cycle.
///
/// List-fetch and delivery failures are fatal; detail-fetch, image
/// resolution, and extraction are best-effort; ledger persistence and the
/// git hand-off never fail the run once delivery succeeded.
pub async fn run_publish(
    config: &Config,
    source: &dyn NewsSource,
    sink: Option<&dyn DeliverySink>,
    ledger_path: &Path,
) -> Result<RunOutcome> {
    // FETCH_LIST
    let results = source.fetch_list(&config.genre).await?;
    let Some(top) = results.first() else {
        log::info!("No posts returned");
        return Ok(RunOutcome::EmptyFeed);
    };
    let top_id = top.id_string();
    log::info!(
        "Found {} results; top article {} ({})",
        results.len(),
        top_id,
        top.title
    );

    // CHECK_DEDUPE
    let mut ledger = Ledger::load(ledger_path).await;
    if !config.force && ledger.get(&config.genre) == Some(top_id.as_str()) {
        log::info!(
            "Top article already posted for genre {}; skipping",
            config.genre
        );
        return Ok(RunOutcome::AlreadyPosted { id: top_id });
    }

    // FETCH_DETAIL (best-effort; summary fields remain the fallback)
    let full = match source.fetch_post(&top.id).await {
        Ok(full) => {
            log::debug!(
                "Full article fetch returned {}",
                if full.is_some() { "a document" } else { "nothing" }
            );
            full
        }
        Err(error) => {
            log::warn!("Full article fetch failed: {error}");
            None
        }
    };

    // EXTRACT
    let mut image_url = images::find_preview_image(top);
    if image_url.is_none() {
        if let Some(full) = &full {
            image_url = images::find_preview_image(full);
        }
    }
    let subject = full.as_ref().unwrap_or(top);
    let internal = headlines::extract_headlines(subject, config.headline_count);
    log::debug!(
        "Extracted {} internal headlines: {:?}",
        internal.len(),
        internal
    );

    // FORMAT
    let payload = build_payload(config, top, &results, &internal, image_url);

    // DELIVER / RECORD
    match sink {
        Some(sink) => {
            sink.deliver(&payload).await?;
            log::info!("Notification delivered for article {top_id}");

            ledger.record(&config.genre, &top_id);
            match ledger.save().await {
                Ok(()) => {
                    if config.commit_ledger {
                        if let Err(error) = commit_and_push(ledger_path).await {
                            log::warn!("Failed to commit ledger: {error}");
                        }
                    }
                }
                Err(error) => log::warn!("Failed to persist ledger: {error}"),
            }
            Ok(RunOutcome::Delivered { id: top_id })
        }
        None => {
            // Dry run still advances dedupe so an unconfigured environment
            // does not replay the same article forever.
            let preview = serde_json::to_string(&payload)
                .map(|json| text::truncate_chars(&json, 800))
                .unwrap_or_default();
            log::info!("No webhook configured; would post: {preview}");

            ledger.record(&config.genre, &top_id);
            if let Err(error) = ledger.save().await {
                log::warn!("Failed to persist ledger: {error}");
            }
            Ok(RunOutcome::DryRun { id: top_id })
        }
    }
}

/// Assemble the notification document for the top article.
fn build_payload(
    config: &Config,
    top: &Post,
    results: &[Post],
    internal: &[String],
    image_url: Option<String>,
) -> WebhookPayload {
    let source_text = if top.preview.is_empty() {
        &top.title
    } else {
        &top.preview
    };
    let mut description = text::truncate_chars(&text::strip_tags(source_text), DESCRIPTION_LIMIT);

    let mut fields = Vec::new();
    if let Some(value) = format::build_field_value(internal, FIELD_VALUE_LIMIT) {
        fields.push(EmbedField {
            name: "Headlines inside the article".into(),
            value,
            inline: false,
        });
    } else if !internal.is_empty() {
        // Degraded rendering for channels that cannot carry a separate
        // field: a short inline list on the description instead.
        let short = internal
            .iter()
            .map(|h| format!("• {h}"))
            .collect::<Vec<_>>()
            .join("\n");
        let capped = if short.chars().count() > DESCRIPTION_APPEND_LIMIT {
            format!(
                "{}\n…",
                text::truncate_chars(&short, DESCRIPTION_APPEND_LIMIT)
            )
        } else {
            short
        };
        description.push_str("\n\nHeadlines inside the article:\n");
        description.push_str(&capped);
    }

    if let Some(value) = format::build_extras_field(results, 1, config.extra_count) {
        fields.push(EmbedField {
            name: "What else is new".into(),
            value,
            inline: false,
        });
    }

    let title = if top.title.is_empty() {
        "No title".to_string()
    } else {
        top.title.clone()
    };

    let embed = Embed {
        author: EmbedAuthor {
            name: AUTHOR_NAME.into(),
            url: AUTHOR_URL.into(),
        },
        title,
        url: top.absolute_url(),
        description,
        color: EMBED_COLOR,
        image: image_url.map(|url| EmbedImage { url }),
        fields,
    };

    WebhookPayload {
        username: BOT_USERNAME.into(),
        embeds: vec![embed],
    }
}
