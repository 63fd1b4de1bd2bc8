// src/models/notification.rs

//! Discord webhook payload types.

use serde::Serialize;

/// Embed accent color (Rockstar orange).
pub const EMBED_COLOR: u32 = 16756992;

/// Webhook display name.
pub const BOT_USERNAME: &str = "Rockstar Newswire Tracker";

/// Embed author block.
pub const AUTHOR_NAME: &str = "Rockstar Newswire";
pub const AUTHOR_URL: &str = "https://www.rockstargames.com/newswire";

/// Discord caps a single embed field value at 1024 characters.
pub const FIELD_VALUE_LIMIT: usize = 1024;

/// Character budget for the embed description.
pub const DESCRIPTION_LIMIT: usize = 1200;

/// Budget for the inline headline list appended to the description when a
/// separate field cannot be used.
pub const DESCRIPTION_APPEND_LIMIT: usize = 800;

/// Top-level webhook payload.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookPayload {
    pub username: String,
    pub embeds: Vec<Embed>,
}

/// A single Discord embed.
#[derive(Debug, Clone, Serialize)]
pub struct Embed {
    pub author: EmbedAuthor,
    pub title: String,
    pub url: String,
    pub description: String,
    pub color: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
    pub fields: Vec<EmbedField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedAuthor {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmbedImage {
    pub url: String,
}

/// A named text block in the embed.
#[derive(Debug, Clone, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}
