// src/models/mod.rs

//! Data structures shared across the crate.

pub mod config;
pub mod notification;
pub mod post;

pub use config::Config;
pub use notification::{Embed, EmbedAuthor, EmbedField, EmbedImage, WebhookPayload};
pub use post::{PayloadMeta, Post, PreviewImages, SITE_BASE, TinaDocument, TinaPayload};
