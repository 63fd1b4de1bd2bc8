// src/services/mod.rs

//! External service clients and extraction helpers.
//!
//! The pipeline talks to the content API and the webhook through the
//! [`NewsSource`] and [`DeliverySink`] traits so it can be exercised
//! without a network.

pub mod format;
pub mod headlines;
pub mod images;
pub mod newswire;
pub mod webhook;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::models::{Post, WebhookPayload};

pub use newswire::NewswireClient;
pub use webhook::DiscordNotifier;

/// Read side of the content API.
#[async_trait]
pub trait NewsSource {
    /// Fetch the first page of the feed for a genre. The first element of
    /// the result is the latest article. An empty list is not an error.
    async fn fetch_list(&self, genre: &str) -> Result<Vec<Post>>;

    /// Fetch the full article document by identifier, if available.
    async fn fetch_post(&self, id: &Value) -> Result<Option<Post>>;
}

/// Delivery sink for assembled notifications.
#[async_trait]
pub trait DeliverySink {
    /// Deliver the payload. Any non-success status is an error.
    async fn deliver(&self, payload: &WebhookPayload) -> Result<()>;
}
