// src/lib.rs

//! newsbot library
//!
//! Polls the Rockstar Newswire for new articles, extracts in-article
//! headlines and a preview image, and posts an embed to a Discord webhook.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
