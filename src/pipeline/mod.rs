// src/pipeline/mod.rs

//! Pipeline entry points.
//!
//! One publish cycle per invocation: fetch the feed, check the dedupe
//! ledger, enrich, format, deliver, record.

pub mod publish;

pub use publish::{RunOutcome, run_publish};
