// src/models/config.rs

//! Runtime configuration.
//!
//! Everything is read from the environment with sensible defaults, so the
//! binary can run unconfigured (dry-run) from a scheduled workflow.

use std::env;

use crate::error::{AppError, Result};

/// Runtime configuration for one publish cycle.
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord webhook URL. When unset the run is a dry run: the payload is
    /// only logged, but the ledger still advances.
    pub webhook_url: Option<String>,

    /// Post even when the latest article id matches the ledger entry.
    pub force: bool,

    /// Feed genre to poll. The special value `latest` polls unfiltered.
    pub genre: String,

    /// How many "what else is new" entries to include.
    pub extra_count: usize,

    /// How many in-article headlines to include.
    pub headline_count: usize,

    /// Persisted-query hash for the list operation. Obtaining a fresh hash
    /// is an external concern; when unset the client falls back to the last
    /// known hash.
    pub list_query_hash: Option<String>,

    /// User-Agent header for HTTP requests.
    pub user_agent: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Whether a successful delivery hands the ledger file to git.
    pub commit_ledger: bool,
}

impl Config {
    /// Build a configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            webhook_url: env_string("DISCORD_WEBHOOK"),
            force: env_bool("FORCE"),
            genre: env_string("GENRE").unwrap_or_else(defaults::genre),
            extra_count: env_usize("EXTRA_COUNT").unwrap_or_else(defaults::extra_count),
            headline_count: env_usize("HEADLINE_COUNT").unwrap_or_else(defaults::headline_count),
            list_query_hash: env_string("NEWSWIRE_QUERY_HASH"),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            commit_ledger: true,
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.genre.trim().is_empty() {
            return Err(AppError::config("genre is empty"));
        }
        if self.user_agent.trim().is_empty() {
            return Err(AppError::config("user_agent is empty"));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::config("timeout_secs must be > 0"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webhook_url: None,
            force: false,
            genre: defaults::genre(),
            extra_count: defaults::extra_count(),
            headline_count: defaults::headline_count(),
            list_query_hash: None,
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            commit_ledger: true,
        }
    }
}

/// Read a non-empty environment variable.
fn env_string(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Read a boolean environment variable. Anything but `true` is false.
fn env_bool(key: &str) -> bool {
    env::var(key)
        .map(|v| v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Read a numeric environment variable, ignoring unparsable values.
fn env_usize(key: &str) -> Option<usize> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

mod defaults {
    pub fn genre() -> String {
        "gta_online".into()
    }
    pub fn extra_count() -> usize {
        3
    }
    pub fn headline_count() -> usize {
        6
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; newsbot/1.0)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.genre, "gta_online");
        assert_eq!(config.extra_count, 3);
        assert_eq!(config.headline_count, 6);
        assert_eq!(config.timeout_secs, 30);
        assert!(config.webhook_url.is_none());
        assert!(!config.force);
        assert!(config.commit_ledger);
    }

    #[test]
    fn test_validate_default_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_genre() {
        let config = Config {
            genre: "  ".into(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config {
            timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
