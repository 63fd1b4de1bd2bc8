// src/storage/mod.rs

//! Persistent dedupe ledger.
//!
//! A single JSON file mapping feed genre to the last posted article id. It
//! is the only state that survives across runs: read once at pipeline
//! start, written at most once after a confirmed delivery (or dry run).

mod commit;

pub use commit::commit_and_push;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::error::Result;

/// Genre to last-posted article id map, backed by a JSON file.
#[derive(Debug, Clone)]
pub struct Ledger {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl Ledger {
    /// Load the ledger. A missing or corrupt file reads as empty so a bad
    /// state file can never block a run.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(entries) => entries,
                Err(error) => {
                    log::warn!(
                        "Ledger at {} is corrupt ({}); starting empty",
                        path.display(),
                        error
                    );
                    BTreeMap::new()
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(error) => {
                log::warn!(
                    "Failed to read ledger at {} ({}); starting empty",
                    path.display(),
                    error
                );
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    /// Last posted article id for a genre.
    pub fn get(&self, genre: &str) -> Option<&str> {
        self.entries.get(genre).map(String::as_str)
    }

    /// Record the article id just published for a genre.
    pub fn record(&mut self, genre: &str, id: &str) {
        self.entries.insert(genre.to_string(), id.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(genre, id)| (genre.as_str(), id.as_str()))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist atomically (write temp, then rename), creating parent
    /// directories as needed.
    pub async fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let bytes = serde_json::to_vec_pretty(&self.entries)?;
        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let ledger = Ledger::load(tmp.path().join("last_posted.json")).await;
        assert!(ledger.is_empty());
        assert_eq!(ledger.get("gta_online"), None);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("last_posted.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();

        let ledger = Ledger::load(&path).await;
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn test_record_save_reload() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("last_posted.json");

        let mut ledger = Ledger::load(&path).await;
        ledger.record("gta_online", "9042");
        ledger.save().await.unwrap();

        let reloaded = Ledger::load(&path).await;
        assert_eq!(reloaded.get("gta_online"), Some("9042"));
        assert_eq!(reloaded.get("latest"), None);
    }

    #[tokio::test]
    async fn test_save_creates_parent_dirs() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/dir/last_posted.json");

        let mut ledger = Ledger::load(&path).await;
        ledger.record("latest", "1");
        ledger.save().await.unwrap();

        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_record_overwrites() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("last_posted.json");

        let mut ledger = Ledger::load(&path).await;
        ledger.record("gta_online", "1");
        ledger.record("gta_online", "2");
        assert_eq!(ledger.get("gta_online"), Some("2"));
    }
}
