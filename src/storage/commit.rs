// src/storage/commit.rs

//! Git persistence for the ledger file.
//!
//! The ledger lives in the repository the bot runs from, so a successful
//! delivery hands the updated file to git. Failures here are reported to
//! the caller, which logs and moves on: the notification already went out.

use std::path::Path;

use tokio::process::Command;

use crate::error::{AppError, Result};

const BOT_EMAIL: &str = "41898282+github-actions[bot]@users.noreply.github.com";
const BOT_NAME: &str = "github-actions[bot]";
const COMMIT_MESSAGE: &str = "chore: update last_posted.json (newsbot)";

async fn git(args: &[&str]) -> Result<()> {
    let output = Command::new("git").args(args).output().await?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AppError::commit(format!(
            "git {} failed: {}",
            args.join(" "),
            stderr.trim()
        )));
    }
    Ok(())
}

/// Commit and push the ledger file with the Actions bot identity.
pub async fn commit_and_push(path: &Path) -> Result<()> {
    git(&["config", "user.email", BOT_EMAIL]).await?;
    git(&["config", "user.name", BOT_NAME]).await?;

    let path_str = path.to_string_lossy();
    git(&["add", path_str.as_ref()]).await?;

    // Nothing staged is not an error; the push below is then a no-op.
    if let Err(error) = git(&["commit", "-m", COMMIT_MESSAGE]).await {
        log::debug!("git commit skipped: {error}");
    }

    git(&["push", "--no-verify"]).await?;
    log::info!("Committed and pushed {}", path.display());
    Ok(())
}
