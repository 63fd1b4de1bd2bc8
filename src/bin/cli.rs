//! newsbot CLI
//!
//! One fetch-and-maybe-post cycle per invocation; meant to run from a
//! scheduled workflow. Exit code is 0 on success (including a dedupe skip
//! and a dry run) and non-zero on any fatal stage failure.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use newsbot::{
    error::Result,
    models::Config,
    pipeline::{self, RunOutcome},
    services::{DeliverySink, DiscordNotifier, NewswireClient},
    storage::Ledger,
    utils::http,
};

/// newsbot - Newswire to Discord notifier
#[derive(Parser, Debug)]
#[command(
    name = "newsbot",
    version,
    about = "Posts new Rockstar Newswire articles to a Discord webhook"
)]
struct Cli {
    /// Path to the dedupe ledger file
    #[arg(long, default_value = ".github/last_posted.json")]
    ledger: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the latest article and post it if it was not posted yet
    Check {
        /// Post even if the latest article is already recorded
        #[arg(long)]
        force: bool,

        /// Feed genre to poll (overrides GENRE)
        #[arg(long)]
        genre: Option<String>,

        /// Skip the git commit/push of the ledger after delivery
        #[arg(long)]
        no_commit: bool,
    },

    /// Show the ledger location and recorded article ids
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Check {
            force,
            genre,
            no_commit,
        } => {
            let mut config = Config::from_env();
            if force {
                config.force = true;
            }
            if let Some(genre) = genre {
                config.genre = genre;
            }
            if no_commit {
                config.commit_ledger = false;
            }
            config.validate()?;

            if config.webhook_url.is_none() {
                log::warn!("DISCORD_WEBHOOK not set; running as a dry run");
            }

            let client = http::create_client(&config)?;
            let source = NewswireClient::new(client.clone(), config.list_query_hash.clone());
            let notifier = config
                .webhook_url
                .as_ref()
                .map(|url| DiscordNotifier::new(client, url));
            let sink = notifier.as_ref().map(|n| n as &dyn DeliverySink);

            let outcome = pipeline::run_publish(&config, &source, sink, &cli.ledger).await?;
            match outcome {
                RunOutcome::EmptyFeed => log::info!("Feed empty; nothing to do"),
                RunOutcome::AlreadyPosted { id } => {
                    log::info!("Article {id} already posted; skipped")
                }
                RunOutcome::Delivered { id } => log::info!("Posted article {id}"),
                RunOutcome::DryRun { id } => {
                    log::info!("Dry run complete; recorded article {id}")
                }
            }
        }

        Command::Info => {
            let ledger = Ledger::load(&cli.ledger).await;
            log::info!("Ledger: {}", cli.ledger.display());
            if ledger.is_empty() {
                log::info!("No articles recorded yet");
            }
            for (genre, id) in ledger.entries() {
                log::info!("  {genre}: {id}");
            }
        }
    }

    log::info!("Done!");

    Ok(())
}
