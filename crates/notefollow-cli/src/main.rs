mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use notefollow_client::NoteClient;
use notefollow_storage::FileStore;
use notefollow_tracker::Tracker;
use tracing_subscriber::EnvFilter;

pub(crate) type CliTracker = Tracker<FileStore, NoteClient>;

#[derive(Debug, Parser)]
#[command(name = "notefollow")]
#[command(about = "Track a note.com creator's follower count")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Look up a creator without tracking it
    Check {
        /// Creator id (the urlname in note.com/<id>)
        creator_id: String,
    },
    /// Start tracking a creator (first-time setup)
    Track {
        creator_id: String,
    },
    /// Fetch the current follower count and record it for today
    Refresh,
    /// Show statistics and recent records
    Show,
    /// Switch to another creator; existing records are deleted
    Change {
        creator_id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Write the dataset to a JSON file
    Export {
        /// Directory to write into (defaults to the current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replace the dataset with a previously exported file
    Import {
        file: PathBuf,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Delete all stored data
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = notefollow_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("warn,notefollow={}", config.log_level)))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("notefollow: run `notefollow --help` for available commands");
        return Ok(());
    };

    let client = NoteClient::new(
        &config.proxy_url,
        config.request_timeout_secs,
        &config.user_agent,
    )?;
    let tracker = Tracker::new(FileStore::new(&config.data_dir), client, config.zone);

    match command {
        Commands::Check { creator_id } => commands::run_check(&tracker, &creator_id).await,
        Commands::Track { creator_id } => commands::run_track(&tracker, &creator_id).await,
        Commands::Refresh => commands::run_refresh(&tracker).await,
        Commands::Show => commands::run_show(&tracker),
        Commands::Change { creator_id, yes } => {
            commands::run_change(&tracker, &creator_id, yes).await
        }
        Commands::Export { out } => commands::run_export(&tracker, out.as_deref()),
        Commands::Import { file, yes } => commands::run_import(&tracker, &file, yes),
        Commands::Reset { yes } => commands::run_reset(&tracker, yes),
    }
}
