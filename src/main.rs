mod commands;
mod config;
mod render;
mod store;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use calsync_core::{DateRange, MatchPolicy};

use crate::commands::add::AddArgs;
use crate::config::CalSyncConfig;
use crate::store::JsonStore;

#[derive(Parser)]
#[command(name = "calsync")]
#[command(about = "One-way calendar sync with duplicate detection and cleanup")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum WindowArg {
    /// ±365 days around now
    All,
    /// Now until +365 days
    Future,
}

#[derive(Subcommand)]
enum Commands {
    /// List calendar collections in the store
    Calendars,
    /// Create a new, empty collection
    New { name: String },
    /// List events in a collection
    Events {
        collection: String,

        /// Show events from this date (YYYY-MM-DD, or "start" for all past events)
        #[arg(long)]
        from: Option<String>,

        /// Show events until this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Add a single event to a collection
    Add {
        collection: String,
        title: String,

        /// Start time (RFC 3339, e.g. "2025-03-20T15:00:00+01:00", or YYYY-MM-DD)
        #[arg(short, long)]
        start: String,

        /// End time (same formats as --start)
        #[arg(short, long)]
        end: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(long)]
        all_day: bool,
    },
    /// Copy events from source that are missing from target
    Sync {
        source: String,
        target: String,

        /// Duplicate strictness: loose, moderate or strict
        #[arg(short, long)]
        policy: Option<MatchPolicy>,

        /// Which source events to consider
        #[arg(short, long, value_enum, default_value = "all")]
        window: WindowArg,

        /// Sync events from this date (YYYY-MM-DD, or "start" for all past events)
        #[arg(long)]
        from: Option<String>,

        /// Sync events until this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Find and delete duplicate events within one collection
    Cleanup {
        collection: String,

        /// Duplicate strictness: loose, moderate or strict
        #[arg(short, long)]
        policy: Option<MatchPolicy>,

        /// Show duplicate groups without deleting anything
        #[arg(long)]
        dry_run: bool,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = CalSyncConfig::load()?;
    let store = JsonStore::open(config.store_dir()?)?;

    match cli.command {
        Commands::Calendars => commands::calendars::run(&store),
        Commands::New { name } => commands::new::run(&store, &name),
        Commands::Events {
            collection,
            from,
            to,
        } => {
            let range = DateRange::from_args(from.as_deref(), to.as_deref())
                .map_err(|e| anyhow::anyhow!(e))?;
            commands::events::run(&store, &collection, &range)
        }
        Commands::Add {
            collection,
            title,
            start,
            end,
            location,
            description,
            all_day,
        } => commands::add::run(
            &store,
            AddArgs {
                collection,
                title,
                start,
                end,
                location,
                description,
                all_day,
            },
        ),
        Commands::Sync {
            source,
            target,
            policy,
            window,
            from,
            to,
        } => {
            let range = if from.is_some() || to.is_some() {
                DateRange::from_args(from.as_deref(), to.as_deref())
                    .map_err(|e| anyhow::anyhow!(e))?
            } else {
                match window {
                    WindowArg::All => DateRange::all(),
                    WindowArg::Future => DateRange::future(),
                }
            };
            commands::sync::run(store, &source, &target, range, config.policy(policy)).await
        }
        Commands::Cleanup {
            collection,
            policy,
            dry_run,
            yes,
        } => commands::cleanup::run(store, &collection, config.policy(policy), dry_run, yes).await,
    }
}
