// Track a Meetup group's member roster: sync, snapshot, chart, watch.

mod charts;
mod delta;
mod report;
mod snapshot;
mod sync;
mod watch;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use meetup_client::MeetupClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::snapshot::SnapshotStore;
use crate::watch::{InMemoryMarker, WatchConfig, WatchLoop};

#[derive(Parser)]
#[command(name = "tracker", about = "Track a Meetup group's member roster")]
struct Cli {
    /// Group urlname, e.g. `rust-twin-cities`
    group: String,

    /// Keep running and report new members every six hours
    #[arg(short, long)]
    daemon: bool,

    /// Log sync progress and rate-limit headroom
    #[arg(short, long)]
    verbose: bool,

    /// Plaintext file holding the API key
    #[arg(long, default_value = "api-key.txt")]
    api_key_file: PathBuf,

    /// Directory for roster snapshots
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Directory for chart output
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // Failures surface their payload on stdout before the non-zero exit.
        println!("{err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let api_key = fs::read_to_string(&cli.api_key_file)
        .with_context(|| format!("failed to read API key file {}", cli.api_key_file.display()))?
        .trim()
        .to_string();

    let client = MeetupClient::new(api_key);
    let group_id = client
        .group_id(&cli.group)
        .await
        .with_context(|| format!("failed to look up group {}", cli.group))?;
    tracing::info!(group = %cli.group, group_id, "resolved group");

    let store = SnapshotStore::new(cli.data_dir.clone());
    let roster = sync::sync_roster(&client, &store, &cli.group, group_id).await?;
    println!("Read {} members", roster.len());

    if cli.daemon {
        WatchLoop::new(
            &client,
            &store,
            &cli.group,
            group_id,
            WatchConfig::default(),
            Box::new(InMemoryMarker::default()),
        )
        .run(roster)
        .await
    } else {
        charts::generate(&roster, &cli.group, &cli.output_dir, Local::now())
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
