// src/main.rs

//! crickwatch CLI entry point.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::sync::watch;

use crickwatch::config::Config;
use crickwatch::error::Result;
use crickwatch::fetch::HttpFetcher;
use crickwatch::pipeline::{run_initial_scrape, Poller};
use crickwatch::storage::LocalStore;

#[derive(Parser, Debug)]
#[command(
    name = "crickwatch",
    version,
    about = "Live cricket match tracker and extraction pipeline"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll the fixtures page and extract tracked matches continuously
    Watch {
        /// Override the polling interval in seconds
        #[arg(long)]
        interval: Option<u64>,

        /// Skip the initial exhaustive scrape
        #[arg(long)]
        skip_initial: bool,
    },
    /// Scrape every fixture once with full details, then exit
    Snapshot,
    /// Validate the configuration file and exit
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.config);
    init_logging(&config.logging.level);
    config.validate()?;

    match cli.command {
        Command::Watch {
            interval,
            skip_initial,
        } => {
            if let Some(secs) = interval {
                config.poller.interval_secs = secs;
            }
            config.validate()?;
            run_watch(config, skip_initial).await?;
        }
        Command::Snapshot => {
            let fetcher: Arc<dyn crickwatch::fetch::DocumentFetcher> =
                Arc::new(HttpFetcher::new(&config.fetcher)?);
            let store = LocalStore::new(&config.storage.root_dir);
            let (_stop_tx, stop_rx) = watch::channel(false);

            let scrape = run_initial_scrape(&config, fetcher, &store, &stop_rx).await?;
            log::info!(
                "snapshot complete: {} live, {} upcoming, {} concluded",
                scrape.live.len(),
                scrape.upcoming.len(),
                scrape.concluded.len()
            );
        }
        Command::Validate => {
            Config::load(&cli.config)?.validate()?;
            log::info!("configuration ok");
        }
    }

    Ok(())
}

async fn run_watch(config: Config, skip_initial: bool) -> Result<()> {
    let fetcher: Arc<dyn crickwatch::fetch::DocumentFetcher> =
        Arc::new(HttpFetcher::new(&config.fetcher)?);
    let store = Arc::new(LocalStore::new(&config.storage.root_dir));

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("shutdown requested");
            let _ = stop_tx.send(true);
        }
    });

    if !skip_initial {
        match run_initial_scrape(&config, Arc::clone(&fetcher), store.as_ref(), &stop_rx).await
        {
            Ok(scrape) => log::info!(
                "initial scrape stored ({} records)",
                scrape.live.len() + scrape.upcoming.len() + scrape.concluded.len()
            ),
            Err(e) => log::warn!("initial scrape failed: {e}"),
        }
    }

    Poller::new(config, fetcher, store, stop_rx).run().await
}

/// Initialize env_logger from the configured level; `RUST_LOG` overrides.
fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}
