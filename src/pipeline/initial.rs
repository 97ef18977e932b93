// src/pipeline/initial.rs

//! One exhaustive scrape of every fixture, live or not.
//!
//! Runs once before the polling loop starts (and behind the one-shot
//! snapshot command): every entry of all three fixture lists gets a full
//! detail pass, so the store begins with a complete picture instead of
//! only the matches that happen to change.

use std::sync::Arc;

use chrono::Utc;
use scraper::Html;
use tokio::sync::watch;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::extract::extract_fixtures;
use crate::fetch::DocumentFetcher;
use crate::models::{InitialScrape, MatchRecord, MatchSummary};
use crate::storage::SnapshotStore;

use super::details::{collect_details, DetailOptions};

/// Scrape all fixtures with details and persist the batch.
pub async fn run_initial_scrape(
    config: &Config,
    fetcher: Arc<dyn DocumentFetcher>,
    store: &dyn SnapshotStore,
    stop: &watch::Receiver<bool>,
) -> Result<InitialScrape> {
    let url = config.fixtures_url();
    let body = fetcher
        .fetch(&url)
        .await
        .map_err(|e| AppError::extract("fixtures", e))?;
    let lists = extract_fixtures(&Html::parse_document(&body), &config.fetcher.base_url)?;

    log::info!(
        "initial scrape: {} live, {} upcoming, {} concluded",
        lists.live.len(),
        lists.upcoming.len(),
        lists.concluded.len()
    );

    let options = DetailOptions::from_config(config);
    let scrape = InitialScrape {
        captured_at: Utc::now(),
        live: records_for(&lists.live, Arc::clone(&fetcher), &options, stop).await,
        upcoming: records_for(&lists.upcoming, Arc::clone(&fetcher), &options, stop).await,
        concluded: records_for(&lists.concluded, fetcher, &options, stop).await,
    };

    store.store_initial_batch(&scrape).await?;
    Ok(scrape)
}

/// Detail-scrape one fixture list, pairing each summary with its snapshot.
async fn records_for(
    summaries: &[MatchSummary],
    fetcher: Arc<dyn DocumentFetcher>,
    options: &DetailOptions,
    stop: &watch::Receiver<bool>,
) -> Vec<MatchRecord> {
    let ids: Vec<String> = summaries.iter().map(|m| m.id.clone()).collect();
    let updates = collect_details(fetcher, ids, options, stop).await;

    summaries
        .iter()
        .filter_map(|summary| {
            updates
                .iter()
                .find(|u| u.match_id == summary.id)
                .map(|u| MatchRecord {
                    summary: summary.clone(),
                    snapshot: u.snapshot.clone(),
                })
        })
        .collect()
}
