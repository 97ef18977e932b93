// src/pipeline/poll.rs

//! The polling loop: one fixture-list fetch, one diff, one tracker
//! mutation and one bounded detail-collection pass per cycle.
//!
//! A failed cycle (fixtures unreachable, card container missing) is logged
//! and skipped; only the stop signal ends the loop. The tracked set lives
//! in memory only, so a restart rebuilds it from the first cycle's live
//! list and re-extracts those matches once.

use std::sync::Arc;

use scraper::Html;
use tokio::sync::watch;
use tokio::time::Duration;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::extract::extract_fixtures;
use crate::fetch::DocumentFetcher;
use crate::models::FixtureLists;
use crate::storage::SnapshotStore;

use super::details::{collect_details, DetailOptions};
use super::diff::diff_lists;
use super::tracker::MatchTracker;

/// Owns the polling loop and the lifecycle tracker.
pub struct Poller {
    config: Config,
    options: DetailOptions,
    fetcher: Arc<dyn DocumentFetcher>,
    store: Arc<dyn SnapshotStore>,
    tracker: MatchTracker,
    stop: watch::Receiver<bool>,
}

impl Poller {
    pub fn new(
        config: Config,
        fetcher: Arc<dyn DocumentFetcher>,
        store: Arc<dyn SnapshotStore>,
        stop: watch::Receiver<bool>,
    ) -> Self {
        Self {
            options: DetailOptions::from_config(&config),
            tracker: MatchTracker::new(config.poller.track_upcoming),
            config,
            fetcher,
            store,
            stop,
        }
    }

    /// Run cycles until the stop signal flips.
    pub async fn run(&mut self) -> Result<()> {
        log::info!(
            "polling {} every {}s",
            self.config.fixtures_url(),
            self.config.poller.interval_secs
        );

        loop {
            if *self.stop.borrow() {
                break;
            }

            if let Err(e) = self.run_cycle().await {
                log::warn!("cycle skipped: {e}");
            }

            let sleep = Duration::from_secs(self.config.poller.interval_secs);
            tokio::select! {
                _ = tokio::time::sleep(sleep) => {}
                _ = self.stop.changed() => {}
            }
        }

        log::info!("poller stopped, {} matches tracked", self.tracker.len());
        Ok(())
    }

    /// Execute exactly one polling cycle.
    pub async fn run_cycle(&mut self) -> Result<()> {
        let lists = self.fetch_fixtures().await?;
        log::info!(
            "fixtures: {} live, {} upcoming, {} concluded",
            lists.live.len(),
            lists.upcoming.len(),
            lists.concluded.len()
        );

        let diff = diff_lists(&self.tracker.ids(), &lists);
        if !diff.is_empty() {
            log::info!(
                "diff: {} newly live, {} still live, {} concluded, {} vanished",
                diff.newly_live.len(),
                diff.still_live.len(),
                diff.now_concluded.len(),
                diff.vanished.len()
            );
        }

        let outcome = self.tracker.apply(&diff, &lists);
        if outcome.detail_ids.is_empty() {
            return Ok(());
        }

        let updates = collect_details(
            Arc::clone(&self.fetcher),
            outcome.detail_ids,
            &self.options,
            &self.stop,
        )
        .await;

        // One store call per match per cycle; a failed write costs this
        // cycle's snapshot for that match, nothing more.
        for update in updates {
            match self.store.store(&update).await {
                Ok(()) => self.tracker.record_snapshot(&update.match_id, &update.snapshot),
                Err(e) => log::error!("{}: store failed: {e}", update.match_id),
            }
        }

        Ok(())
    }

    async fn fetch_fixtures(&self) -> Result<FixtureLists> {
        let url = self.config.fixtures_url();
        let body = self
            .fetcher
            .fetch(&url)
            .await
            .map_err(|e| AppError::extract("fixtures", e))?;
        parse_fixtures(&body, &self.config.fetcher.base_url)
    }
}

fn parse_fixtures(body: &str, base_url: &str) -> Result<FixtureLists> {
    extract_fixtures(&Html::parse_document(body), base_url)
}
