// src/pipeline/details.rs

//! Per-match detail collection.
//!
//! One match means up to four documents: the info tab, the squad toggle
//! capture sequence (served from the info tab), the live tab and the
//! scorecard tab. Each document is fetched and extracted independently; a
//! failure leaves that sub-record `None` and never touches the others.
//!
//! Bodies are fetched as text and parsed inside synchronous helpers so the
//! parsed tree never lives across an await point.

use std::sync::Arc;

use chrono::Utc;
use futures::{stream, StreamExt};
use scraper::{Html, Selector};
use tokio::sync::watch;
use tokio::time::Duration;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::extract::{
    extract_live_state, extract_match_info, extract_scorecard, extract_squads,
};
use crate::fetch::DocumentFetcher;
use crate::models::{DetailSnapshot, LiveState, MatchInfo, MatchUpdate, Scorecard, TeamSquad};
use crate::utils::tab_url;

/// Knobs the collector needs from the configuration.
#[derive(Debug, Clone)]
pub struct DetailOptions {
    pub toggle_selector: String,
    pub request_delay_ms: u64,
    pub max_concurrent: usize,
}

impl DetailOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            toggle_selector: config.fetcher.squad_toggle_selector.clone(),
            request_delay_ms: config.poller.request_delay_ms,
            max_concurrent: config.poller.max_concurrent,
        }
    }
}

/// Collect detail snapshots for `ids`, at most `max_concurrent` matches at
/// a time. Checks the stop signal before starting each match; matches
/// skipped that way simply produce no update.
pub async fn collect_details(
    fetcher: Arc<dyn DocumentFetcher>,
    ids: Vec<String>,
    options: &DetailOptions,
    stop: &watch::Receiver<bool>,
) -> Vec<MatchUpdate> {
    let updates: Vec<Option<MatchUpdate>> = stream::iter(ids)
        .map(|id| {
            let fetcher = Arc::clone(&fetcher);
            let stop = stop.clone();
            let options = options.clone();
            async move {
                if *stop.borrow() {
                    log::debug!("{id}: detail collection skipped, stop requested");
                    return None;
                }
                Some(snapshot_match(fetcher.as_ref(), &id, &options).await)
            }
        })
        .buffer_unordered(options.max_concurrent.max(1))
        .collect()
        .await;

    updates.into_iter().flatten().collect()
}

/// Extract one full detail snapshot for one match.
///
/// Infallible by design: every per-document failure is logged and recorded
/// as an absent sub-record.
pub async fn snapshot_match(
    fetcher: &dyn DocumentFetcher,
    id: &str,
    options: &DetailOptions,
) -> MatchUpdate {
    let mut snapshot = DetailSnapshot::default();
    let info_url = tab_url(id, "info");

    match fetcher.fetch(&info_url).await {
        Ok(body) => snapshot.match_info = Some(parse_info(&body)),
        Err(e) => log::warn!("{id}: info tab skipped: {e}"),
    }
    pause(options.request_delay_ms).await;

    // The squad lists render on the info tab behind per-team toggles.
    match fetcher
        .fetch_interactive(&info_url, &options.toggle_selector)
        .await
    {
        Ok(bodies) => match parse_squads(&bodies, &options.toggle_selector) {
            Ok(squads) => snapshot.squads = Some(squads),
            Err(e) => log::debug!("{id}: squads not extracted: {e}"),
        },
        Err(e) => log::warn!("{id}: squads skipped: {e}"),
    }
    pause(options.request_delay_ms).await;

    match fetcher.fetch(&tab_url(id, "live")).await {
        Ok(body) => match parse_live(&body) {
            Ok(live) => snapshot.live = Some(live),
            Err(e) => log::debug!("{id}: live state not extracted: {e}"),
        },
        Err(e) => log::warn!("{id}: live tab skipped: {e}"),
    }
    pause(options.request_delay_ms).await;

    match fetcher.fetch(&tab_url(id, "scorecard")).await {
        Ok(body) => match parse_scorecard(&body) {
            Ok(scorecard) => snapshot.scorecard = Some(scorecard),
            Err(e) => log::debug!("{id}: scorecard not extracted: {e}"),
        },
        Err(e) => log::warn!("{id}: scorecard tab skipped: {e}"),
    }

    snapshot.captured_at = Some(Utc::now());
    MatchUpdate {
        match_id: id.to_string(),
        snapshot,
    }
}

async fn pause(delay_ms: u64) {
    if delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
}

fn parse_info(body: &str) -> MatchInfo {
    extract_match_info(&Html::parse_document(body))
}

fn parse_live(body: &str) -> Result<LiveState> {
    extract_live_state(&Html::parse_document(body))
}

fn parse_scorecard(body: &str) -> Result<Scorecard> {
    extract_scorecard(&Html::parse_document(body))
}

fn parse_squads(bodies: &[String], toggle_selector: &str) -> Result<Vec<TeamSquad>> {
    let selector = Selector::parse(toggle_selector)
        .map_err(|e| AppError::selector(toggle_selector, format!("{e:?}")))?;
    let docs: Vec<Html> = bodies.iter().map(|b| Html::parse_document(b)).collect();
    extract_squads(&docs, &selector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{FetchError, FetchResult};
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct MapFetcher {
        bodies: HashMap<String, String>,
    }

    impl MapFetcher {
        fn new(pages: &[(&str, &str)]) -> Self {
            Self {
                bodies: pages
                    .iter()
                    .map(|(url, body)| (url.to_string(), body.to_string()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl DocumentFetcher for MapFetcher {
        async fn fetch(&self, url: &str) -> FetchResult<String> {
            self.bodies.get(url).cloned().ok_or(FetchError::NotFound)
        }

        async fn fetch_interactive(
            &self,
            url: &str,
            _toggle_selector: &str,
        ) -> FetchResult<Vec<String>> {
            self.fetch(url).await.map(|body| vec![body])
        }
    }

    fn options() -> DetailOptions {
        DetailOptions {
            toggle_selector: ".playingxi-button".into(),
            request_delay_ms: 0,
            max_concurrent: 2,
        }
    }

    const INFO_PAGE: &str = r#"<body>
        <div class="match-date match-venue">Eden Gardens</div>
        <div class="info-right-wrapper">
          <button class="playingxi-button">IND</button>
          <div class="playingxi-card">
            <div class="playingxi-card-row"><div class="p-name">V Kohli</div></div>
          </div>
        </div></body>"#;

    const LIVE_PAGE: &str =
        r#"<body><div class="live-screen-wrap"></div></body>"#;

    #[tokio::test]
    async fn failed_tabs_leave_other_records_intact() {
        // Scorecard page missing entirely; info and live present.
        let fetcher = MapFetcher::new(&[
            ("https://x/m1/info", INFO_PAGE),
            ("https://x/m1/live", LIVE_PAGE),
        ]);

        let update = snapshot_match(&fetcher, "https://x/m1", &options()).await;

        assert_eq!(update.match_id, "https://x/m1");
        let snapshot = &update.snapshot;
        assert_eq!(
            snapshot.match_info.as_ref().unwrap().venue,
            "Eden Gardens"
        );
        let squads = snapshot.squads.as_ref().unwrap();
        assert_eq!(squads[0].team, "IND");
        assert_eq!(squads[0].playing_xi[0].name, "V Kohli");
        assert!(snapshot.live.is_some());
        assert!(snapshot.scorecard.is_none());
        assert!(snapshot.captured_at.is_some());
    }

    #[tokio::test]
    async fn unreachable_match_yields_an_empty_snapshot() {
        let fetcher = MapFetcher::new(&[]);
        let update = snapshot_match(&fetcher, "https://x/m1", &options()).await;
        assert!(update.snapshot.is_empty());
    }

    #[tokio::test]
    async fn collects_one_update_per_id() {
        let fetcher = Arc::new(MapFetcher::new(&[
            ("https://x/m1/live", LIVE_PAGE),
            ("https://x/m2/live", LIVE_PAGE),
        ]));
        let (_tx, stop) = watch::channel(false);

        let mut updates = collect_details(
            fetcher,
            vec!["https://x/m1".into(), "https://x/m2".into()],
            &options(),
            &stop,
        )
        .await;
        updates.sort_by(|a, b| a.match_id.cmp(&b.match_id));

        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].match_id, "https://x/m1");
        assert!(updates[0].snapshot.live.is_some());
    }

    #[tokio::test]
    async fn stop_signal_skips_pending_matches() {
        let fetcher = Arc::new(MapFetcher::new(&[]));
        let (tx, stop) = watch::channel(false);
        tx.send(true).unwrap();

        let updates =
            collect_details(fetcher, vec!["https://x/m1".into()], &options(), &stop).await;
        assert!(updates.is_empty());
    }
}
