// tests/poll_cycle.rs

//! Full poll-cycle integration: discovery, refresh, conclusion and
//! disappearance of matches across scripted fixture pages, with a mock
//! fetcher and an in-memory store counting every write.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::watch;

use crickwatch::config::Config;
use crickwatch::error::Result;
use crickwatch::fetch::{DocumentFetcher, FetchError, FetchResult};
use crickwatch::models::{InitialScrape, MatchUpdate};
use crickwatch::pipeline::Poller;
use crickwatch::storage::SnapshotStore;

const FIXTURES_URL: &str = "https://crex.live/fixtures/match-list";

/// Serves a scripted sequence of page maps; each fixtures fetch advances
/// to the next cycle's map.
struct ScriptedFetcher {
    cycles: Vec<HashMap<String, String>>,
    cursor: AtomicUsize,
}

impl ScriptedFetcher {
    fn new(cycles: Vec<HashMap<String, String>>) -> Self {
        Self {
            cycles,
            cursor: AtomicUsize::new(0),
        }
    }

    fn current(&self) -> &HashMap<String, String> {
        let i = self.cursor.load(Ordering::SeqCst).saturating_sub(1);
        &self.cycles[i]
    }
}

#[async_trait]
impl DocumentFetcher for ScriptedFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        if url == FIXTURES_URL {
            let i = self.cursor.fetch_add(1, Ordering::SeqCst);
            return self.cycles[i]
                .get(url)
                .cloned()
                .ok_or(FetchError::NotFound);
        }
        self.current().get(url).cloned().ok_or(FetchError::NotFound)
    }

    async fn fetch_interactive(
        &self,
        url: &str,
        _toggle_selector: &str,
    ) -> FetchResult<Vec<String>> {
        self.fetch(url).await.map(|body| vec![body])
    }
}

#[derive(Default)]
struct MemoryStore {
    updates: Mutex<Vec<MatchUpdate>>,
}

impl MemoryStore {
    fn stored_ids(&self) -> Vec<String> {
        self.updates
            .lock()
            .unwrap()
            .iter()
            .map(|u| u.match_id.clone())
            .collect()
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn store(&self, update: &MatchUpdate) -> Result<()> {
        self.updates.lock().unwrap().push(update.clone());
        Ok(())
    }

    async fn store_initial_batch(&self, _scrape: &InitialScrape) -> Result<()> {
        Ok(())
    }
}

fn live_card(path: &str, team: &str) -> String {
    format!(
        r#"<div class="match-card-container">
             <a href="{path}/live"></a>
             <div class="liveTag">LIVE</div>
             <div class="team-info"><div class="team-name">{team}</div>
               <div class="team-score">120/3</div><div class="total-overs">14.2</div></div>
           </div>"#
    )
}

fn concluded_card(path: &str, winner: &str) -> String {
    format!(
        r#"<div class="match-card-container">
             <a href="{path}/scorecard"></a>
             <div class="result"><span>{winner} won by 5 wickets</span></div>
             <div class="team-info"><div class="team-name">{winner}</div></div>
           </div>"#
    )
}

fn upcoming_card(path: &str) -> String {
    format!(
        r#"<div class="match-card-container">
             <a href="{path}/info"></a>
             <div class="not-started"></div>
             <div class="start-text">Tomorrow, 19:30</div>
           </div>"#
    )
}

fn fixtures_page(cards: &[String]) -> String {
    format!("<html><body>{}</body></html>", cards.join("\n"))
}

const LIVE_TAB: &str = r#"<body><div class="live-screen-wrap">
    <div class="playing-batsmen-wrapper">
      <div class="batsmen-partnership">
        <div class="batsmen-name"><p>V Kohli</p></div>
        <div class="batsmen-score"><p>45</p><p>(30)</p></div>
      </div>
    </div></div></body>"#;

const INFO_TAB: &str = r#"<body>
    <div class="match-date match-venue">Eden Gardens</div></body>"#;

fn pages(entries: &[(&str, &str)]) -> HashMap<String, String> {
    entries
        .iter()
        .map(|(url, body)| (url.to_string(), body.to_string()))
        .collect()
}

fn test_config() -> Config {
    let mut config = Config::default();
    config.poller.request_delay_ms = 0;
    config.poller.max_concurrent = 2;
    config
}

#[tokio::test]
async fn lifecycle_across_three_cycles_stores_exactly_once_per_match() {
    // Cycle 1: m1 goes live.  Cycle 2: m1 concludes, m2 goes live.
    // Cycle 3: m2 vanishes; only an upcoming fixture remains.
    let cycle1 = {
        let mut p = pages(&[
            ("https://crex.live/m1/live", LIVE_TAB),
            ("https://crex.live/m1/info", INFO_TAB),
        ]);
        p.insert(
            FIXTURES_URL.to_string(),
            fixtures_page(&[live_card("/m1", "IND")]),
        );
        p
    };
    let cycle2 = {
        let mut p = pages(&[
            ("https://crex.live/m2/live", LIVE_TAB),
            ("https://crex.live/m2/info", INFO_TAB),
            ("https://crex.live/m1/info", INFO_TAB),
        ]);
        p.insert(
            FIXTURES_URL.to_string(),
            fixtures_page(&[concluded_card("/m1", "IND"), live_card("/m2", "ENG")]),
        );
        p
    };
    let cycle3 = {
        let mut p = pages(&[]);
        p.insert(
            FIXTURES_URL.to_string(),
            fixtures_page(&[upcoming_card("/u9")]),
        );
        p
    };

    let fetcher = Arc::new(ScriptedFetcher::new(vec![cycle1, cycle2, cycle3]));
    let store = Arc::new(MemoryStore::default());
    let (_stop_tx, stop_rx) = watch::channel(false);

    let mut poller = Poller::new(test_config(), fetcher, Arc::clone(&store) as Arc<dyn SnapshotStore>, stop_rx);

    // Cycle 1: m1 discovered and extracted once.
    poller.run_cycle().await.unwrap();
    assert_eq!(store.stored_ids(), vec!["https://crex.live/m1"]);
    {
        let updates = store.updates.lock().unwrap();
        let snapshot = &updates[0].snapshot;
        assert_eq!(snapshot.match_info.as_ref().unwrap().venue, "Eden Gardens");
        let live = snapshot.live.as_ref().unwrap();
        assert_eq!(live.batters[0].name, "V Kohli");
        // Scorecard tab was unreachable; the rest of the snapshot stands.
        assert!(snapshot.scorecard.is_none());
    }

    // Cycle 2: one terminal extraction for m1, one for the new m2.
    poller.run_cycle().await.unwrap();
    let mut ids = store.stored_ids();
    ids.sort();
    assert_eq!(
        ids,
        vec![
            "https://crex.live/m1",
            "https://crex.live/m1",
            "https://crex.live/m2",
        ]
    );

    // Cycle 3: m2 vanished, so no extraction and no store call at all.
    poller.run_cycle().await.unwrap();
    assert_eq!(store.stored_ids().len(), 3);
}

#[tokio::test]
async fn unreachable_fixtures_page_skips_the_cycle() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![pages(&[])]));
    let store = Arc::new(MemoryStore::default());
    let (_stop_tx, stop_rx) = watch::channel(false);

    let mut poller = Poller::new(test_config(), fetcher, Arc::clone(&store) as Arc<dyn SnapshotStore>, stop_rx);
    assert!(poller.run_cycle().await.is_err());
    assert!(store.stored_ids().is_empty());
}

#[tokio::test]
async fn restart_re_extracts_live_matches_once() {
    // The tracked set is in-memory only: a fresh poller over the same
    // fixtures page rediscovers m1 and stores it again.
    let cycle = {
        let mut p = pages(&[("https://crex.live/m1/live", LIVE_TAB)]);
        p.insert(
            FIXTURES_URL.to_string(),
            fixtures_page(&[live_card("/m1", "IND")]),
        );
        p
    };

    let store = Arc::new(MemoryStore::default());

    for _ in 0..2 {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![cycle.clone()]));
        let (_stop_tx, stop_rx) = watch::channel(false);
        let mut poller = Poller::new(test_config(), fetcher, Arc::clone(&store) as Arc<dyn SnapshotStore>, stop_rx);
        poller.run_cycle().await.unwrap();
    }

    assert_eq!(store.stored_ids().len(), 2);
}
