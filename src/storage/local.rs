// src/storage/local.rs

//! Local filesystem snapshot store.
//!
//! ## Layout
//!
//! ```text
//! {root}/
//! ├── updates/
//! │   └── {match-slug}/
//! │       └── {timestamp}.json     # one DetailSnapshot per cycle
//! └── initial/
//!     └── {timestamp}.json         # one InitialScrape batch
//! ```
//!
//! Writes are atomic (temp file, then rename). The file key is derived
//! from match id + capture timestamp, so storing the same snapshot twice
//! rewrites the same file instead of duplicating it.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::models::{InitialScrape, MatchUpdate};
use crate::storage::SnapshotStore;

/// Filesystem-backed snapshot store.
#[derive(Clone)]
pub struct LocalStore {
    root_dir: PathBuf,
}

impl LocalStore {
    /// Create a store rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.write_bytes(key, &bytes).await
    }

    fn update_key(update: &MatchUpdate) -> String {
        let at = update.snapshot.captured_at.unwrap_or_else(Utc::now);
        format!("updates/{}/{}.json", slug(&update.match_id), stamp(at))
    }

    fn initial_key(scrape: &InitialScrape) -> String {
        format!("initial/{}.json", stamp(scrape.captured_at))
    }
}

#[async_trait]
impl SnapshotStore for LocalStore {
    async fn store(&self, update: &MatchUpdate) -> Result<()> {
        let key = Self::update_key(update);
        self.write_json(&key, update).await?;
        log::debug!("{}: snapshot written to {key}", update.match_id);
        Ok(())
    }

    async fn store_initial_batch(&self, scrape: &InitialScrape) -> Result<()> {
        let key = Self::initial_key(scrape);
        self.write_json(&key, scrape).await?;
        log::info!(
            "initial batch written to {key} ({} records)",
            scrape.live.len() + scrape.upcoming.len() + scrape.concluded.len()
        );
        Ok(())
    }
}

/// Reduce a match id (a URL) to a filesystem-safe directory name.
fn slug(id: &str) -> String {
    let trimmed = id
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    trimmed
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '.' { c } else { '_' })
        .collect()
}

fn stamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%dT%H%M%SZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DetailSnapshot;
    use tempfile::TempDir;

    fn update(id: &str) -> MatchUpdate {
        MatchUpdate {
            match_id: id.to_string(),
            snapshot: DetailSnapshot {
                captured_at: Some("2025-02-01T12:00:00Z".parse().unwrap()),
                ..DetailSnapshot::default()
            },
        }
    }

    #[tokio::test]
    async fn stores_update_under_slug_and_timestamp() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());

        let update = update("https://crex.live/abc-vs-xyz");
        store.store(&update).await.unwrap();

        let path = tmp
            .path()
            .join("updates/crex.live_abc-vs-xyz/20250201T120000Z.json");
        let json = std::fs::read_to_string(&path).unwrap();
        let back: MatchUpdate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, update);
    }

    #[tokio::test]
    async fn repeated_store_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());

        let update = update("https://crex.live/abc-vs-xyz");
        store.store(&update).await.unwrap();
        store.store(&update).await.unwrap();

        let dir = tmp.path().join("updates/crex.live_abc-vs-xyz");
        let files: Vec<_> = std::fs::read_dir(&dir).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[tokio::test]
    async fn stores_initial_batch() {
        let tmp = TempDir::new().unwrap();
        let store = LocalStore::new(tmp.path());

        let scrape = InitialScrape {
            captured_at: "2025-02-01T08:30:00Z".parse().unwrap(),
            live: vec![],
            upcoming: vec![],
            concluded: vec![],
        };
        store.store_initial_batch(&scrape).await.unwrap();

        let path = tmp.path().join("initial/20250201T083000Z.json");
        assert!(path.exists());
    }

    #[test]
    fn slug_strips_scheme_and_separators() {
        assert_eq!(
            slug("https://crex.live/abc-vs-xyz/live"),
            "crex.live_abc-vs-xyz_live"
        );
    }
}
