// src/storage/mod.rs

//! Snapshot persistence abstractions.
//!
//! The pipeline hands each completed snapshot to the store exactly once
//! per cycle and never retries; backends are expected to make the write
//! idempotent over match id + capture timestamp so an accidental replay
//! (e.g. re-extraction after a restart) cannot duplicate data.

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{InitialScrape, MatchUpdate};

pub use local::LocalStore;

/// Persistence sink for extracted snapshots.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Persist one match's snapshot for one cycle.
    async fn store(&self, update: &MatchUpdate) -> Result<()>;

    /// Persist the pre-loop exhaustive scrape as one batch.
    async fn store_initial_batch(&self, scrape: &InitialScrape) -> Result<()>;
}
