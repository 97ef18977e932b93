// src/pipeline/mod.rs

//! Polling pipeline: fixture diffing, lifecycle tracking, per-match detail
//! collection and the poll orchestrator.

pub mod details;
pub mod diff;
pub mod initial;
pub mod poll;
pub mod tracker;

pub use details::{collect_details, snapshot_match, DetailOptions};
pub use diff::{diff_lists, ListDiff};
pub use initial::run_initial_scrape;
pub use poll::Poller;
pub use tracker::{ApplyOutcome, MatchTracker, TrackedMatch};
