// src/lib.rs

//! crickwatch: live cricket match lifecycle tracker.
//!
//! Polls a fixtures page, tracks each match through
//! Upcoming → Live → Concluded, and extracts structured snapshots
//! (match info, live state, scorecard, squads) from the match detail tabs
//! into a persistence sink, once per match per polling cycle.

pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod pipeline;
pub mod storage;
pub mod utils;
