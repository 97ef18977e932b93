// src/models/mod.rs

//! Domain models for the match tracker.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod snapshot;
mod summary;

// Re-export all public types
pub use snapshot::{
    BatterLine, BattingLine, BowlerLine, BowlingLine, DetailSnapshot, FallOfWicket, InitialScrape,
    LiveState, MatchInfo, MatchRecord, MatchUpdate, OverSummary, Partnership, Scorecard,
    SquadPlayer, TeamChance, TeamSquad, WinProbability, YetToBat,
};
pub use summary::{FixtureLists, MatchStatus, MatchSummary, StatusDetails};

/// Explicit "unavailable" sentinel for leaf fields missing from a document.
///
/// The source pages are third-party and frequently incomplete; a missing
/// leaf value is absence of data, never an error, and is propagated
/// verbatim into the output record.
pub const UNAVAILABLE: &str = "N/A";
