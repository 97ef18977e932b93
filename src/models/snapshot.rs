// src/models/snapshot.rs

//! Extracted detail records and the per-cycle snapshot aggregate.
//!
//! `DetailSnapshot` is the only externally observable schema; it is
//! persisted, so changes must stay additive.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::summary::MatchSummary;

/// Aggregate of extracted sub-records for one match at one point in time.
///
/// Each field is independently optional: extraction of one tab failing does
/// not invalidate the others. Immutable once constructed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailSnapshot {
    pub match_info: Option<MatchInfo>,
    pub squads: Option<Vec<TeamSquad>>,
    pub live: Option<LiveState>,
    pub scorecard: Option<Scorecard>,
    pub captured_at: Option<DateTime<Utc>>,
}

impl DetailSnapshot {
    /// True when no tab yielded a record this cycle.
    pub fn is_empty(&self) -> bool {
        self.match_info.is_none()
            && self.squads.is_none()
            && self.live.is_none()
            && self.scorecard.is_none()
    }
}

/// The per-cycle persisted unit: one snapshot for one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchUpdate {
    pub match_id: String,
    pub snapshot: DetailSnapshot,
}

/// One fully scraped fixture entry of the initial exhaustive scrape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub summary: MatchSummary,
    pub snapshot: DetailSnapshot,
}

/// Full three-list scrape taken once before the polling loop starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialScrape {
    pub captured_at: DateTime<Utc>,
    pub live: Vec<MatchRecord>,
    pub upcoming: Vec<MatchRecord>,
    pub concluded: Vec<MatchRecord>,
}

// ---------------------------------------------------------------------
// Match info tab
// ---------------------------------------------------------------------

/// Record extracted from the match info tab.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchInfo {
    pub venue: String,
    pub date: String,
    pub teams: Vec<String>,
    pub series: String,
    pub toss: String,
    /// Head-to-head win counts, one entry per team
    pub head_to_head: Vec<String>,
    /// Recent completed matches shown on the info page
    pub recent_results: Vec<String>,
    pub points_table: String,
    pub venue_weather: String,
    pub venue_stats: String,
    pub pace_vs_spin: String,
}

// ---------------------------------------------------------------------
// Live tab
// ---------------------------------------------------------------------

/// Record extracted from the live tab.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LiveState {
    pub batters: Vec<BatterLine>,
    pub bowler: Option<BowlerLine>,
    pub overs_timeline: Vec<OverSummary>,
    pub win_probability: Option<WinProbability>,
}

/// A currently batting player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatterLine {
    pub name: String,
    pub runs: String,
    pub balls: String,
    pub fours: String,
    pub sixes: String,
    pub strike_rate: String,
    pub on_strike: bool,
}

/// The current bowler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowlerLine {
    pub name: String,
    /// Wickets-runs figures, e.g. "1-35"
    pub figures: String,
    pub overs: String,
    pub economy: String,
}

/// One over of the over-by-over timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverSummary {
    pub title: String,
    /// Per-ball outcomes, excluding the trailing over total
    pub balls: Vec<String>,
    pub total: String,
}

/// Win-probability pair shown by the probability widget when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinProbability {
    pub sides: Vec<TeamChance>,
}

/// One team's win chance, percent sign stripped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamChance {
    pub team: String,
    pub percent: String,
}

// ---------------------------------------------------------------------
// Scorecard tab
// ---------------------------------------------------------------------

/// Record extracted from the scorecard tab.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    /// Batting lines, one inner vector per innings
    pub batting: Vec<Vec<BattingLine>>,
    /// Bowling lines, one inner vector per innings
    pub bowling: Vec<Vec<BowlingLine>>,
    pub fall_of_wickets: Vec<FallOfWicket>,
    pub partnerships: Vec<Partnership>,
    pub yet_to_bat: Vec<YetToBat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattingLine {
    pub batter: String,
    pub runs: String,
    pub balls: String,
    pub fours: String,
    pub sixes: String,
    pub strike_rate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowlingLine {
    pub bowler: String,
    pub overs: String,
    pub maidens: String,
    pub runs_conceded: String,
    pub wickets: String,
    pub economy: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallOfWicket {
    pub batter: String,
    pub score: String,
    pub over: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partnership {
    pub wicket: String,
    pub batter1: String,
    pub batter1_runs: String,
    pub runs: String,
    pub batter2: String,
    pub batter2_runs: String,
}

/// A player who has not yet batted, with batting average when shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YetToBat {
    pub name: String,
    pub average: String,
}

// ---------------------------------------------------------------------
// Squads tab
// ---------------------------------------------------------------------

/// One side's roster composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSquad {
    pub team: String,
    pub playing_xi: Vec<SquadPlayer>,
    pub bench: Vec<SquadPlayer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadPlayer {
    pub name: String,
    /// Batting/bowling style label, e.g. "Batter", "WK"
    pub role: String,
}
