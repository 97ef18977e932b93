// src/models/summary.rs

//! Fixture-list summaries and status classification.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a match as classified from the fixtures page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchStatus {
    Live,
    Upcoming,
    Concluded,
}

/// Status-specific attributes of a fixture entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum StatusDetails {
    /// Per-team running score and overs
    Live { scores: Vec<String>, overs: Vec<String> },
    /// Scheduled start time and competition label
    Upcoming { start_time: String, competition: String },
    /// Winner text, result reason and final scores
    Concluded {
        winner: String,
        reason: String,
        scores: Vec<String>,
        overs: Vec<String>,
    },
}

impl StatusDetails {
    pub fn status(&self) -> MatchStatus {
        match self {
            StatusDetails::Live { .. } => MatchStatus::Live,
            StatusDetails::Upcoming { .. } => MatchStatus::Upcoming,
            StatusDetails::Concluded { .. } => MatchStatus::Concluded,
        }
    }
}

/// One entry of the fixtures page, keyed by its canonical match identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Canonical match identifier (detail URL with tab suffix stripped)
    pub id: String,

    /// Team names in page order
    pub teams: Vec<String>,

    /// Status-specific attributes
    #[serde(flatten)]
    pub details: StatusDetails,
}

impl MatchSummary {
    pub fn status(&self) -> MatchStatus {
        self.details.status()
    }
}

/// One polling cycle's classified fixture list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixtureLists {
    pub live: Vec<MatchSummary>,
    pub upcoming: Vec<MatchSummary>,
    pub concluded: Vec<MatchSummary>,
}

impl FixtureLists {
    /// Total number of classified fixtures.
    pub fn len(&self) -> usize {
        self.live.len() + self.upcoming.len() + self.concluded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All summaries in page order: live, upcoming, concluded.
    pub fn all(&self) -> impl Iterator<Item = &MatchSummary> {
        self.live
            .iter()
            .chain(self.upcoming.iter())
            .chain(self.concluded.iter())
    }
}
