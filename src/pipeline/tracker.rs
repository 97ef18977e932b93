// src/pipeline/tracker.rs

//! Lifecycle tracker: exclusive owner of the tracked-match map.
//!
//! The map has exactly one mutation point per polling cycle, [`MatchTracker::apply`],
//! which consumes the cycle's [`ListDiff`] in a fixed order: removals first,
//! then insertions, then in-place refreshes. Nothing here fetches; the
//! returned [`ApplyOutcome`] tells the orchestrator what to fetch.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::models::{DetailSnapshot, FixtureLists, MatchStatus, MatchSummary};

use super::diff::ListDiff;

/// Tracker state for one match.
#[derive(Debug, Clone)]
pub struct TrackedMatch {
    pub summary: MatchSummary,
    pub last_extracted_at: Option<DateTime<Utc>>,
    pub last_snapshot: Option<DetailSnapshot>,
}

impl TrackedMatch {
    fn new(summary: MatchSummary) -> Self {
        Self {
            summary,
            last_extracted_at: None,
            last_snapshot: None,
        }
    }
}

/// What one cycle changed, and what the orchestrator must fetch.
#[derive(Debug, Clone, Default)]
pub struct ApplyOutcome {
    /// Ids inserted this cycle
    pub added: Vec<String>,
    /// Ids removed this cycle (terminal or vanished)
    pub removed: Vec<String>,
    /// Ids whose detail tabs are due for extraction this cycle
    pub detail_ids: Vec<String>,
    /// Subset of removed ids owed one final extraction before removal
    pub terminal_ids: Vec<String>,
}

/// Exclusive owner of the tracked-match map.
#[derive(Debug, Default)]
pub struct MatchTracker {
    matches: HashMap<String, TrackedMatch>,
    track_upcoming: bool,
}

impl MatchTracker {
    pub fn new(track_upcoming: bool) -> Self {
        Self {
            matches: HashMap::new(),
            track_upcoming,
        }
    }

    /// Apply one cycle's diff. Must be called exactly once per cycle.
    ///
    /// Order matters: `now_concluded` and `vanished` ids leave first so a
    /// re-used id slot starts clean, then `newly_live` ids enter
    /// (re-insertion of an already tracked id keeps its extraction state),
    /// then `still_live` summaries are refreshed in place.
    pub fn apply(&mut self, diff: &ListDiff, lists: &FixtureLists) -> ApplyOutcome {
        let mut outcome = ApplyOutcome::default();

        for id in diff.now_concluded.iter().chain(&diff.vanished) {
            if self.matches.remove(id).is_some() {
                outcome.removed.push(id.clone());
            }
        }
        // Only a concluded transition earns a final extraction; a vanished
        // id is gone without one.
        outcome.terminal_ids = diff.now_concluded.clone();

        let by_id: HashMap<&str, &MatchSummary> =
            lists.all().map(|m| (m.id.as_str(), m)).collect();

        for id in &diff.newly_live {
            let Some(summary) = by_id.get(id.as_str()) else {
                continue;
            };
            match self.matches.entry(id.clone()) {
                std::collections::hash_map::Entry::Occupied(mut entry) => {
                    entry.get_mut().summary = (*summary).clone();
                }
                std::collections::hash_map::Entry::Vacant(entry) => {
                    entry.insert(TrackedMatch::new((*summary).clone()));
                    outcome.added.push(id.clone());
                }
            }
        }

        for id in &diff.still_live {
            if let (Some(tracked), Some(summary)) =
                (self.matches.get_mut(id), by_id.get(id.as_str()))
            {
                tracked.summary = (*summary).clone();
            }
        }

        if self.track_upcoming {
            for summary in &lists.upcoming {
                if !self.matches.contains_key(&summary.id) {
                    outcome.added.push(summary.id.clone());
                    self.matches
                        .insert(summary.id.clone(), TrackedMatch::new(summary.clone()));
                }
            }
        }

        // The cycle extracts every tracked live match plus the terminal ids.
        outcome.detail_ids = self
            .matches
            .values()
            .filter(|t| t.summary.status() == MatchStatus::Live)
            .map(|t| t.summary.id.clone())
            .collect();
        outcome.detail_ids.sort();
        outcome
            .detail_ids
            .extend(outcome.terminal_ids.iter().cloned());

        outcome
    }

    /// Record a completed extraction for a still-tracked match.
    ///
    /// Ids removed earlier in the cycle (terminal extractions) are simply
    /// not tracked any more; recording for them is a no-op.
    pub fn record_snapshot(&mut self, id: &str, snapshot: &DetailSnapshot) {
        if let Some(tracked) = self.matches.get_mut(id) {
            tracked.last_extracted_at = snapshot.captured_at.or_else(|| Some(Utc::now()));
            tracked.last_snapshot = Some(snapshot.clone());
        }
    }

    pub fn ids(&self) -> HashSet<String> {
        self.matches.keys().cloned().collect()
    }

    pub fn get(&self, id: &str) -> Option<&TrackedMatch> {
        self.matches.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.matches.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LiveState, StatusDetails};
    use crate::pipeline::diff::diff_lists;

    fn live(id: &str, score: &str) -> MatchSummary {
        MatchSummary {
            id: id.into(),
            teams: vec!["IND".into(), "AUS".into()],
            details: StatusDetails::Live {
                scores: vec![score.into()],
                overs: vec![],
            },
        }
    }

    fn concluded(id: &str) -> MatchSummary {
        MatchSummary {
            id: id.into(),
            teams: vec![],
            details: StatusDetails::Concluded {
                winner: "won".into(),
                reason: "".into(),
                scores: vec![],
                overs: vec![],
            },
        }
    }

    fn upcoming(id: &str) -> MatchSummary {
        MatchSummary {
            id: id.into(),
            teams: vec![],
            details: StatusDetails::Upcoming {
                start_time: "19:30".into(),
                competition: "ODI".into(),
            },
        }
    }

    fn cycle(tracker: &mut MatchTracker, lists: &FixtureLists) -> ApplyOutcome {
        let diff = diff_lists(&tracker.ids(), lists);
        tracker.apply(&diff, lists)
    }

    #[test]
    fn discovers_and_refreshes_live_matches() {
        let mut tracker = MatchTracker::new(false);

        let lists = FixtureLists {
            live: vec![live("m1", "10/0")],
            ..FixtureLists::default()
        };
        let outcome = cycle(&mut tracker, &lists);
        assert_eq!(outcome.added, vec!["m1"]);
        assert_eq!(outcome.detail_ids, vec!["m1"]);
        assert!(outcome.terminal_ids.is_empty());

        let lists = FixtureLists {
            live: vec![live("m1", "45/2")],
            ..FixtureLists::default()
        };
        let outcome = cycle(&mut tracker, &lists);
        assert!(outcome.added.is_empty());
        assert_eq!(outcome.detail_ids, vec!["m1"]);
        match &tracker.get("m1").unwrap().summary.details {
            StatusDetails::Live { scores, .. } => assert_eq!(scores[0], "45/2"),
            other => panic!("expected live summary, got {other:?}"),
        }
    }

    #[test]
    fn reinsertion_keeps_extraction_state() {
        let mut tracker = MatchTracker::new(false);
        let lists = FixtureLists {
            live: vec![live("m1", "10/0")],
            ..FixtureLists::default()
        };
        cycle(&mut tracker, &lists);

        let snapshot = DetailSnapshot {
            live: Some(LiveState::default()),
            captured_at: Some(Utc::now()),
            ..DetailSnapshot::default()
        };
        tracker.record_snapshot("m1", &snapshot);

        // A diff that re-lists m1 as newly live must not reset it.
        let diff = ListDiff {
            newly_live: vec!["m1".into()],
            ..ListDiff::default()
        };
        let outcome = tracker.apply(&diff, &lists);
        assert!(outcome.added.is_empty());
        assert_eq!(tracker.len(), 1);
        assert!(tracker.get("m1").unwrap().last_snapshot.is_some());
    }

    #[test]
    fn concluded_match_is_removed_after_terminal_extraction() {
        let mut tracker = MatchTracker::new(false);
        let lists = FixtureLists {
            live: vec![live("m1", "10/0")],
            ..FixtureLists::default()
        };
        cycle(&mut tracker, &lists);

        let lists = FixtureLists {
            concluded: vec![concluded("m1")],
            ..FixtureLists::default()
        };
        let outcome = cycle(&mut tracker, &lists);
        assert_eq!(outcome.removed, vec!["m1"]);
        assert_eq!(outcome.terminal_ids, vec!["m1"]);
        assert_eq!(outcome.detail_ids, vec!["m1"]);
        assert!(!tracker.contains("m1"));

        // Next cycle sees nothing; recording for the removed id is a no-op.
        tracker.record_snapshot("m1", &DetailSnapshot::default());
        assert!(tracker.is_empty());
    }

    #[test]
    fn vanished_match_is_removed_without_terminal_extraction() {
        let mut tracker = MatchTracker::new(false);
        let lists = FixtureLists {
            live: vec![live("m1", "10/0")],
            ..FixtureLists::default()
        };
        cycle(&mut tracker, &lists);

        let outcome = cycle(&mut tracker, &FixtureLists::default());
        assert_eq!(outcome.removed, vec!["m1"]);
        assert!(outcome.terminal_ids.is_empty());
        assert!(outcome.detail_ids.is_empty());
        assert!(tracker.is_empty());
    }

    #[test]
    fn upcoming_matches_are_tracked_only_when_configured() {
        let lists = FixtureLists {
            upcoming: vec![upcoming("u1")],
            ..FixtureLists::default()
        };

        let mut tracker = MatchTracker::new(false);
        cycle(&mut tracker, &lists);
        assert!(tracker.is_empty());

        let mut tracker = MatchTracker::new(true);
        let outcome = cycle(&mut tracker, &lists);
        assert_eq!(outcome.added, vec!["u1"]);
        // Not live yet, so no detail extraction is due.
        assert!(outcome.detail_ids.is_empty());
    }

    #[test]
    fn upcoming_to_concluded_in_one_hop_is_terminal() {
        let mut tracker = MatchTracker::new(true);
        let lists = FixtureLists {
            upcoming: vec![upcoming("u1")],
            ..FixtureLists::default()
        };
        cycle(&mut tracker, &lists);

        let lists = FixtureLists {
            concluded: vec![concluded("u1")],
            ..FixtureLists::default()
        };
        let outcome = cycle(&mut tracker, &lists);
        assert_eq!(outcome.terminal_ids, vec!["u1"]);
        assert!(!tracker.contains("u1"));
    }
}
