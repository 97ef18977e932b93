// src/pipeline/diff.rs

//! Diff between the tracked-match set and one cycle's fixture lists.
//!
//! The partition decides everything the rest of the cycle does: which
//! matches enter the tracked set, which get refreshed, which get one final
//! extraction, and which disappear without it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::FixtureLists;

/// One cycle's partition of match identifiers.
///
/// The four lists are disjoint by construction: a live id is never
/// concluded or vanished, and `now_concluded`/`vanished` only ever name
/// previously tracked ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListDiff {
    /// Live this cycle, not tracked before
    pub newly_live: Vec<String>,
    /// Live this cycle and already tracked
    pub still_live: Vec<String>,
    /// Tracked before, now in the concluded list (terminal transition)
    pub now_concluded: Vec<String>,
    /// Tracked before, absent from every fixture list
    pub vanished: Vec<String>,
}

impl ListDiff {
    pub fn is_empty(&self) -> bool {
        self.newly_live.is_empty()
            && self.still_live.is_empty()
            && self.now_concluded.is_empty()
            && self.vanished.is_empty()
    }
}

/// Partition the current fixture lists against the tracked-id set.
///
/// A tracked id that shows up in the upcoming list is neither concluded nor
/// vanished; it simply stays tracked and is not named by the diff.
pub fn diff_lists(tracked: &HashSet<String>, lists: &FixtureLists) -> ListDiff {
    let live_ids: HashSet<&str> = lists.live.iter().map(|m| m.id.as_str()).collect();
    let upcoming_ids: HashSet<&str> = lists.upcoming.iter().map(|m| m.id.as_str()).collect();
    let concluded_ids: HashSet<&str> = lists.concluded.iter().map(|m| m.id.as_str()).collect();

    let mut newly_live = Vec::new();
    let mut still_live = Vec::new();
    for id in &live_ids {
        if tracked.contains(*id) {
            still_live.push(id.to_string());
        } else {
            newly_live.push(id.to_string());
        }
    }

    let mut now_concluded = Vec::new();
    let mut vanished = Vec::new();
    for id in tracked {
        // Live wins over any other appearance of the same id.
        if live_ids.contains(id.as_str()) {
            continue;
        }
        if concluded_ids.contains(id.as_str()) {
            now_concluded.push(id.clone());
        } else if !upcoming_ids.contains(id.as_str()) {
            vanished.push(id.clone());
        }
    }

    // Set iteration order is arbitrary; keep the output deterministic.
    newly_live.sort();
    still_live.sort();
    now_concluded.sort();
    vanished.sort();

    ListDiff {
        newly_live,
        still_live,
        now_concluded,
        vanished,
    }
}
