// src/extract/fixtures.rs

//! Fixture-list extraction and status classification.
//!
//! Each match card is classified by an ordered marker table: the live tag
//! wins, the not-started marker is second, a populated result block is
//! third. A card matching none of the three is silently dropped, as is a
//! card without a usable link (identity failure).

use std::sync::OnceLock;

use scraper::{ElementRef, Html, Selector};

use crate::error::Result;
use crate::models::{FixtureLists, MatchStatus, MatchSummary, StatusDetails, UNAVAILABLE};
use crate::utils::{canonical_match_id, resolve};

use super::dom::{field, first_text, require_container, sel};

/// Overs fallback for a side that has not batted yet.
const YET_TO_BAT: &str = "Yet to bat";

struct FixtureSelectors {
    card: Selector,
    live_tag: Selector,
    not_started: Selector,
    result: Selector,
    link: Selector,
    team_info: Selector,
    team_name: Selector,
    team_score: Selector,
    total_overs: Selector,
    start_text: Selector,
    match_type: Selector,
    winner: Selector,
    reason: Selector,
}

impl FixtureSelectors {
    fn get() -> &'static Self {
        static SELECTORS: OnceLock<FixtureSelectors> = OnceLock::new();
        SELECTORS.get_or_init(|| Self {
            card: sel(".match-card-container"),
            live_tag: sel(".liveTag"),
            not_started: sel(".not-started"),
            result: sel(".result"),
            link: sel("a[href]"),
            team_info: sel("div.team-info"),
            team_name: sel(".team-name"),
            team_score: sel(".team-score"),
            total_overs: sel(".total-overs"),
            start_text: sel(".start-text"),
            match_type: sel(".time"),
            winner: sel("span"),
            reason: sel("span.reason"),
        })
    }
}

/// Classify one match card by the ordered marker table; first match wins.
fn classify(card: ElementRef<'_>, s: &FixtureSelectors) -> Option<MatchStatus> {
    let markers: [(&Selector, MatchStatus); 3] = [
        (&s.live_tag, MatchStatus::Live),
        (&s.not_started, MatchStatus::Upcoming),
        (&s.result, MatchStatus::Concluded),
    ];
    markers
        .iter()
        .find(|(marker, _)| card.select(marker).next().is_some())
        .map(|(_, status)| *status)
}

/// Extract the classified fixture lists from the fixtures page.
///
/// Fails only when the page contains no match card container at all.
pub fn extract_fixtures(doc: &Html, base_url: &str) -> Result<FixtureLists> {
    let s = FixtureSelectors::get();

    require_container(doc, &s.card, "fixtures")?;

    let mut lists = FixtureLists::default();

    for card in doc.select(&s.card) {
        let Some(status) = classify(card, s) else {
            log::debug!("fixture card matched no status marker, dropping");
            continue;
        };

        // Identity failure: no usable link means no tracked-set mutation.
        let Some(href) = card
            .select(&s.link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .filter(|h| !h.trim().is_empty())
        else {
            log::debug!("fixture card has no link, dropping");
            continue;
        };
        let id = canonical_match_id(&resolve(base_url, href));

        let teams: Vec<String> = card
            .select(&s.team_info)
            .map(|t| field(t, &s.team_name, UNAVAILABLE))
            .collect();

        match status {
            MatchStatus::Live => {
                let (scores, overs) = team_scores(card, s, YET_TO_BAT);
                lists.live.push(MatchSummary {
                    id,
                    teams,
                    details: StatusDetails::Live { scores, overs },
                });
            }
            MatchStatus::Upcoming => {
                let start_time = field(card, &s.start_text, UNAVAILABLE);
                let competition = field(card, &s.match_type, UNAVAILABLE);
                lists.upcoming.push(MatchSummary {
                    id,
                    teams,
                    details: StatusDetails::Upcoming {
                        start_time,
                        competition,
                    },
                });
            }
            MatchStatus::Concluded => {
                // Presence is guaranteed by classification.
                let result = card.select(&s.result).next();
                let winner = result
                    .and_then(|r| first_text(r, &s.winner))
                    .unwrap_or_else(|| UNAVAILABLE.to_string());
                let reason = result
                    .and_then(|r| first_text(r, &s.reason))
                    .unwrap_or_else(|| UNAVAILABLE.to_string());
                let (scores, overs) = team_scores(card, s, UNAVAILABLE);
                lists.concluded.push(MatchSummary {
                    id,
                    teams,
                    details: StatusDetails::Concluded {
                        winner,
                        reason,
                        scores,
                        overs,
                    },
                });
            }
        }
    }

    Ok(lists)
}

/// Per-team score and overs columns of a card.
fn team_scores(
    card: ElementRef<'_>,
    s: &FixtureSelectors,
    overs_default: &str,
) -> (Vec<String>, Vec<String>) {
    let mut scores = Vec::new();
    let mut overs = Vec::new();
    for t in card.select(&s.team_info) {
        scores.push(field(t, &s.team_score, UNAVAILABLE));
        overs.push(field(t, &s.total_overs, overs_default));
    }
    (scores, overs)
}
