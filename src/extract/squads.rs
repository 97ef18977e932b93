// src/extract/squads.rs

//! Squad extraction from an interactive capture sequence.
//!
//! The squads section only reveals one team's lists at a time, behind a
//! per-team toggle. The fetcher owns that interaction
//! ([`crate::fetch::DocumentFetcher::fetch_interactive`]) and hands over
//! one capture per toggle activation; capture `i` yields team `i`. When a
//! capture carries every team's card statically (a fetcher that cannot
//! toggle), the i-th card is used instead of the first.

use std::sync::OnceLock;

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{SquadPlayer, TeamSquad, UNAVAILABLE};

use super::dom::{field, has_class, require_container, sel, text_of};

struct SquadSelectors {
    container: Selector,
    card: Selector,
    row: Selector,
    player_name: Selector,
    player_role: Selector,
}

impl SquadSelectors {
    fn get() -> &'static Self {
        static SELECTORS: OnceLock<SquadSelectors> = OnceLock::new();
        SELECTORS.get_or_init(|| Self {
            container: sel(".info-right-wrapper"),
            card: sel("div.playingxi-card"),
            row: sel("div.playingxi-card-row"),
            player_name: sel("div.p-name"),
            player_role: sel("div.bat-ball-type"),
        })
    }
}

/// Extract one squad per capture.
///
/// `toggle_selector` is the same selector the fetcher toggled with; it
/// names the per-team buttons, whose text is the team name.
pub fn extract_squads(captures: &[Html], toggle_selector: &Selector) -> Result<Vec<TeamSquad>> {
    let s = SquadSelectors::get();

    let first = captures
        .first()
        .ok_or_else(|| AppError::container_not_found("squads"))?;
    require_container(first, &s.container, "squads")?;

    let mut squads = Vec::new();

    for (i, doc) in captures.iter().enumerate() {
        // Button i names team i; a capture that only renders the active
        // team's button falls back to that one.
        let buttons: Vec<ElementRef<'_>> = doc.select(toggle_selector).collect();
        let team = pick_indexed(&buttons, i)
            .map(text_of)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNAVAILABLE.to_string());

        let (bench_cards, xi_cards): (Vec<ElementRef<'_>>, Vec<ElementRef<'_>>) = doc
            .select(&s.card)
            .partition(|card| has_class(*card, "on-bench-wrap"));

        squads.push(TeamSquad {
            team,
            playing_xi: parse_players(pick_indexed(&xi_cards, i), s),
            bench: parse_players(pick_indexed(&bench_cards, i), s),
        });
    }

    Ok(squads)
}

/// The i-th card when all teams render statically, otherwise the only one.
fn pick_indexed<'a>(cards: &[ElementRef<'a>], i: usize) -> Option<ElementRef<'a>> {
    cards.get(i).or_else(|| cards.first()).copied()
}

fn parse_players(card: Option<ElementRef<'_>>, s: &SquadSelectors) -> Vec<SquadPlayer> {
    let Some(card) = card else {
        return Vec::new();
    };
    card.select(&s.row)
        .map(|row| SquadPlayer {
            name: field(row, &s.player_name, UNAVAILABLE),
            role: field(row, &s.player_role, UNAVAILABLE),
        })
        .collect()
}
