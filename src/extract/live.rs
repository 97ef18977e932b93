// src/extract/live.rs

//! Live tab extraction: current batters and bowler, over-by-over timeline
//! and the optional win-probability widget.

use std::sync::OnceLock;

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{
    BatterLine, BowlerLine, LiveState, OverSummary, TeamChance, UNAVAILABLE, WinProbability,
};

use super::dom::{doc_first, field, first_text, sel, text_of};

struct LiveSelectors {
    screen_wrap: Selector,
    container_wrap: Selector,
    batsmen_wrapper: Selector,
    partnership: Selector,
    bowler_score: Selector,
    name: Selector,
    name_p: Selector,
    score: Selector,
    p: Selector,
    strike_icon: Selector,
    strike_rate: Selector,
    timeline: Selector,
    slide: Selector,
    slide_content: Selector,
    slide_title: Selector,
    over_ball: Selector,
    over_total: Selector,
    prob_container: Selector,
    prob_team: Selector,
    prob_percent: Selector,
}

impl LiveSelectors {
    fn get() -> &'static Self {
        static SELECTORS: OnceLock<LiveSelectors> = OnceLock::new();
        SELECTORS.get_or_init(|| Self {
            screen_wrap: sel(".live-screen-wrap"),
            container_wrap: sel(".live-container-wrapper"),
            batsmen_wrapper: sel("div.playing-batsmen-wrapper"),
            partnership: sel("div.batsmen-partnership"),
            bowler_score: sel("div.batsmen-score.bowler"),
            name: sel("div.batsmen-name"),
            name_p: sel("div.batsmen-name p"),
            score: sel("div.batsmen-score"),
            p: sel("p"),
            strike_icon: sel("div.circle-strike-icon"),
            strike_rate: sel("div.strike-rate"),
            timeline: sel("div.overs-timeline"),
            slide: sel("div.overs-slide"),
            slide_content: sel("div.content"),
            slide_title: sel("span"),
            over_ball: sel("div[class*=\"over-ball\"]"),
            over_total: sel("div.total"),
            prob_container: sel("div.progressBarContainer"),
            prob_team: sel("div.teamNameScreenText"),
            prob_percent: sel("div.percentageScreenText"),
        })
    }
}

/// Extract the live-state record.
///
/// Fails only when neither accepted live-screen container variant is
/// present (the page never finished rendering, or the match has no live
/// view).
pub fn extract_live_state(doc: &Html) -> Result<LiveState> {
    let s = LiveSelectors::get();

    doc_first(doc, &s.screen_wrap)
        .or_else(|| doc_first(doc, &s.container_wrap))
        .ok_or_else(|| AppError::container_not_found("live"))?;

    let mut state = LiveState::default();

    if let Some(wrapper) = doc_first(doc, &s.batsmen_wrapper) {
        for block in wrapper.select(&s.partnership) {
            // The bowler block is marked by its score class; everything
            // else in the wrapper is a batter.
            if block.select(&s.bowler_score).next().is_some() {
                state.bowler = Some(parse_bowler(block, s));
            } else {
                state.batters.push(parse_batter(block, s));
            }
        }
    }

    if let Some(timeline) = doc_first(doc, &s.timeline) {
        state.overs_timeline = parse_timeline(timeline, s);
    }

    if let Some(container) = doc_first(doc, &s.prob_container) {
        state.win_probability = parse_win_probability(container, s);
    }

    Ok(state)
}

fn parse_bowler(block: ElementRef<'_>, s: &LiveSelectors) -> BowlerLine {
    let figures_block = block.select(&s.bowler_score).next();
    let parts: Vec<String> = figures_block
        .map(|b| b.select(&s.p).map(text_of).collect())
        .unwrap_or_default();

    let economy = block
        .select(&s.strike_rate)
        .map(text_of)
        .find_map(|txt| labeled_value(&txt, "econ:"))
        .unwrap_or_else(|| UNAVAILABLE.to_string());

    BowlerLine {
        name: field(block, &s.name, UNAVAILABLE),
        figures: parts.first().cloned().unwrap_or_else(|| UNAVAILABLE.to_string()),
        overs: parts.get(1).cloned().unwrap_or_else(|| UNAVAILABLE.to_string()),
        economy,
    }
}

fn parse_batter(block: ElementRef<'_>, s: &LiveSelectors) -> BatterLine {
    let name = first_text(block, &s.name_p)
        .or_else(|| first_text(block, &s.name))
        .unwrap_or_else(|| UNAVAILABLE.to_string());

    let score_parts: Vec<String> = block
        .select(&s.score)
        .next()
        .map(|score| score.select(&s.p).map(text_of).collect())
        .unwrap_or_default();
    let runs = score_parts.first().cloned().unwrap_or_else(|| "0".to_string());
    let balls = score_parts
        .get(1)
        .map(|b| b.trim_matches(['(', ')']).to_string())
        .unwrap_or_else(|| "0".to_string());

    let on_strike = block.select(&s.strike_icon).next().is_some();

    let mut fours = "0".to_string();
    let mut sixes = "0".to_string();
    let mut strike_rate = UNAVAILABLE.to_string();
    for txt in block.select(&s.strike_rate).map(text_of) {
        if let Some(v) = labeled_value(&txt, "4s:") {
            fours = v;
        } else if let Some(v) = labeled_value(&txt, "6s:") {
            sixes = v;
        } else if let Some(v) = labeled_value(&txt, "sr:") {
            strike_rate = v;
        }
    }

    BatterLine {
        name,
        runs,
        balls,
        fours,
        sixes,
        strike_rate,
        on_strike,
    }
}

/// Parse `"SR: 300.00"`-style label/value pairs; label match is
/// case-insensitive.
fn labeled_value(text: &str, label: &str) -> Option<String> {
    let lower = text.to_lowercase();
    if !lower.starts_with(label) {
        return None;
    }
    text.split_once(':').map(|(_, v)| v.trim().to_string())
}

fn parse_timeline(timeline: ElementRef<'_>, s: &LiveSelectors) -> Vec<OverSummary> {
    let mut overs = Vec::new();
    for slide in timeline.select(&s.slide) {
        let Some(content) = slide.select(&s.slide_content).next() else {
            continue;
        };

        let title = field(content, &s.slide_title, UNAVAILABLE);

        // The over total is rendered as one more ball cell starting with
        // '='; it belongs in `total`, not in the ball list.
        let balls: Vec<String> = content
            .select(&s.over_ball)
            .map(text_of)
            .filter(|b| !b.starts_with('='))
            .collect();

        let total = content
            .select(&s.over_total)
            .next()
            .map(|t| text_of(t).replace('=', "").trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNAVAILABLE.to_string());

        overs.push(OverSummary { title, balls, total });
    }
    overs
}

fn parse_win_probability(
    container: ElementRef<'_>,
    s: &LiveSelectors,
) -> Option<WinProbability> {
    let teams: Vec<String> = container.select(&s.prob_team).map(text_of).collect();
    let percents: Vec<String> = container
        .select(&s.prob_percent)
        .map(|p| text_of(p).replace('%', ""))
        .collect();

    // The widget is only meaningful as a pair.
    if teams.len() < 2 || percents.len() < 2 {
        return None;
    }

    Some(WinProbability {
        sides: teams
            .into_iter()
            .zip(percents)
            .take(2)
            .map(|(team, percent)| TeamChance { team, percent })
            .collect(),
    })
}
