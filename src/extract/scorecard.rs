// src/extract/scorecard.rs

//! Scorecard tab extraction: per-innings batting and bowling tables, fall
//! of wickets, partnerships and the yet-to-bat list.

use std::sync::OnceLock;

use scraper::{ElementRef, Html, Selector};

use crate::error::Result;
use crate::models::{
    BattingLine, BowlingLine, FallOfWicket, Partnership, Scorecard, UNAVAILABLE, YetToBat,
};

use super::dom::{field, first_text, following_with_class, require_container, sel, text_of};

struct ScorecardSelectors {
    container: Selector,
    table_heading: Selector,
    heading_text: Selector,
    data_table: Selector,
    row: Selector,
    cell: Selector,
    player_name: Selector,
    any_heading: Selector,
    yet_to_bat_entry: Selector,
    yet_to_bat_name: Selector,
    yet_to_bat_avg: Selector,
    partnership_section: Selector,
    partnership_block: Selector,
    wicket_info: Selector,
    partnership_info: Selector,
    data_point: Selector,
    data_name: Selector,
    run_highlight: Selector,
    partnership_runs: Selector,
}

impl ScorecardSelectors {
    fn get() -> &'static Self {
        static SELECTORS: OnceLock<ScorecardSelectors> = OnceLock::new();
        SELECTORS.get_or_init(|| Self {
            container: sel(".score"),
            table_heading: sel("div.table-heading"),
            heading_text: sel("h3"),
            data_table: sel("table.bowler-table"),
            row: sel("tbody tr"),
            cell: sel("td"),
            player_name: sel("span.player-name"),
            any_heading: sel("h3"),
            yet_to_bat_entry: sel("div.content"),
            yet_to_bat_name: sel("div.name"),
            yet_to_bat_avg: sel("p span"),
            partnership_section: sel("div.partnership-section"),
            partnership_block: sel("div.p-section-wrapper"),
            wicket_info: sel("div.p-wckt-info"),
            partnership_info: sel("div.p-info-wrapper"),
            data_point: sel("div.p-data"),
            data_name: sel("p"),
            run_highlight: sel("span.run-highlight"),
            partnership_runs: sel("p.p-runs"),
        })
    }
}

/// Extract the scorecard record.
///
/// Fails only when the score container is absent (scorecard not available
/// yet, typically a match that has not started).
pub fn extract_scorecard(doc: &Html) -> Result<Scorecard> {
    let s = ScorecardSelectors::get();

    require_container(doc, &s.container, "scorecard")?;

    let mut card = Scorecard::default();

    // Batting and bowling sections are located by heading text; the data
    // table is the heading's following score card.
    for heading in doc.select(&s.table_heading) {
        let Some(title) = first_text(heading, &s.heading_text) else {
            continue;
        };
        let Some(section) = following_with_class(heading, "score-card") else {
            continue;
        };
        let Some(table) = section.select(&s.data_table).next() else {
            continue;
        };

        match title.to_lowercase().as_str() {
            "batting" => card.batting.push(parse_batting_rows(table, s)),
            "bowling" => card.bowling.push(parse_bowling_rows(table, s)),
            _ => {}
        }
    }

    card.yet_to_bat = parse_yet_to_bat(doc, s);
    card.fall_of_wickets = parse_fall_of_wickets(doc, s);
    card.partnerships = parse_partnerships(doc, s);

    Ok(card)
}

fn parse_batting_rows(table: ElementRef<'_>, s: &ScorecardSelectors) -> Vec<BattingLine> {
    let mut lines = Vec::new();
    for row in table.select(&s.row) {
        let cells: Vec<ElementRef<'_>> = row.select(&s.cell).collect();
        if cells.len() < 6 {
            continue;
        }
        lines.push(BattingLine {
            batter: field(cells[0], &s.player_name, UNAVAILABLE),
            runs: text_of(cells[1]),
            balls: text_of(cells[2]),
            fours: text_of(cells[3]),
            sixes: text_of(cells[4]),
            strike_rate: text_of(cells[5]),
        });
    }
    lines
}

fn parse_bowling_rows(table: ElementRef<'_>, s: &ScorecardSelectors) -> Vec<BowlingLine> {
    let mut lines = Vec::new();
    for row in table.select(&s.row) {
        let cells: Vec<ElementRef<'_>> = row.select(&s.cell).collect();
        if cells.len() < 6 {
            continue;
        }
        lines.push(BowlingLine {
            bowler: field(cells[0], &s.player_name, UNAVAILABLE),
            overs: text_of(cells[1]),
            maidens: text_of(cells[2]),
            runs_conceded: text_of(cells[3]),
            wickets: text_of(cells[4]),
            economy: text_of(cells[5]),
        });
    }
    lines
}

/// Find the section heading whose text satisfies `pred`.
fn find_heading<'a>(
    doc: &'a Html,
    s: &ScorecardSelectors,
    pred: impl Fn(&str) -> bool,
) -> Option<ElementRef<'a>> {
    doc.select(&s.any_heading)
        .find(|h| pred(&text_of(*h).to_lowercase()))
}

/// A missing yet-to-bat section yields an empty list, not the sentinel:
/// with all players already batting there is simply nobody left.
fn parse_yet_to_bat(doc: &Html, s: &ScorecardSelectors) -> Vec<YetToBat> {
    let Some(heading) = find_heading(doc, s, |t| t.contains("yet to bat")) else {
        return Vec::new();
    };
    let Some(wrapper) = following_with_class(heading, "yet-to-bat") else {
        return Vec::new();
    };

    wrapper
        .select(&s.yet_to_bat_entry)
        .map(|entry| YetToBat {
            name: field(entry, &s.yet_to_bat_name, UNAVAILABLE),
            average: field(entry, &s.yet_to_bat_avg, UNAVAILABLE),
        })
        .collect()
}

fn parse_fall_of_wickets(doc: &Html, s: &ScorecardSelectors) -> Vec<FallOfWicket> {
    let Some(heading) = find_heading(doc, s, |t| t.contains("fall of wickets")) else {
        return Vec::new();
    };
    let Some(section) = following_with_class(heading, "score-card") else {
        return Vec::new();
    };
    let Some(table) = section.select(&s.data_table).next() else {
        return Vec::new();
    };

    let mut wickets = Vec::new();
    for row in table.select(&s.row) {
        let cells: Vec<ElementRef<'_>> = row.select(&s.cell).collect();
        if cells.len() < 3 {
            continue;
        }
        wickets.push(FallOfWicket {
            batter: field(cells[0], &s.player_name, UNAVAILABLE),
            score: text_of(cells[1]),
            over: text_of(cells[2]),
        });
    }
    wickets
}

fn parse_partnerships(doc: &Html, s: &ScorecardSelectors) -> Vec<Partnership> {
    let Some(section) = doc.select(&s.partnership_section).next() else {
        return Vec::new();
    };

    let mut partnerships = Vec::new();
    for block in section.select(&s.partnership_block) {
        let wicket = field(block, &s.wicket_info, UNAVAILABLE);
        let Some(info) = block.select(&s.partnership_info).next() else {
            continue;
        };
        let points: Vec<ElementRef<'_>> = info.select(&s.data_point).collect();
        if points.len() < 3 {
            continue;
        }

        partnerships.push(Partnership {
            wicket,
            batter1: field(points[0], &s.data_name, UNAVAILABLE),
            batter1_runs: field(points[0], &s.run_highlight, UNAVAILABLE),
            runs: field(points[1], &s.partnership_runs, UNAVAILABLE),
            batter2: field(points[2], &s.data_name, UNAVAILABLE),
            batter2_runs: field(points[2], &s.run_highlight, UNAVAILABLE),
        });
    }
    partnerships
}
