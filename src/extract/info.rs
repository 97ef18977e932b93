// src/extract/info.rs

//! Match-info tab extraction.
//!
//! Deliberately lenient: the info tab of an upcoming match renders a
//! different layout, so there is no hard container requirement and every
//! field falls back independently.

use std::sync::OnceLock;

use scraper::{Html, Selector};

use crate::models::{MatchInfo, UNAVAILABLE};

use super::dom::{doc_field, doc_first, first_text, sel, text_of};

struct InfoSelectors {
    venue: Selector,
    date: Selector,
    date_fallback: Selector,
    team_name: Selector,
    series: Selector,
    toss_wrap: Selector,
    toss_text: Selector,
    team1_wins: Selector,
    team2_wins: Selector,
    recent_match: Selector,
    points_table: Selector,
    venue_weather: Selector,
    venue_stats: Selector,
    pace_vs_spin: Selector,
}

impl InfoSelectors {
    fn get() -> &'static Self {
        static SELECTORS: OnceLock<InfoSelectors> = OnceLock::new();
        SELECTORS.get_or_init(|| Self {
            venue: sel(".match-date.match-venue"),
            date: sel(".match-info-date"),
            date_fallback: sel("div.match-date"),
            team_name: sel(".form-team-name"),
            series: sel(".s-name"),
            toss_wrap: sel(".toss-wrap"),
            toss_text: sel("p"),
            team1_wins: sel(".team1-wins"),
            team2_wins: sel(".team2-wins"),
            recent_match: sel(".global-match-card.gmc-without-logo"),
            points_table: sel(".table.table-borderless.colHeader"),
            venue_weather: sel(".align-center.weather-wrap"),
            venue_stats: sel(".venue-left-wrapper"),
            pace_vs_spin: sel(".venue-pace-wrap"),
        })
    }
}

/// Extract the match-info record. Never fails; every field defaults.
pub fn extract_match_info(doc: &Html) -> MatchInfo {
    let s = InfoSelectors::get();

    let date = doc_first(doc, &s.date)
        .or_else(|| doc_first(doc, &s.date_fallback))
        .map(text_of)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNAVAILABLE.to_string());

    let toss = doc_first(doc, &s.toss_wrap)
        .and_then(|wrap| first_text(wrap, &s.toss_text))
        .unwrap_or_else(|| UNAVAILABLE.to_string());

    MatchInfo {
        venue: doc_field(doc, &s.venue, UNAVAILABLE),
        date,
        teams: doc.select(&s.team_name).map(text_of).collect(),
        series: doc_field(doc, &s.series, UNAVAILABLE),
        toss,
        head_to_head: vec![
            doc_field(doc, &s.team1_wins, UNAVAILABLE),
            doc_field(doc, &s.team2_wins, UNAVAILABLE),
        ],
        recent_results: doc.select(&s.recent_match).map(text_of).collect(),
        points_table: doc_field(doc, &s.points_table, UNAVAILABLE),
        venue_weather: doc_field(doc, &s.venue_weather, UNAVAILABLE),
        venue_stats: doc_field(doc, &s.venue_stats, UNAVAILABLE),
        pace_vs_spin: doc_field(doc, &s.pace_vs_spin, UNAVAILABLE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_populated_info_page() {
        let html = r#"<body><div class="match-info-card">
             <div class="match-date match-venue">Eden Gardens, Kolkata</div>
             <div class="match-info-date">Sat, 1 Feb 2025</div>
             <div class="form-team-name">IND</div>
             <div class="form-team-name">AUS</div>
             <div class="s-name">Border-Gavaskar Trophy</div>
             <div class="toss-wrap"><p>IND won the toss and chose to bat</p></div>
             <div class="team1-wins">12</div>
             <div class="team2-wins">9</div>
             <div class="global-match-card gmc-without-logo">IND beat AUS by 6 wkts</div>
           </div></body>"#;
        let info = extract_match_info(&Html::parse_document(html));

        assert_eq!(info.venue, "Eden Gardens, Kolkata");
        assert_eq!(info.date, "Sat, 1 Feb 2025");
        assert_eq!(info.teams, vec!["IND", "AUS"]);
        assert_eq!(info.series, "Border-Gavaskar Trophy");
        assert_eq!(info.toss, "IND won the toss and chose to bat");
        assert_eq!(info.head_to_head, vec!["12", "9"]);
        assert_eq!(info.recent_results, vec!["IND beat AUS by 6 wkts"]);
        // Sections absent from the page resolve to the sentinel.
        assert_eq!(info.venue_weather, UNAVAILABLE);
        assert_eq!(info.pace_vs_spin, UNAVAILABLE);
    }

    #[test]
    fn missing_field_leaves_other_fields_populated() {
        // Sentinel propagation: drop the toss node only.
        let html = r#"<body>
             <div class="s-name">Asia Cup</div>
             <div class="match-date match-venue">Dubai</div>
           </body>"#;
        let info = extract_match_info(&Html::parse_document(html));
        assert_eq!(info.toss, UNAVAILABLE);
        assert_eq!(info.series, "Asia Cup");
        assert_eq!(info.venue, "Dubai");
    }

    #[test]
    fn date_falls_back_to_secondary_node() {
        let html = r#"<body><div class="match-date">Sun, 2 Feb 2025</div></body>"#;
        let info = extract_match_info(&Html::parse_document(html));
        assert_eq!(info.date, "Sun, 2 Feb 2025");
    }

    #[test]
    fn empty_page_is_all_defaults_not_an_error() {
        let info = extract_match_info(&Html::parse_document("<body></body>"));
        assert_eq!(info.venue, UNAVAILABLE);
        assert!(info.teams.is_empty());
        assert!(info.recent_results.is_empty());
        assert_eq!(info.head_to_head, vec![UNAVAILABLE, UNAVAILABLE]);
    }
}
