use std::fmt::Write as _;

use anyhow::Result;
use tracing::debug;

use crate::roster::{Metric, RosterTable, TeamComposition, TopPlayerRow};

/// Keywords that turn a "top ..." question into a ranking, checked in order.
pub const TOP_METRIC_KEYWORDS: [(&str, Metric); 5] = [
    ("kd", Metric::KdRatio),
    ("acs", Metric::Acs),
    ("mvp", Metric::Mvps),
    ("kills", Metric::FirstKills),
    ("ace", Metric::Aces),
];

const COMPOSITION_PHRASES: [&str; 2] = ["team composition", "best team"];

/// Answers free-form questions the canned routes don't cover.
pub trait Assistant {
    fn answer(&self, query: &str) -> Result<String>;
}

/// Fallback used when no hosted assistant is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineAssistant;

impl Assistant for OfflineAssistant {
    fn answer(&self, _query: &str) -> Result<String> {
        Ok("I can only answer roster questions offline. Try \"top kd players\", \
            \"top acs\", \"top mvp\", \"top kills\", \"top ace\" or \"best team\"."
            .to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    TopPlayers(Metric),
    TeamComposition,
    Assistant,
}

type Matcher = fn(&str) -> Option<Route>;

/// Keyword dispatcher: the first matcher that claims a query wins, anything
/// left over goes to the assistant.
pub struct QueryRouter {
    routes: Vec<(&'static str, Matcher)>,
    top_n: usize,
}

impl QueryRouter {
    pub fn new(top_n: usize) -> Self {
        Self {
            routes: vec![
                ("top_players", match_top_players as Matcher),
                ("team_composition", match_composition as Matcher),
            ],
            top_n,
        }
    }

    pub fn classify(&self, query: &str) -> Route {
        let lowered = query.to_lowercase();
        for (name, matcher) in &self.routes {
            if let Some(route) = matcher(&lowered) {
                debug!(route = *name, "query routed");
                return route;
            }
        }
        Route::Assistant
    }

    pub fn respond(
        &self,
        query: &str,
        roster: &RosterTable,
        assistant: &dyn Assistant,
    ) -> Result<String> {
        match self.classify(query) {
            Route::TopPlayers(metric) => {
                let rows = roster.top_players(metric, self.top_n);
                Ok(format_top_players(metric, &rows))
            }
            Route::TeamComposition => Ok(format_composition(&roster.suggest_team_composition())),
            Route::Assistant => assistant.answer(query),
        }
    }
}

impl Default for QueryRouter {
    fn default() -> Self {
        Self::new(crate::roster::DEFAULT_TOP_N)
    }
}

fn match_top_players(lowered: &str) -> Option<Route> {
    if !lowered.contains("top") {
        return None;
    }
    TOP_METRIC_KEYWORDS
        .iter()
        .find(|(kw, _)| lowered.contains(*kw))
        .map(|(_, metric)| Route::TopPlayers(*metric))
}

fn match_composition(lowered: &str) -> Option<Route> {
    COMPOSITION_PHRASES
        .iter()
        .any(|phrase| lowered.contains(*phrase))
        .then_some(Route::TeamComposition)
}

pub fn format_top_players(metric: Metric, rows: &[TopPlayerRow]) -> String {
    let mut out = format!("Top players by {}:\n", metric.label());
    if rows.is_empty() {
        out.push_str("(no players loaded)\n");
        return out;
    }
    let name_w = rows.iter().map(|r| r.name.len()).max().unwrap_or(0).max(4);
    let team_w = rows.iter().map(|r| r.team.len()).max().unwrap_or(0).max(4);
    let _ = writeln!(
        out,
        "{:<name_w$}  {:<team_w$}  {:<10}  {:>10}",
        "name",
        "team",
        "role",
        metric.key()
    );
    for row in rows {
        let _ = writeln!(
            out,
            "{:<name_w$}  {:<team_w$}  {:<10}  {:>10.2}",
            row.name,
            row.team,
            row.role.as_str(),
            row.value
        );
    }
    out
}

pub fn format_composition(comp: &TeamComposition) -> String {
    let mut out = String::from("Suggested optimal team composition:\n");
    if comp.is_empty() {
        out.push_str("(no players loaded)\n");
        return out;
    }
    for pick in &comp.picks {
        let _ = writeln!(
            out,
            "{}: {} (from {}) - Impact Score: {:.2}",
            pick.role, pick.name, pick.team, pick.impact_score
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_order_prefers_kd() {
        let router = QueryRouter::default();
        assert_eq!(
            router.classify("Top KD and ACS players?"),
            Route::TopPlayers(Metric::KdRatio)
        );
        assert_eq!(router.classify("top aces"), Route::TopPlayers(Metric::Aces));
        assert_eq!(
            router.classify("who has the top first kills"),
            Route::TopPlayers(Metric::FirstKills)
        );
    }

    #[test]
    fn top_without_metric_is_not_a_ranking() {
        let router = QueryRouter::default();
        assert_eq!(router.classify("top teams this year"), Route::Assistant);
    }

    #[test]
    fn composition_phrases() {
        let router = QueryRouter::default();
        assert_eq!(router.classify("Suggest a TEAM COMPOSITION"), Route::TeamComposition);
        assert_eq!(router.classify("best team"), Route::TeamComposition);
    }

    #[test]
    fn empty_roster_renders_placeholder() {
        let text = format_top_players(Metric::Acs, &[]);
        assert!(text.starts_with("Top players by ACS:"));
        assert!(text.contains("no players loaded"));
    }
}
