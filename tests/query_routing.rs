use std::cell::RefCell;
use std::path::PathBuf;

use anyhow::{Result, anyhow};

use vct_analyst::dataset::load_roster;
use vct_analyst::query::{Assistant, QueryRouter, Route};
use vct_analyst::repl::run_repl;
use vct_analyst::roster::{Metric, RosterTable};

#[derive(Default)]
struct RecordingAssistant {
    seen: RefCell<Vec<String>>,
}

impl Assistant for RecordingAssistant {
    fn answer(&self, query: &str) -> Result<String> {
        self.seen.borrow_mut().push(query.to_string());
        Ok("stub answer".to_string())
    }
}

struct FailingAssistant;

impl Assistant for FailingAssistant {
    fn answer(&self, _query: &str) -> Result<String> {
        Err(anyhow!("assistant unavailable"))
    }
}

fn fixture_roster() -> RosterTable {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push("players.csv");
    load_roster(&path).expect("fixture csv should load")
}

#[test]
fn canned_queries_route_as_expected() {
    let router = QueryRouter::default();
    assert_eq!(router.classify("top kd players"), Route::TopPlayers(Metric::KdRatio));
    assert_eq!(router.classify("Show me the TOP ACS"), Route::TopPlayers(Metric::Acs));
    assert_eq!(router.classify("top mvp"), Route::TopPlayers(Metric::Mvps));
    assert_eq!(router.classify("best team"), Route::TeamComposition);
    assert_eq!(router.classify("hello"), Route::Assistant);
}

#[test]
fn kd_answer_lists_top_five() {
    let roster = fixture_roster();
    let assistant = RecordingAssistant::default();
    let text = QueryRouter::default()
        .respond("top kd players", &roster, &assistant)
        .expect("ranking answer");
    assert!(text.starts_with("Top players by K/D ratio:"));
    // header + 5 rows
    assert_eq!(text.lines().count(), 7);
    assert!(text.contains("Aspas"));
    assert!(!text.contains("Boaster"));
    assert!(assistant.seen.borrow().is_empty());
}

#[test]
fn composition_answer_names_each_pick() {
    let roster = fixture_roster();
    let text = QueryRouter::default()
        .respond("what is the best team?", &roster, &RecordingAssistant::default())
        .expect("composition answer");
    assert!(text.contains("Duelist: Aspas (from LEV) - Impact Score: 75.97"));
    assert!(text.contains("Controller: Boaster (from FNC) - Impact Score: 41.20"));
    assert!(!text.contains("Initiator"));
}

#[test]
fn fallback_reaches_assistant_with_original_text() {
    let roster = fixture_roster();
    let assistant = RecordingAssistant::default();
    let text = QueryRouter::default()
        .respond("Hello", &roster, &assistant)
        .expect("fallback answer");
    assert_eq!(text, "stub answer");
    assert_eq!(assistant.seen.borrow().as_slice(), ["Hello".to_string()]);
}

#[test]
fn configured_top_n_is_used() {
    let roster = fixture_roster();
    let text = QueryRouter::new(2)
        .respond("top acs", &roster, &RecordingAssistant::default())
        .expect("ranking answer");
    assert_eq!(text.lines().count(), 4);
}

#[test]
fn repl_stops_on_first_error() {
    let roster = fixture_roster();
    let mut out = Vec::new();
    let err = run_repl(
        "top kd\nhello\nbest team\n".as_bytes(),
        &mut out,
        &QueryRouter::default(),
        &roster,
        &FailingAssistant,
    )
    .unwrap_err();
    assert!(err.to_string().contains("assistant unavailable"));
    let text = String::from_utf8(out).expect("utf8 output");
    assert!(text.contains("Assistant: Top players by K/D ratio:"));
    assert!(!text.contains("Suggested optimal team composition"));
}
