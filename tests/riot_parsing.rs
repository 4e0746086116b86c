use std::fs;
use std::path::PathBuf;

use vct_analyst::riot_api::{
    parse_account_json, parse_match_detail_json, parse_matchlist_json,
};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_account_fixture() {
    let puuid =
        parse_account_json(&read_fixture("riot_account.json")).expect("fixture should parse");
    assert_eq!(puuid, "puuid-karma-001");
}

#[test]
fn account_without_puuid_fails() {
    assert!(parse_account_json(r#"{"gameName":"x"}"#).is_err());
    assert!(parse_account_json(r#"{"puuid":"  "}"#).is_err());
}

#[test]
fn parses_matchlist_fixture() {
    let ids =
        parse_matchlist_json(&read_fixture("riot_matchlist.json")).expect("fixture should parse");
    assert_eq!(ids, ["match-a", "match-b"]);
}

#[test]
fn parses_match_fixture() {
    let detail =
        parse_match_detail_json(&read_fixture("riot_match.json")).expect("fixture should parse");
    assert_eq!(detail.match_id, "match-a");
    assert_eq!(detail.map_name(), Some("Ascent"));
    assert_eq!(detail.players.len(), 2);
    assert_eq!(detail.summary_line(), "match-a on Ascent [competitive] (41m): Red 13 - Blue 11");

    let karma = detail.player("puuid-karma-001").expect("player present");
    assert_eq!((karma.kills, karma.deaths, karma.assists), (22, 16, 4));
    assert_eq!(karma.acs(), Some(230.0));
    assert!((karma.kd_ratio() - 1.375).abs() < 1e-12);
    assert_eq!(detail.raw["matchInfo"]["isCompleted"], true);
}

#[test]
fn partial_match_body_still_parses() {
    let body = r#"{
        "matchInfo": {"matchId": "m1", "mapId": null},
        "players": [{"gameName": "bot", "stats": {"kills": 7, "deaths": null}}],
        "teams": [{"teamId": "Red", "roundsWon": null}, {"teamId": "Blue", "roundsWon": "11"}]
    }"#;
    let detail = parse_match_detail_json(body).expect("partial body should parse");
    assert_eq!(detail.match_id, "m1");
    assert_eq!(detail.map_name(), None);
    assert_eq!(detail.players.len(), 1);
    let bot = &detail.players[0];
    assert_eq!(bot.puuid, "");
    assert_eq!(bot.game_name, "bot");
    assert_eq!((bot.kills, bot.deaths, bot.assists), (7, 0, 0));
    assert_eq!(bot.acs(), None);
    assert_eq!(detail.summary_line(), "m1 on unknown map (?m): Red 0 - Blue 0");
    assert_eq!(detail.raw["teams"][1]["roundsWon"], "11");
}

#[test]
fn match_without_info_keeps_raw_payload() {
    let detail = parse_match_detail_json(r#"{"players":[]}"#).expect("json body parses");
    assert!(detail.match_id.is_empty());
    assert!(detail.players.is_empty());
    assert!(detail.teams.is_empty());
    assert!(detail.raw["players"].is_array());
}

#[test]
fn non_json_match_body_fails() {
    assert!(parse_match_detail_json("not json").is_err());
    assert!(parse_match_detail_json("").is_err());
}
