use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::config::env_string;
use crate::http_client::{DEFAULT_REQUEST_TIMEOUT_SECS, build_http_client};

pub const DEFAULT_ACCOUNT_BASE_URL: &str = "https://asia.api.riotgames.com";
pub const DEFAULT_MATCHLIST_BASE_URL: &str = "https://ap.api.riotgames.com";
pub const DEFAULT_MATCH_BASE_URL: &str = "https://asia.api.riotgames.com";

#[derive(Debug, Clone)]
pub struct RiotApiConfig {
    pub api_key: String,
    pub account_base_url: String,
    pub matchlist_base_url: String,
    pub match_base_url: String,
    pub timeout_secs: u64,
}

impl RiotApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            account_base_url: DEFAULT_ACCOUNT_BASE_URL.to_string(),
            matchlist_base_url: DEFAULT_MATCHLIST_BASE_URL.to_string(),
            match_base_url: DEFAULT_MATCH_BASE_URL.to_string(),
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// Same base URL for all three endpoints. Handy for local servers.
    pub fn with_base_url(mut self, base: &str) -> Self {
        self.account_base_url = base.to_string();
        self.matchlist_base_url = base.to_string();
        self.match_base_url = base.to_string();
        self
    }

    pub fn from_env() -> Result<Self> {
        let api_key = env_string("RIOT_API_KEY").context("RIOT_API_KEY is not set")?;
        let mut cfg = Self::new(api_key);
        if let Some(url) = env_string("RIOT_ACCOUNT_BASE_URL") {
            cfg.account_base_url = url;
        }
        if let Some(url) = env_string("RIOT_MATCHLIST_BASE_URL") {
            cfg.matchlist_base_url = url;
        }
        if let Some(url) = env_string("RIOT_MATCH_BASE_URL") {
            cfg.match_base_url = url;
        }
        cfg.timeout_secs = env_string("RIOT_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
            .clamp(1, 120);
        Ok(cfg)
    }
}

#[derive(Debug, Deserialize)]
struct AccountResponse {
    puuid: String,
}

#[derive(Debug, Deserialize)]
struct MatchlistResponse {
    #[serde(default)]
    history: Vec<MatchlistEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchlistEntry {
    match_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchPlayerLine {
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
    pub team_id: String,
    pub character_id: String,
    pub score: i64,
    pub rounds_played: u32,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
}

impl MatchPlayerLine {
    /// Average combat score for the match, if any rounds were played.
    pub fn acs(&self) -> Option<f64> {
        (self.rounds_played > 0).then(|| self.score as f64 / self.rounds_played as f64)
    }

    pub fn kd_ratio(&self) -> f64 {
        self.kills as f64 / self.deaths.max(1) as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchTeamLine {
    pub team_id: String,
    pub won: bool,
    pub rounds_won: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchDetail {
    pub match_id: String,
    pub map_id: Option<String>,
    pub queue_id: Option<String>,
    pub game_length_millis: Option<u64>,
    pub players: Vec<MatchPlayerLine>,
    pub teams: Vec<MatchTeamLine>,
    #[serde(skip)]
    pub raw: Value,
}

impl MatchDetail {
    /// "Ascent" for "/Game/Maps/Ascent/Ascent".
    pub fn map_name(&self) -> Option<&str> {
        self.map_id
            .as_deref()
            .and_then(|id| id.rsplit('/').find(|seg| !seg.is_empty()))
    }

    pub fn player(&self, puuid: &str) -> Option<&MatchPlayerLine> {
        self.players.iter().find(|p| p.puuid == puuid)
    }

    pub fn summary_line(&self) -> String {
        let map = self.map_name().unwrap_or("unknown map");
        let minutes = self
            .game_length_millis
            .map(|ms| format!("{}m", ms / 60_000))
            .unwrap_or_else(|| "?m".to_string());
        let score = self
            .teams
            .iter()
            .map(|t| format!("{} {}", t.team_id, t.rounds_won))
            .collect::<Vec<_>>()
            .join(" - ");
        let queue = self
            .queue_id
            .as_deref()
            .map(|q| format!(" [{q}]"))
            .unwrap_or_default();
        if score.is_empty() {
            format!("{} on {map}{queue} ({minutes})", self.match_id)
        } else {
            format!("{} on {map}{queue} ({minutes}): {score}", self.match_id)
        }
    }
}

pub fn parse_account_json(raw: &str) -> Result<String> {
    let account: AccountResponse = serde_json::from_str(raw).context("invalid account json")?;
    if account.puuid.trim().is_empty() {
        return Err(anyhow!("account response has an empty puuid"));
    }
    Ok(account.puuid)
}

pub fn parse_matchlist_json(raw: &str) -> Result<Vec<String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let list: MatchlistResponse =
        serde_json::from_str(trimmed).context("invalid matchlist json")?;
    Ok(list.history.into_iter().map(|m| m.match_id).collect())
}

/// Any JSON body yields a detail. Fields that are absent, null or of an
/// unexpected type fall back to empty values; `raw` keeps the full payload.
pub fn parse_match_detail_json(raw: &str) -> Result<MatchDetail> {
    let value: Value = serde_json::from_str(raw).context("invalid match json")?;
    let info = &value["matchInfo"];
    let players = list_at(&value, "players")
        .iter()
        .map(|p| {
            let stats = &p["stats"];
            MatchPlayerLine {
                puuid: text_at(p, "puuid").unwrap_or_default(),
                game_name: text_at(p, "gameName").unwrap_or_default(),
                tag_line: text_at(p, "tagLine").unwrap_or_default(),
                team_id: text_at(p, "teamId").unwrap_or_default(),
                character_id: text_at(p, "characterId").unwrap_or_default(),
                score: stats["score"].as_i64().unwrap_or_default(),
                rounds_played: count_at(stats, "roundsPlayed"),
                kills: count_at(stats, "kills"),
                deaths: count_at(stats, "deaths"),
                assists: count_at(stats, "assists"),
            }
        })
        .collect();
    let teams = list_at(&value, "teams")
        .iter()
        .map(|t| MatchTeamLine {
            team_id: text_at(t, "teamId").unwrap_or_default(),
            won: t["won"].as_bool().unwrap_or_default(),
            rounds_won: count_at(t, "roundsWon"),
        })
        .collect();
    Ok(MatchDetail {
        match_id: text_at(info, "matchId").unwrap_or_default(),
        map_id: text_at(info, "mapId"),
        queue_id: text_at(info, "queueId"),
        game_length_millis: info["gameLengthMillis"].as_u64(),
        players,
        teams,
        raw: value,
    })
}

fn text_at(value: &Value, key: &str) -> Option<String> {
    value[key]
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn count_at(value: &Value, key: &str) -> u32 {
    value[key]
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or_default()
}

fn list_at<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value[key].as_array().map(Vec::as_slice).unwrap_or_default()
}

/// Blocking client for the three Riot endpoints. Every call reports failure
/// as `None` after logging it.
pub struct RiotApi {
    client: Client,
    config: RiotApiConfig,
}

impl RiotApi {
    pub fn new(client: Client, config: RiotApiConfig) -> Self {
        Self { client, config }
    }

    pub fn from_config(config: RiotApiConfig) -> Result<Self> {
        let client = build_http_client(Duration::from_secs(config.timeout_secs))?;
        Ok(Self::new(client, config))
    }

    pub fn resolve_identity(&self, game_name: &str, tag_line: &str) -> Option<String> {
        let url = self.endpoint(
            &self.config.account_base_url,
            &["riot", "account", "v1", "accounts", "by-riot-id", game_name, tag_line],
        )?;
        let body = self.get_body("account", url)?;
        match parse_account_json(&body) {
            Ok(puuid) => {
                info!("PUUID retrieved successfully");
                Some(puuid)
            }
            Err(err) => {
                warn!(error = %format!("{err:#}"), "error parsing account response");
                None
            }
        }
    }

    pub fn list_matches(&self, puuid: &str) -> Option<Vec<String>> {
        let url = self.endpoint(
            &self.config.matchlist_base_url,
            &["val", "match", "v1", "matchlists", "by-puuid", puuid],
        )?;
        let body = self.get_body("match history", url)?;
        match parse_matchlist_json(&body) {
            Ok(ids) => {
                info!(matches = ids.len(), "match history retrieved successfully");
                Some(ids)
            }
            Err(err) => {
                warn!(error = %format!("{err:#}"), "error parsing match history");
                None
            }
        }
    }

    pub fn fetch_match_detail(&self, match_id: &str) -> Option<MatchDetail> {
        let url = self.endpoint(
            &self.config.match_base_url,
            &["val", "match", "v1", "matches", match_id],
        )?;
        let body = self.get_body("match details", url)?;
        match parse_match_detail_json(&body) {
            Ok(mut detail) => {
                if detail.match_id.is_empty() {
                    detail.match_id = match_id.to_string();
                }
                info!(match_id, "match details retrieved successfully");
                Some(detail)
            }
            Err(err) => {
                warn!(match_id, error = %format!("{err:#}"), "error parsing match details");
                None
            }
        }
    }

    fn endpoint(&self, base: &str, segments: &[&str]) -> Option<Url> {
        let mut url = match Url::parse(base) {
            Ok(url) => url,
            Err(err) => {
                warn!(base, error = %err, "invalid base url");
                return None;
            }
        };
        {
            let Ok(mut path) = url.path_segments_mut() else {
                warn!(base, "base url cannot carry a path");
                return None;
            };
            path.pop_if_empty().extend(segments);
        }
        url.query_pairs_mut()
            .append_pair("api_key", &self.config.api_key);
        Some(url)
    }

    fn get_body(&self, what: &str, url: Url) -> Option<String> {
        let resp = match self.client.get(url).send() {
            Ok(resp) => resp,
            Err(err) => {
                warn!(what, error = %err.without_url(), "request failed");
                return None;
            }
        };
        let status = resp.status();
        let body = resp.text().unwrap_or_default();
        if status != StatusCode::OK {
            warn!(what, status = status.as_u16(), body = %body, "error fetching {what}");
            return None;
        }
        Some(body)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchSummary {
    pub puuid: Option<String>,
    pub match_ids: usize,
    pub fetched: usize,
    pub failed: Vec<String>,
}

/// Identity, then history, then one detail call per match, strictly in
/// sequence. A missing stage skips everything that depends on it.
pub fn fetch_player_matches(
    api: &RiotApi,
    game_name: &str,
    tag_line: &str,
    mut on_detail: impl FnMut(&str, &MatchDetail),
) -> FetchSummary {
    let mut summary = FetchSummary::default();
    let Some(puuid) = api.resolve_identity(game_name, tag_line) else {
        return summary;
    };
    summary.puuid = Some(puuid.clone());

    let Some(match_ids) = api.list_matches(&puuid) else {
        return summary;
    };
    summary.match_ids = match_ids.len();

    for match_id in match_ids {
        match api.fetch_match_detail(&match_id) {
            Some(detail) => {
                summary.fetched += 1;
                on_detail(&puuid, &detail);
            }
            None => summary.failed.push(match_id),
        }
    }
    summary
}
