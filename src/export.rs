use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use rust_xlsxwriter::{Workbook, Worksheet};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::player::{PlayerRecord, PlayerSnapshot};
use crate::roster::RosterTable;

const SNAPSHOT_FILE: &str = "players.json";
const SNAPSHOT_VERSION: u32 = 1;

/// Destination for loaded player records.
pub trait RecordSink {
    fn name(&self) -> &str;
    fn publish(&self, players: &[PlayerRecord]) -> Result<ExportReport>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub path: PathBuf,
    pub players: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSnapshotFile {
    pub version: u32,
    pub generated_at: String,
    pub players: Vec<PlayerSnapshot>,
}

/// Writes `players.json` into a directory, replacing it atomically.
#[derive(Debug, Clone)]
pub struct JsonSnapshotSink {
    dir: PathBuf,
}

impl JsonSnapshotSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(SNAPSHOT_FILE)
    }
}

impl RecordSink for JsonSnapshotSink {
    fn name(&self) -> &str {
        "json"
    }

    fn publish(&self, players: &[PlayerRecord]) -> Result<ExportReport> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create export dir {}", self.dir.display()))?;
        let file = PlayerSnapshotFile {
            version: SNAPSHOT_VERSION,
            generated_at: Utc::now().to_rfc3339(),
            players: players.iter().map(PlayerRecord::snapshot).collect(),
        };
        let path = self.path();
        let tmp = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(&file).context("serialize player snapshot")?;
        fs::write(&tmp, json).context("write player snapshot")?;
        fs::rename(&tmp, &path).context("swap player snapshot")?;
        Ok(ExportReport {
            path,
            players: players.len(),
        })
    }
}

/// Writes a workbook with a Players sheet and a BestTeam sheet.
#[derive(Debug, Clone)]
pub struct XlsxSink {
    path: PathBuf,
}

impl XlsxSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSink for XlsxSink {
    fn name(&self) -> &str {
        "xlsx"
    }

    fn publish(&self, players: &[PlayerRecord]) -> Result<ExportReport> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("create export dir {}", parent.display()))?;
        }

        let mut player_rows = vec![vec![
            "Name".to_string(),
            "Team".to_string(),
            "Role".to_string(),
            "K/D Ratio".to_string(),
            "ACS".to_string(),
            "Match MVP(s)".to_string(),
            "First Kills".to_string(),
            "Aces".to_string(),
            "Clutches".to_string(),
            "Headshot Percentage".to_string(),
            "Impact Score".to_string(),
        ]];
        player_rows.extend(players.iter().map(player_row));

        let roster = RosterTable::new(players.to_vec());
        let mut team_rows = vec![vec![
            "Role".to_string(),
            "Name".to_string(),
            "Team".to_string(),
            "Impact Score".to_string(),
        ]];
        for pick in roster.suggest_team_composition().picks {
            team_rows.push(vec![
                pick.role.to_string(),
                pick.name,
                pick.team,
                format!("{:.2}", pick.impact_score),
            ]);
        }

        let mut workbook = Workbook::new();
        {
            let sheet = workbook.add_worksheet();
            sheet.set_name("Players")?;
            write_rows(sheet, &player_rows)?;
        }
        {
            let sheet = workbook.add_worksheet();
            sheet.set_name("BestTeam")?;
            write_rows(sheet, &team_rows)?;
        }
        workbook
            .save(&self.path)
            .with_context(|| format!("failed writing workbook to {}", self.path.display()))?;

        Ok(ExportReport {
            path: self.path.clone(),
            players: players.len(),
        })
    }
}

/// Hands the records to every sink. A failing sink is logged and skipped.
/// Publishes to every sink, logging each outcome. Returns how many sinks failed.
pub fn publish_all(sinks: &[Box<dyn RecordSink>], players: &[PlayerRecord]) -> usize {
    let mut failed = 0usize;
    for sink in sinks {
        match sink.publish(players) {
            Ok(report) => info!(
                sink = sink.name(),
                path = %report.path.display(),
                players = report.players,
                "records exported"
            ),
            Err(err) => {
                warn!(sink = sink.name(), error = %format!("{err:#}"), "export failed");
                failed += 1;
            }
        }
    }
    failed
}

pub fn read_snapshot(path: &Path) -> Result<PlayerSnapshotFile> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read player snapshot {}", path.display()))?;
    serde_json::from_str(&raw).context("invalid player snapshot json")
}

fn player_row(player: &PlayerRecord) -> Vec<String> {
    let stats = player.stats();
    vec![
        player.name().to_string(),
        player.team().to_string(),
        player.role().to_string(),
        stats.kd_ratio.to_string(),
        stats.acs.to_string(),
        stats.mvps.to_string(),
        stats.first_kills.to_string(),
        stats.aces.to_string(),
        stats.clutches.to_string(),
        stats.headshot_pct.to_string(),
        format!("{:.2}", player.impact_score()),
    ]
}

fn write_rows(worksheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<()> {
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, value) in row.iter().enumerate() {
            worksheet
                .write_string(row_idx as u32, col_idx as u16, value)
                .with_context(|| format!("write cell ({row_idx},{col_idx})"))?;
        }
    }
    Ok(())
}
