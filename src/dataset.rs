use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::player::{PlayerRecord, PlayerStats, Role};
use crate::roster::RosterTable;

pub const DEFAULT_DATA_FILE: &str = "valorant_player_data.csv";

pub const REQUIRED_COLUMNS: [&str; 10] = [
    "Name",
    "Team",
    "Role",
    "K/D Ratio",
    "ACS",
    "Match MVP(s)",
    "First Kills",
    "Aces",
    "Clutches",
    "Headshot Percentage",
];

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to read CSV header: {0}")]
    Header(#[source] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: {source}")]
    Row {
        /// 1-based data row, header excluded.
        row: usize,
        source: csv::Error,
    },

    #[error("row {row}: {message}")]
    InvalidValue { row: usize, message: String },
}

#[derive(Debug, Deserialize)]
struct RawPlayerRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Team")]
    team: String,
    #[serde(rename = "Role")]
    role: String,
    #[serde(rename = "K/D Ratio")]
    kd_ratio: f64,
    #[serde(rename = "ACS")]
    acs: f64,
    #[serde(rename = "Match MVP(s)")]
    mvps: f64,
    #[serde(rename = "First Kills")]
    first_kills: f64,
    #[serde(rename = "Aces")]
    aces: f64,
    #[serde(rename = "Clutches")]
    clutches: f64,
    #[serde(rename = "Headshot Percentage")]
    headshot_pct: f64,
}

impl RawPlayerRow {
    fn into_record(self, row: usize) -> Result<PlayerRecord, DatasetError> {
        let role = self
            .role
            .parse::<Role>()
            .map_err(|err| DatasetError::InvalidValue {
                row,
                message: err.to_string(),
            })?;
        let stats = PlayerStats {
            kd_ratio: self.kd_ratio,
            acs: self.acs,
            mvps: self.mvps,
            first_kills: self.first_kills,
            aces: self.aces,
            clutches: self.clutches,
            headshot_pct: self.headshot_pct,
        };
        Ok(PlayerRecord::new(self.name, self.team, role, stats))
    }
}

pub fn load_player_data(path: &Path) -> Result<Vec<PlayerRecord>, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let players = read_player_data(file)?;
    info!(path = %path.display(), players = players.len(), "player data loaded");
    Ok(players)
}

pub fn load_roster(path: &Path) -> Result<RosterTable, DatasetError> {
    load_player_data(path).map(RosterTable::new)
}

/// Parses player rows from any CSV source. Stops at the first bad row.
pub fn read_player_data<R: Read>(reader: R) -> Result<Vec<PlayerRecord>, DatasetError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(DatasetError::Header)?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DatasetError::MissingColumn(column));
        }
    }

    let mut players = Vec::new();
    for (idx, result) in rdr.deserialize::<RawPlayerRow>().enumerate() {
        let row = idx + 1;
        let raw = result.map_err(|source| DatasetError::Row { row, source })?;
        let record = raw.into_record(row)?;
        debug!(row, name = record.name(), score = record.impact_score(), "scored player");
        players.push(record);
    }
    Ok(players)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Name,Team,Role,K/D Ratio,ACS,Match MVP(s),First Kills,Aces,Clutches,Headshot Percentage\n";

    #[test]
    fn parses_rows_in_order() {
        let csv = format!("{HEADER}A,Alpha,Duelist,1.0,150,5,7,2,5,50\nB,Beta, controller ,1.3,210,2,3,1,4,24.5\n");
        let players = read_player_data(csv.as_bytes()).unwrap();
        assert_eq!(players.len(), 2);
        assert_eq!(players[0].name(), "A");
        assert!((players[0].impact_score() - 48.5).abs() < 1e-9);
        assert_eq!(players[1].role(), Role::Controller);
    }

    #[test]
    fn missing_column_is_reported() {
        let csv = "Name,Team,Role,K/D Ratio,ACS,Match MVP(s),First Kills,Aces,Clutches\nA,T,Duelist,1,1,1,1,1,1\n";
        let err = read_player_data(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn("Headshot Percentage")));
    }

    #[test]
    fn non_numeric_value_names_the_row() {
        let csv = format!("{HEADER}A,Alpha,Duelist,1.0,150,5,7,2,5,50\nB,Beta,Sentinel,high,210,2,3,1,4,24\n");
        let err = read_player_data(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Row { row: 2, .. }));
        assert!(err.to_string().starts_with("row 2:"));
    }

    #[test]
    fn unknown_role_names_the_row() {
        let csv = format!("{HEADER}A,Alpha,Flex,1.0,150,5,7,2,5,50\n");
        let err = read_player_data(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::InvalidValue { row: 1, .. }));
    }
}
