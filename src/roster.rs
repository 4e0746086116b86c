use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::player::{PlayerRecord, Role};

pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("unknown metric '{0}'")]
    UnknownMetric(String),
}

/// A sortable roster column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    KdRatio,
    Acs,
    Mvps,
    FirstKills,
    Aces,
    Clutches,
    HeadshotPct,
    ImpactScore,
}

impl Metric {
    pub const ALL: [Metric; 8] = [
        Metric::KdRatio,
        Metric::Acs,
        Metric::Mvps,
        Metric::FirstKills,
        Metric::Aces,
        Metric::Clutches,
        Metric::HeadshotPct,
        Metric::ImpactScore,
    ];

    /// Column key, matching the exported snapshot field names.
    pub fn key(self) -> &'static str {
        match self {
            Metric::KdRatio => "kd_ratio",
            Metric::Acs => "acs",
            Metric::Mvps => "MVP",
            Metric::FirstKills => "First_kills",
            Metric::Aces => "Ace",
            Metric::Clutches => "clutches",
            Metric::HeadshotPct => "hd",
            Metric::ImpactScore => "impact_score",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::KdRatio => "K/D ratio",
            Metric::Acs => "ACS",
            Metric::Mvps => "match MVPs",
            Metric::FirstKills => "first kills",
            Metric::Aces => "aces",
            Metric::Clutches => "clutches",
            Metric::HeadshotPct => "headshot percentage",
            Metric::ImpactScore => "impact score",
        }
    }

    pub fn value(self, player: &PlayerRecord) -> f64 {
        let stats = player.stats();
        match self {
            Metric::KdRatio => stats.kd_ratio,
            Metric::Acs => stats.acs,
            Metric::Mvps => stats.mvps,
            Metric::FirstKills => stats.first_kills,
            Metric::Aces => stats.aces,
            Metric::Clutches => stats.clutches,
            Metric::HeadshotPct => stats.headshot_pct,
            Metric::ImpactScore => player.impact_score(),
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Metric::KdRatio => &["kd", "k/d", "k/d ratio"],
            Metric::Acs => &[],
            Metric::Mvps => &["mvp", "mvps", "match mvp(s)"],
            Metric::FirstKills => &["kills", "first kills", "first_kill"],
            Metric::Aces => &["aces"],
            Metric::Clutches => &["clutch"],
            Metric::HeadshotPct => &["headshot", "headshot percentage", "hs"],
            Metric::ImpactScore => &["impact"],
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Metric {
    type Err = RosterError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        Metric::ALL
            .into_iter()
            .find(|metric| {
                metric.key().eq_ignore_ascii_case(wanted)
                    || metric
                        .aliases()
                        .iter()
                        .any(|alias| alias.eq_ignore_ascii_case(wanted))
            })
            .ok_or_else(|| RosterError::UnknownMetric(wanted.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopPlayerRow {
    pub name: String,
    pub team: String,
    pub role: Role,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RolePick {
    pub role: Role,
    pub name: String,
    pub team: String,
    pub impact_score: f64,
}

/// Best player per role, in `Role::ALL` order. Roles with nobody are absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TeamComposition {
    pub picks: Vec<RolePick>,
}

impl TeamComposition {
    pub fn get(&self, role: Role) -> Option<&RolePick> {
        self.picks.iter().find(|pick| pick.role == role)
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }
}

/// Read-only player table in load order.
#[derive(Debug, Clone, Default)]
pub struct RosterTable {
    players: Vec<PlayerRecord>,
}

impl RosterTable {
    pub fn new(players: Vec<PlayerRecord>) -> Self {
        Self { players }
    }

    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Parses `metric` by name and returns the top `n` rows for it.
    pub fn get_top_players(
        &self,
        metric: &str,
        n: usize,
    ) -> Result<Vec<TopPlayerRow>, RosterError> {
        let metric = metric.parse::<Metric>()?;
        Ok(self.top_players(metric, n))
    }

    /// Highest `n` values of `metric`, descending. Ties keep load order.
    pub fn top_players(&self, metric: Metric, n: usize) -> Vec<TopPlayerRow> {
        let mut ranked: Vec<(&PlayerRecord, f64)> = self
            .players
            .iter()
            .map(|p| (p, metric.value(p)))
            .collect();
        // `sort_by` is stable.
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked
            .into_iter()
            .take(n)
            .map(|(p, value)| TopPlayerRow {
                name: p.name().to_string(),
                team: p.team().to_string(),
                role: p.role(),
                value,
            })
            .collect()
    }

    pub fn suggest_team_composition(&self) -> TeamComposition {
        let picks = Role::ALL
            .into_iter()
            .filter_map(|role| {
                let mut best: Option<&PlayerRecord> = None;
                for player in self.players.iter().filter(|p| p.role() == role) {
                    match best {
                        Some(current) if player.impact_score() <= current.impact_score() => {}
                        _ => best = Some(player),
                    }
                }
                best.map(|p| RolePick {
                    role,
                    name: p.name().to_string(),
                    team: p.team().to_string(),
                    impact_score: p.impact_score(),
                })
            })
            .collect();
        TeamComposition { picks }
    }
}
