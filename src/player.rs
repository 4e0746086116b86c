use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::impact::ImpactScorer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Duelist,
    Controller,
    Sentinel,
    Initiator,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Duelist,
        Role::Controller,
        Role::Sentinel,
        Role::Initiator,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Duelist => "Duelist",
            Role::Controller => "Controller",
            Role::Sentinel => "Sentinel",
            Role::Initiator => "Initiator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}' (expected Duelist, Controller, Sentinel or Initiator)")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownRole(trimmed.to_string()))
    }
}

/// Raw per-player counters as they appear in the source table.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerStats {
    pub kd_ratio: f64,
    pub acs: f64,
    pub mvps: f64,
    pub first_kills: f64,
    pub aces: f64,
    pub clutches: f64,
    /// 0-100 scale.
    pub headshot_pct: f64,
}

/// One roster row. The impact score is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    name: String,
    team: String,
    role: Role,
    stats: PlayerStats,
    impact_score: f64,
}

impl PlayerRecord {
    pub fn new(
        name: impl Into<String>,
        team: impl Into<String>,
        role: Role,
        stats: PlayerStats,
    ) -> Self {
        let impact_score = ImpactScorer::score(&stats);
        Self {
            name: name.into(),
            team: team.into(),
            role,
            stats,
            impact_score,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn team(&self) -> &str {
        &self.team
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn impact_score(&self) -> f64 {
        self.impact_score
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            name: self.name.clone(),
            team: self.team.clone(),
            role: self.role,
            kd_ratio: self.stats.kd_ratio,
            acs: self.stats.acs,
            mvp: self.stats.mvps,
            first_kills: self.stats.first_kills,
            ace: self.stats.aces,
            clutches: self.stats.clutches,
            hd: self.stats.headshot_pct,
            impact_score: self.impact_score,
        }
    }
}

/// Flat record handed to external sinks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub team: String,
    pub role: Role,
    pub kd_ratio: f64,
    pub acs: f64,
    #[serde(rename = "MVP")]
    pub mvp: f64,
    #[serde(rename = "First_kills")]
    pub first_kills: f64,
    #[serde(rename = "Ace")]
    pub ace: f64,
    pub clutches: f64,
    pub hd: f64,
    pub impact_score: f64,
}
