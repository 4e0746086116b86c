use crate::player::PlayerStats;

/// Stat order used by `IMPACT_WEIGHTS_PCT` and `ImpactScorer::breakdown`.
pub const IMPACT_COMPONENT_NAMES: [&str; 7] = [
    "kd_ratio",
    "acs",
    "mvp",
    "first_kills",
    "ace",
    "clutches",
    "headshot",
];

/// Weights in hundredths. Must sum to exactly 100.
pub const IMPACT_WEIGHTS_PCT: [u32; 7] = [20, 20, 15, 15, 10, 10, 10];

const KD_REFERENCE: f64 = 2.0;
const ACS_REFERENCE: f64 = 300.0;
const MVP_REFERENCE: f64 = 10.0;
const FIRST_KILLS_REFERENCE: f64 = 15.0;
const ACE_REFERENCE: f64 = 5.0;
const CLUTCH_REFERENCE: f64 = 10.0;
const HEADSHOT_REFERENCE: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactComponent {
    pub name: &'static str,
    pub normalized: f64,
    /// Contribution on the 0-100 scale (normalized * weight * 100).
    pub points: f64,
}

/// Maps raw player stats to a single 0-100-ish composite.
///
/// K/D, ACS and headshot percentage are divided by their reference values
/// without a cap, so outliers can push the score past 100. The four count
/// stats saturate at their reference.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImpactScorer;

impl ImpactScorer {
    pub fn score(stats: &PlayerStats) -> f64 {
        let raw: f64 = Self::breakdown(stats).iter().map(|c| c.points).sum();
        round2(raw)
    }

    pub fn breakdown(stats: &PlayerStats) -> [ImpactComponent; 7] {
        let normalized = normalize(stats);
        std::array::from_fn(|idx| ImpactComponent {
            name: IMPACT_COMPONENT_NAMES[idx],
            normalized: normalized[idx],
            points: normalized[idx] * IMPACT_WEIGHTS_PCT[idx] as f64,
        })
    }

    pub fn weight(idx: usize) -> Option<f64> {
        IMPACT_WEIGHTS_PCT.get(idx).map(|w| *w as f64 / 100.0)
    }
}

fn normalize(stats: &PlayerStats) -> [f64; 7] {
    [
        stats.kd_ratio / KD_REFERENCE,
        stats.acs / ACS_REFERENCE,
        capped(stats.mvps, MVP_REFERENCE),
        capped(stats.first_kills, FIRST_KILLS_REFERENCE),
        capped(stats.aces, ACE_REFERENCE),
        capped(stats.clutches, CLUTCH_REFERENCE),
        stats.headshot_pct / HEADSHOT_REFERENCE,
    ]
}

fn capped(value: f64, reference: f64) -> f64 {
    (value / reference).min(1.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
