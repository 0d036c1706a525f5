use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::tolerance::ToleranceLevel;

/// Fixed semantic role of each output slot, independent of raw score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RankRole {
    /// Best clinical alignment with the declared goal and tolerances.
    ClinicalFit,
    /// Drawn from the currently popular treatment keywords when possible.
    TrendingMatch,
    /// Deliberately one step beyond the declared ceiling — aspirational.
    StretchGoal,
}

impl RankRole {
    /// Role assigned to a given rank (1–3).
    pub fn for_rank(rank: u8) -> RankRole {
        match rank {
            1 => RankRole::ClinicalFit,
            2 => RankRole::TrendingMatch,
            _ => RankRole::StretchGoal,
        }
    }
}

/// One of the three ranked slots of a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RankedRecommendation {
    pub protocol_id: String,
    pub protocol_name: String,
    pub rank: u8,
    pub role: RankRole,
    /// Clamped to [60, 99]; rank 1 additionally floored at the configured
    /// confidence floor.
    pub score: u8,
    pub rationale: String,
    /// Composition snapshot at generation time — the catalog may change
    /// after the report is frozen.
    pub devices: Vec<String>,
    pub boosters: Vec<String>,
    pub pain_level: ToleranceLevel,
    pub downtime_level: ToleranceLevel,
    pub sessions_total: u8,
}
