use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::models::profile::PatientProfile;
use crate::models::recommendation::RankedRecommendation;

/// How the recommendations of a report were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SourceMode {
    AiAssisted,
    Deterministic,
}

/// A frozen recommendation report.
///
/// The profile snapshot is immutable once the report is written; a re-tune
/// produces a new report with a new id so before/after comparison works.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Report {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub profile: PatientProfile,
    /// Exactly three entries, distinct protocol ids, distinct roles,
    /// strictly descending scores.
    pub recommendations: Vec<RankedRecommendation>,
    pub generated_at: jiff::Timestamp,
    pub source_mode: SourceMode,
    pub cache_key: String,
}

impl Report {
    /// Content-derived cache key: patient identity plus profile-snapshot
    /// identity. Identical answers from the same patient hit the same key.
    pub fn cache_key_for(patient_id: Uuid, profile: &PatientProfile) -> String {
        format!("{patient_id}:{}", profile.fingerprint())
    }
}

/// Dashboard-facing digest of a stored report.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportSummary {
    pub id: Uuid,
    pub generated_at: jiff::Timestamp,
    pub top_recommendation: String,
    pub match_score: u8,
    pub primary_goal: String,
    pub source_mode: SourceMode,
}

impl ReportSummary {
    pub fn of(report: &Report) -> ReportSummary {
        let top = report.recommendations.first();
        ReportSummary {
            id: report.id,
            generated_at: report.generated_at,
            top_recommendation: top.map(|r| r.protocol_name.clone()).unwrap_or_default(),
            match_score: top.map(|r| r.score).unwrap_or_default(),
            primary_goal: report.profile.primary_goal.clone(),
            source_mode: report.source_mode,
        }
    }
}
