use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::models::language::{Language, Localized};
use crate::models::profile::BudgetTier;
use crate::models::tolerance::ToleranceLevel;

/// Raw survey payload as submitted by the wizard collaborator.
///
/// Every field is optional: conditional questions are absent when their
/// branch was never shown, and the normalizer must not trust the UI to have
/// enforced anything. Tolerance answers arrive as localized phrases, one
/// slot per survey language.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RawSurveyPayload {
    pub patient_id: Option<Uuid>,
    pub age_band: Option<String>,
    pub gender: Option<String>,
    pub country: Option<String>,
    pub primary_goal: Option<String>,
    pub secondary_goal: Option<String>,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub areas: Vec<String>,
    pub skin_type: Option<String>,
    pub acne_status: Option<String>,
    #[serde(default)]
    pub pigment_type: Vec<String>,
    pub pore_type: Option<String>,
    pub priority_area: Option<String>,
    #[serde(default)]
    pub pain_tolerance: Localized<String>,
    #[serde(default)]
    pub downtime_tolerance: Localized<String>,
    pub budget: Option<BudgetTier>,
    #[serde(default)]
    pub treatment_history: Vec<String>,
    pub language: Option<Language>,
}

/// Re-tune overrides carried on a scoring request. Applying them produces a
/// new profile (and so a new report), never a mutation of the old one.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RetuneOverrides {
    pub pain_tolerance: Option<ToleranceLevel>,
    pub downtime_tolerance: Option<ToleranceLevel>,
}

impl RetuneOverrides {
    pub fn is_empty(&self) -> bool {
        self.pain_tolerance.is_none() && self.downtime_tolerance.is_none()
    }
}
