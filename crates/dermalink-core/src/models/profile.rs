use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::fingerprint;
use crate::models::language::Language;
use crate::models::tolerance::ToleranceLevel;

/// Budget tier declared in the survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum BudgetTier {
    Economy,
    Standard,
    Premium,
}

impl Default for BudgetTier {
    fn default() -> Self {
        BudgetTier::Standard
    }
}

/// Canonical patient profile produced by the normalizer.
///
/// Immutable once frozen into a report: a re-tune builds a new profile value
/// (and therefore a new report) rather than mutating this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientProfile {
    pub id: Uuid,
    pub age_band: Option<String>,
    pub gender: Option<String>,
    pub country: Option<String>,
    pub primary_goal: String,
    pub secondary_goal: Option<String>,
    pub risks: Vec<String>,
    pub areas: Vec<String>,
    pub skin_type: Option<String>,
    pub acne_status: Option<String>,
    pub pigment_pattern: Vec<String>,
    pub pore_type: Option<String>,
    pub priority_area: Option<String>,
    pub pain_tolerance: ToleranceLevel,
    pub downtime_tolerance: ToleranceLevel,
    pub budget: BudgetTier,
    pub treatment_history: Vec<String>,
    pub language: Language,
}

impl PatientProfile {
    /// Stable content hash over every answer that influences ranking.
    ///
    /// Two profiles with identical answers fingerprint identically even
    /// across process restarts; the report cache key is derived from this.
    pub fn fingerprint(&self) -> String {
        let mut canonical = String::new();
        let mut push = |part: &str| {
            canonical.push_str(part);
            canonical.push('\u{1f}');
        };

        push(self.age_band.as_deref().unwrap_or(""));
        push(self.gender.as_deref().unwrap_or(""));
        push(self.country.as_deref().unwrap_or(""));
        push(&self.primary_goal);
        push(self.secondary_goal.as_deref().unwrap_or(""));
        for risk in &self.risks {
            push(risk);
        }
        push("|");
        for area in &self.areas {
            push(area);
        }
        push("|");
        push(self.skin_type.as_deref().unwrap_or(""));
        push(self.acne_status.as_deref().unwrap_or(""));
        for pattern in &self.pigment_pattern {
            push(pattern);
        }
        push("|");
        push(self.pore_type.as_deref().unwrap_or(""));
        push(self.priority_area.as_deref().unwrap_or(""));
        push(&self.pain_tolerance.index().to_string());
        push(&self.downtime_tolerance.index().to_string());
        push(match self.budget {
            BudgetTier::Economy => "economy",
            BudgetTier::Standard => "standard",
            BudgetTier::Premium => "premium",
        });
        for item in &self.treatment_history {
            push(item);
        }
        push("|");
        push(self.language.code());

        fingerprint::fnv1a64_hex(canonical.as_bytes())
    }
}
