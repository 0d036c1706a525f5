//! Drift-tolerant raw record forms.
//!
//! The knowledge store is edited by clinicians, not engineers: fields come
//! and go, and half-filled rows are normal. Raw forms accept anything with
//! an id and default the rest (pain → Medium, downtime → Low,
//! sessions → 3) before conversion to the canonical core types.

use serde::Deserialize;

use dermalink_core::models::protocol::ProtocolRecord;
use dermalink_core::models::provider::ProviderSolution;
use dermalink_core::models::tolerance::ToleranceLevel;

pub const DEFAULT_PAIN: ToleranceLevel = ToleranceLevel::Medium;
pub const DEFAULT_DOWNTIME: ToleranceLevel = ToleranceLevel::Low;
pub const DEFAULT_SESSIONS: u8 = 3;

#[derive(Debug, Clone, Deserialize)]
pub struct RawProtocolRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pain_level: Option<ToleranceLevel>,
    #[serde(default)]
    pub downtime_level: Option<ToleranceLevel>,
    #[serde(default)]
    pub target_layers: Vec<String>,
    #[serde(default)]
    pub devices: Vec<String>,
    #[serde(default)]
    pub boosters: Vec<String>,
    #[serde(default)]
    pub sessions_total: Option<u8>,
    #[serde(default)]
    pub session_interval_weeks: Option<u8>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub linked_goals: Vec<String>,
}

impl RawProtocolRecord {
    pub fn into_record(self) -> ProtocolRecord {
        let name = self.name.unwrap_or_else(|| self.id.clone());
        ProtocolRecord {
            id: self.id,
            name,
            pain_level: self.pain_level.unwrap_or(DEFAULT_PAIN),
            downtime_level: self.downtime_level.unwrap_or(DEFAULT_DOWNTIME),
            target_layers: self.target_layers,
            devices: self.devices,
            boosters: self.boosters,
            sessions_total: self.sessions_total.unwrap_or(DEFAULT_SESSIONS),
            session_interval_weeks: self.session_interval_weeks,
            notes: self.notes,
            linked_goals: self.linked_goals,
            trending: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawProviderSolution {
    pub id: String,
    #[serde(default)]
    pub provider_id: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub clinic_name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub focus_category: Option<String>,
    #[serde(default)]
    pub devices: Vec<String>,
    #[serde(default)]
    pub boosters: Vec<String>,
    #[serde(default)]
    pub pain_level: Option<ToleranceLevel>,
    #[serde(default)]
    pub downtime_level: Option<ToleranceLevel>,
    #[serde(default)]
    pub price_range: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl RawProviderSolution {
    pub fn into_solution(self) -> ProviderSolution {
        let title = self.title.unwrap_or_else(|| self.id.clone());
        ProviderSolution {
            provider_id: self.provider_id.unwrap_or_default(),
            provider_name: self
                .provider_name
                .unwrap_or_else(|| "Partner Clinic".to_string()),
            clinic_name: self.clinic_name,
            title,
            focus_category: self.focus_category.unwrap_or_default(),
            devices: self.devices,
            boosters: self.boosters,
            pain_level: self.pain_level.unwrap_or(DEFAULT_PAIN),
            downtime_level: self.downtime_level.unwrap_or(DEFAULT_DOWNTIME),
            price_range: self.price_range,
            location: self.location,
            id: self.id,
        }
    }
}
