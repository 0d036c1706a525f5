use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::tolerance::ToleranceLevel;

/// A provider-authored treatment offering ("signature solution").
///
/// Externally owned and read-only within this core, like [`ProtocolRecord`].
///
/// [`ProtocolRecord`]: crate::models::protocol::ProtocolRecord
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProviderSolution {
    pub id: String,
    pub provider_id: String,
    pub provider_name: String,
    pub clinic_name: Option<String>,
    pub title: String,
    /// The concern this offering targets, e.g. "lifting" or "texture".
    pub focus_category: String,
    pub devices: Vec<String>,
    pub boosters: Vec<String>,
    /// Pain the patient must be able to tolerate for this offering.
    pub pain_level: ToleranceLevel,
    pub downtime_level: ToleranceLevel,
    pub price_range: Option<String>,
    pub location: Option<String>,
}
