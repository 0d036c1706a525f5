use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::tolerance::ToleranceLevel;

/// A treatment protocol from the knowledge store.
///
/// Externally owned and read-only within this core; refreshed per request.
/// Identifiers are the knowledge store's record ids, not UUIDs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProtocolRecord {
    pub id: String,
    pub name: String,
    pub pain_level: ToleranceLevel,
    pub downtime_level: ToleranceLevel,
    pub target_layers: Vec<String>,
    pub devices: Vec<String>,
    pub boosters: Vec<String>,
    pub sessions_total: u8,
    pub session_interval_weeks: Option<u8>,
    pub notes: Option<String>,
    /// Goal labels this protocol is explicitly linked to in the knowledge
    /// store (indication map).
    pub linked_goals: Vec<String>,
    /// Derived per request from the injected trending-keyword list.
    #[serde(default)]
    pub trending: bool,
}

impl ProtocolRecord {
    /// Case-insensitive check whether any of name/devices/boosters contains
    /// the given keyword.
    pub fn mentions(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        if self.name.to_lowercase().contains(&needle) {
            return true;
        }
        self.devices
            .iter()
            .chain(self.boosters.iter())
            .any(|entry| entry.to_lowercase().contains(&needle))
    }
}
