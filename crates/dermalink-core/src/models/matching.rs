use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A persisted provider-compatibility result, append-only.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MatchResult {
    pub id: Uuid,
    pub report_id: Uuid,
    pub solution_id: String,
    pub provider_name: String,
    pub solution_title: String,
    /// Composite compatibility score, 0–100.
    pub score: u8,
    /// Human-readable satisfied sub-criteria, one per line item.
    pub match_details: Vec<String>,
    pub price_range: Option<String>,
    pub created_at: jiff::Timestamp,
}
