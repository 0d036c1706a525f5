use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The externally maintained list of currently popular treatment keywords.
///
/// Injected at call time as a versioned value — never compiled into the
/// ranker — so the catalog team can refresh it independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TrendingKeywords {
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl TrendingKeywords {
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}
