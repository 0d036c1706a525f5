//! dermalink-reports
//!
//! The Report Store and its orchestration: tiered lookup over the object
//! store, content-derived cache keys, re-tune snapshots, reasoning
//! delegation with deterministic fallback, and provider-match persistence.

pub mod error;
pub mod matching;
pub mod reasoner;
pub mod service;

pub use reasoner::{RankingReasoner, Reasoning};
pub use service::{ReportService, ScoringRequest};
