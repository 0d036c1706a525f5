//! Catalog snapshot loading.
//!
//! Each collection lives at a well-known key and is fetched fresh per
//! request. Load failures are soft here: a failed fetch yields an empty
//! collection and a log line. Only the report store's synthesize tier turns
//! an entirely empty catalog into a hard error.

use tracing::{info, warn};

use dermalink_core::models::protocol::ProtocolRecord;
use dermalink_core::models::provider::ProviderSolution;
use dermalink_core::models::trends::TrendingKeywords;
use dermalink_core::store_keys;
use dermalink_storage::{ObjectStore, state};

use crate::records::{RawProtocolRecord, RawProviderSolution};

/// Everything the engine needs from the knowledge store, fetched at the
/// start of a request and treated as immutable for its duration.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub protocols: Vec<ProtocolRecord>,
    pub providers: Vec<ProviderSolution>,
    pub trending: TrendingKeywords,
}

impl CatalogSnapshot {
    /// True when no candidates exist anywhere — the one hard-error condition.
    pub fn is_unavailable(&self) -> bool {
        self.protocols.is_empty()
    }
}

/// Fetch the full catalog snapshot. Never fails; empty collections stand in
/// for anything that could not be loaded.
pub async fn load_catalog<S: ObjectStore>(store: &S) -> CatalogSnapshot {
    let protocols = load_protocols(store).await;
    let providers = load_providers(store).await;
    let trending = load_trending(store).await;

    info!(
        protocols = protocols.len(),
        providers = providers.len(),
        trending_version = %trending.version,
        "catalog snapshot loaded"
    );

    CatalogSnapshot {
        protocols,
        providers,
        trending,
    }
}

async fn load_protocols<S: ObjectStore>(store: &S) -> Vec<ProtocolRecord> {
    match state::load_json::<Vec<RawProtocolRecord>, _>(store, store_keys::PROTOCOLS).await {
        Ok(raw) => raw.into_iter().map(RawProtocolRecord::into_record).collect(),
        Err(e) => {
            warn!(error = %e, "protocol catalog load failed, continuing with empty set");
            Vec::new()
        }
    }
}

/// Fetch the provider roster alone. Same empty-on-failure semantics as the
/// full snapshot.
pub async fn load_providers<S: ObjectStore>(store: &S) -> Vec<ProviderSolution> {
    match state::load_json::<Vec<RawProviderSolution>, _>(store, store_keys::PROVIDERS).await {
        Ok(raw) => raw
            .into_iter()
            .map(RawProviderSolution::into_solution)
            .collect(),
        Err(e) => {
            warn!(error = %e, "provider roster load failed, continuing with empty set");
            Vec::new()
        }
    }
}

/// Fetch the versioned trending-keyword list. Failure yields the empty list:
/// rank 2 then falls back to clinical-fit ordering, which is the documented
/// behavior when nothing is trending.
pub async fn load_trending<S: ObjectStore>(store: &S) -> TrendingKeywords {
    match state::load_json::<TrendingKeywords, _>(store, store_keys::TRENDING).await {
        Ok(trending) => trending,
        Err(e) => {
            warn!(error = %e, "trending keywords load failed, continuing without");
            TrendingKeywords::default()
        }
    }
}
