//! Provider matching and match persistence.
//!
//! Scores the roster against a stored report's profile and chosen (rank-1)
//! protocol, persists one append-only [`MatchResult`] per shortlisted
//! offering, and returns the shortlist. Persistence failure is logged and
//! never blocks the response.

use jiff::Timestamp;
use tracing::{info, warn};
use uuid::Uuid;

use dermalink_catalog::loader;
use dermalink_core::models::matching::MatchResult;
use dermalink_core::models::report::Report;
use dermalink_core::store_keys;
use dermalink_engine::provider_match;
use dermalink_storage::{ObjectStore, state};

use crate::error::ReportError;
use crate::reasoner::RankingReasoner;
use crate::service::ReportService;

/// Score the roster for a report and persist the shortlist.
pub async fn match_providers<S: ObjectStore>(store: &S, report: &Report) -> Vec<MatchResult> {
    let Some(top) = report.recommendations.first() else {
        return Vec::new();
    };

    let providers = loader::load_providers(store).await;
    let shortlist = provider_match::shortlist(&report.profile, &top.protocol_name, &providers);

    info!(
        report_id = %report.id,
        chosen_protocol = %top.protocol_name,
        roster = providers.len(),
        shortlisted = shortlist.len(),
        "provider matching complete"
    );

    let created_at = Timestamp::now();
    let mut results = Vec::with_capacity(shortlist.len());

    for scored in shortlist {
        let result = MatchResult {
            id: Uuid::new_v4(),
            report_id: report.id,
            solution_id: scored.solution.id.clone(),
            provider_name: scored.solution.provider_name.clone(),
            solution_title: scored.solution.title.clone(),
            score: scored.score,
            match_details: scored.details,
            price_range: scored.solution.price_range.clone(),
            created_at,
        };

        let key = store_keys::match_result(report.id, &result.solution_id);
        if let Err(e) = state::save_json(store, &key, &result).await {
            warn!(key, error = %e, "match persistence failed, continuing");
        }

        results.push(result);
    }

    results
}

impl<S: ObjectStore, R: RankingReasoner> ReportService<S, R> {
    /// Provider-match request for a stored report.
    pub async fn match_providers(
        &self,
        patient_id: Uuid,
        report_id: Uuid,
    ) -> Result<Vec<MatchResult>, ReportError> {
        let report = self.get_report(patient_id, report_id).await?;
        Ok(match_providers(self.store(), &report).await)
    }
}
