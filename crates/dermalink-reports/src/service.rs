//! Report service: tiered lookup and synthesis.
//!
//! Lookup order: (1) report by id, (2) newest stored report whose cache key
//! matches the computed profile snapshot, (3) synthesize from the catalog.
//! Only tier 3 with an empty catalog is a hard error. Concurrent writers
//! for the same key may race; computation is deterministic and idempotent,
//! so last-writer-wins and nothing locks.

use std::time::Duration;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{info, warn};
use ts_rs::TS;
use uuid::Uuid;

use dermalink_bedrock::ranking::{ReasonedRanking, resolve_candidate};
use dermalink_catalog::loader;
use dermalink_core::models::language::Language;
use dermalink_core::models::profile::PatientProfile;
use dermalink_core::models::protocol::ProtocolRecord;
use dermalink_core::models::recommendation::{RankRole, RankedRecommendation};
use dermalink_core::models::report::{Report, ReportSummary, SourceMode};
use dermalink_core::models::survey::{RawSurveyPayload, RetuneOverrides};
use dermalink_core::store_keys;
use dermalink_engine::ranker::{self, RankerConfig};
use dermalink_engine::{filter, normalize};
use dermalink_storage::{ObjectStore, state};

use crate::error::ReportError;
use crate::reasoner::RankingReasoner;

/// Ceiling on the optional reasoning call; the deterministic path takes
/// over when it elapses.
pub const DEFAULT_REASONING_TIMEOUT: Duration = Duration::from_secs(12);

/// Inbound scoring request: a canonical profile or a raw survey payload,
/// plus optional re-tune overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoringRequest {
    pub patient_id: Option<Uuid>,
    pub report_id: Option<Uuid>,
    pub profile: Option<PatientProfile>,
    pub survey: Option<RawSurveyPayload>,
    #[serde(default)]
    pub overrides: RetuneOverrides,
    #[serde(default)]
    pub force_refresh: bool,
    pub language: Option<Language>,
}

pub struct ReportService<S, R> {
    store: S,
    reasoner: R,
    config: RankerConfig,
    reasoning_timeout: Duration,
}

impl<S: ObjectStore, R: RankingReasoner> ReportService<S, R> {
    pub fn new(store: S, reasoner: R) -> Self {
        ReportService {
            store,
            reasoner,
            config: RankerConfig::default(),
            reasoning_timeout: DEFAULT_REASONING_TIMEOUT,
        }
    }

    pub fn with_config(mut self, config: RankerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_reasoning_timeout(mut self, reasoning_timeout: Duration) -> Self {
        self.reasoning_timeout = reasoning_timeout;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Tiered lookup; falls through to synthesis. A force-refresh or
    /// re-tune request skips both cache tiers and always writes a new
    /// report snapshot.
    pub async fn get_or_generate(&self, request: &ScoringRequest) -> Result<Report, ReportError> {
        let mut profile = self.resolve_profile(request);
        let patient_id = request.patient_id.unwrap_or(profile.id);
        profile.id = patient_id;

        let retune = !request.overrides.is_empty();
        if retune {
            profile = normalize::apply_overrides(&profile, &request.overrides);
        }
        let force = request.force_refresh || retune;
        let cache_key = Report::cache_key_for(patient_id, &profile);

        // Tier 1: direct report by id.
        if !force && let Some(report_id) = request.report_id {
            let key = store_keys::report(patient_id, report_id);
            match state::load_json::<Report, _>(&self.store, &key).await {
                Ok(report) => {
                    info!(%report_id, tier = 1, "report served from store");
                    return Ok(report);
                }
                Err(e) if e.is_not_found() => {
                    info!(%report_id, "report id missed, falling through");
                }
                Err(e) => {
                    warn!(error = %e, "tier-1 lookup failed, falling through");
                }
            }
        }

        // Tier 2: newest stored report with the same content key.
        if !force && let Some(report) = self.newest_matching(patient_id, &cache_key).await {
            info!(report_id = %report.id, tier = 2, "report served by cache key");
            return Ok(report);
        }

        // Tier 3: synthesize fresh from the catalog.
        self.synthesize(patient_id, profile, cache_key).await
    }

    /// Load a stored report directly.
    pub async fn get_report(&self, patient_id: Uuid, report_id: Uuid) -> Result<Report, ReportError> {
        let key = store_keys::report(patient_id, report_id);
        state::load_json(&self.store, &key).await.map_err(|e| {
            if e.is_not_found() {
                ReportError::NotFound { id: report_id }
            } else {
                ReportError::Storage(e)
            }
        })
    }

    /// Dashboard digest of every stored report for a patient, newest first.
    pub async fn list_summaries(&self, patient_id: Uuid) -> Result<Vec<ReportSummary>, ReportError> {
        let reports = self.load_patient_reports(patient_id).await?;
        let mut summaries: Vec<ReportSummary> = reports.iter().map(ReportSummary::of).collect();
        summaries.sort_by(|a, b| b.generated_at.cmp(&a.generated_at));
        Ok(summaries)
    }

    fn resolve_profile(&self, request: &ScoringRequest) -> PatientProfile {
        if let Some(profile) = &request.profile {
            return profile.clone();
        }
        // No canonical profile: normalize whatever survey data exists.
        // A missing payload still yields a fully defaulted profile — this
        // is an advisory tool, not a validator.
        let empty = RawSurveyPayload::default();
        let survey = request.survey.as_ref().unwrap_or(&empty);
        normalize::normalize_survey(survey, request.language)
    }

    async fn newest_matching(&self, patient_id: Uuid, cache_key: &str) -> Option<Report> {
        let reports = match self.load_patient_reports(patient_id).await {
            Ok(reports) => reports,
            Err(e) => {
                warn!(error = %e, "tier-2 listing failed, falling through");
                return None;
            }
        };

        reports
            .into_iter()
            .filter(|r| r.cache_key == cache_key)
            .max_by_key(|r| r.generated_at)
    }

    async fn load_patient_reports(&self, patient_id: Uuid) -> Result<Vec<Report>, ReportError> {
        let keys = self
            .store
            .list_keys(&store_keys::patient_reports_prefix(patient_id))
            .await?;

        let mut reports = Vec::with_capacity(keys.len());
        for key in &keys {
            match state::load_json::<Report, _>(&self.store, key).await {
                Ok(report) => reports.push(report),
                Err(e) => warn!(key, error = %e, "skipping unreadable report object"),
            }
        }
        Ok(reports)
    }

    async fn synthesize(
        &self,
        patient_id: Uuid,
        profile: PatientProfile,
        cache_key: String,
    ) -> Result<Report, ReportError> {
        let catalog = loader::load_catalog(&self.store).await;
        if catalog.is_unavailable() {
            return Err(ReportError::CatalogUnavailable);
        }

        // The reasoning service sees exactly the filtered,
        // trending-annotated candidate list the deterministic ranker would
        // consider for its top slots.
        let annotated = ranker::annotate_trending(&catalog.protocols, &catalog.trending);
        let outcome = filter::apply(&profile, &annotated);
        let candidates: Vec<ProtocolRecord> = outcome
            .pool
            .iter()
            .map(|&idx| annotated[idx].clone())
            .collect();

        let (recommendations, source_mode) = match self.reasoned(&profile, &candidates).await {
            Some(recommendations) => (recommendations, SourceMode::AiAssisted),
            None => {
                let recommendations = dermalink_engine::rank(
                    &profile,
                    &catalog.protocols,
                    &catalog.trending,
                    &self.config,
                )?;
                (recommendations, SourceMode::Deterministic)
            }
        };

        let report = Report {
            id: Uuid::new_v4(),
            patient_id,
            profile,
            recommendations,
            generated_at: Timestamp::now(),
            source_mode,
            cache_key,
        };

        // Fire-and-forget: persistence failure is logged, never surfaced.
        let key = store_keys::report(patient_id, report.id);
        if let Err(e) = state::save_json(&self.store, &key, &report).await {
            warn!(error = %e, "report persistence failed, returning unpersisted result");
        }

        Ok(report)
    }

    /// Best-effort reasoning delegation. Every failure mode — disabled,
    /// timeout, invocation error, fabricated candidates — returns `None`
    /// and the deterministic path takes over as the system of record.
    async fn reasoned(
        &self,
        profile: &PatientProfile,
        candidates: &[ProtocolRecord],
    ) -> Option<Vec<RankedRecommendation>> {
        if !self.reasoner.enabled() || candidates.is_empty() {
            return None;
        }

        match timeout(self.reasoning_timeout, self.reasoner.rank(profile, candidates)).await {
            Ok(Ok(ranking)) => match self.from_reasoned(&ranking, candidates) {
                Some(recommendations) => Some(recommendations),
                None => {
                    warn!("reasoned ranking referenced unknown or duplicate candidates, using deterministic path");
                    None
                }
            },
            Ok(Err(e)) => {
                warn!(error = %e, "reasoning service failed, using deterministic path");
                None
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.reasoning_timeout.as_secs(),
                    "reasoning service timed out, using deterministic path"
                );
                None
            }
        }
    }

    /// Map an accepted reasoned ranking onto the response contract,
    /// re-imposing the score invariants (clamp, rank-1 floor, minimum
    /// gaps) that the model was asked for but is never trusted to honor.
    fn from_reasoned(
        &self,
        ranking: &ReasonedRanking,
        candidates: &[ProtocolRecord],
    ) -> Option<Vec<RankedRecommendation>> {
        let records = [
            resolve_candidate(&ranking.rank1, candidates)?,
            resolve_candidate(&ranking.rank2, candidates)?,
            resolve_candidate(&ranking.rank3, candidates)?,
        ];
        if records[0].id == records[1].id
            || records[1].id == records[2].id
            || records[0].id == records[2].id
        {
            return None;
        }

        let c = &self.config;
        let clamp = |score: u8| score.clamp(c.score_min, c.score_max);
        let s1 = clamp(ranking.rank1.score).max(c.rank1_floor);
        let s2 = clamp(ranking.rank2.score)
            .min(s1 - c.gap1)
            .max(c.score_min + c.gap2);
        let s3 = clamp(ranking.rank3.score).min(s2 - c.gap2);
        let scores = [s1, s2, s3];

        Some(
            ranking
                .ranks()
                .iter()
                .zip(records)
                .zip(scores)
                .enumerate()
                .map(|(i, ((reasoned, record), score))| {
                    let rank = (i + 1) as u8;
                    RankedRecommendation {
                        protocol_id: record.id.clone(),
                        protocol_name: record.name.clone(),
                        rank,
                        role: RankRole::for_rank(rank),
                        score,
                        rationale: reasoned.reason.clone(),
                        devices: record.devices.clone(),
                        boosters: record.boosters.clone(),
                        pain_level: record.pain_level,
                        downtime_level: record.downtime_level,
                        sessions_total: record.sessions_total,
                    }
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use dermalink_bedrock::error::BedrockError;
    use dermalink_bedrock::ranking::ReasonedRank;
    use dermalink_core::models::tolerance::ToleranceLevel;
    use dermalink_storage::memory::MemoryStore;

    use super::*;

    /// Reasoner that always fails enabled(), forcing the deterministic path.
    struct NoReasoner;

    impl RankingReasoner for NoReasoner {
        fn enabled(&self) -> bool {
            false
        }

        async fn rank(
            &self,
            _profile: &PatientProfile,
            _candidates: &[ProtocolRecord],
        ) -> Result<ReasonedRanking, BedrockError> {
            unreachable!("disabled reasoner must never be invoked")
        }
    }

    /// Reasoner returning a canned response.
    struct CannedReasoner {
        names: [&'static str; 3],
    }

    impl RankingReasoner for CannedReasoner {
        fn enabled(&self) -> bool {
            true
        }

        async fn rank(
            &self,
            _profile: &PatientProfile,
            _candidates: &[ProtocolRecord],
        ) -> Result<ReasonedRanking, BedrockError> {
            let slot = |name: &str, score: u8| ReasonedRank {
                protocol: name.to_string(),
                score,
                reason: format!("Clinically, {name} suits this profile."),
                pain: None,
                downtime: None,
            };
            Ok(ReasonedRanking {
                rank1: slot(self.names[0], 95),
                rank2: slot(self.names[1], 90),
                rank3: slot(self.names[2], 82),
            })
        }
    }

    /// Reasoner that always errors.
    struct FailingReasoner;

    impl RankingReasoner for FailingReasoner {
        fn enabled(&self) -> bool {
            true
        }

        async fn rank(
            &self,
            _profile: &PatientProfile,
            _candidates: &[ProtocolRecord],
        ) -> Result<ReasonedRanking, BedrockError> {
            Err(BedrockError::Invocation("throttled".to_string()))
        }
    }

    async fn seed_catalog(store: &MemoryStore) {
        store
            .put_object(
                store_keys::PROTOCOLS,
                br#"[
                    {"id": "p1", "name": "Ulthera Deep Lifting", "pain_level": "medium", "downtime_level": "low", "linked_goals": ["lifting"], "devices": ["Ulthera"]},
                    {"id": "p2", "name": "Oligio Firming", "pain_level": "low", "downtime_level": "low", "linked_goals": ["lifting"]},
                    {"id": "p3", "name": "Rejuran Healer", "pain_level": "medium", "downtime_level": "low", "boosters": ["Rejuran"]},
                    {"id": "p4", "name": "Pico Toning", "pain_level": "low", "downtime_level": "none"},
                    {"id": "p5", "name": "Fraxel Resurfacing", "pain_level": "high", "downtime_level": "high"}
                ]"#
                .to_vec(),
            )
            .await
            .unwrap();
        store
            .put_object(
                store_keys::TRENDING,
                br#"{"version": "2026-08", "keywords": ["rejuran"]}"#.to_vec(),
            )
            .await
            .unwrap();
    }

    fn request(patient_id: Uuid) -> ScoringRequest {
        let survey = RawSurveyPayload {
            patient_id: Some(patient_id),
            primary_goal: Some("lifting".to_string()),
            ..Default::default()
        };
        ScoringRequest {
            patient_id: Some(patient_id),
            survey: Some(survey),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn synthesizes_and_persists_deterministic_report() {
        let store = MemoryStore::new();
        seed_catalog(&store).await;
        let service = ReportService::new(store.clone(), NoReasoner);
        let patient = Uuid::new_v4();

        let report = service.get_or_generate(&request(patient)).await.unwrap();

        assert_eq!(report.source_mode, SourceMode::Deterministic);
        assert_eq!(report.recommendations.len(), 3);
        assert_eq!(report.patient_id, patient);
        assert!(store.contains(&store_keys::report(patient, report.id)));
    }

    #[tokio::test]
    async fn second_identical_request_hits_the_cache_key_tier() {
        let store = MemoryStore::new();
        seed_catalog(&store).await;
        let service = ReportService::new(store, NoReasoner);
        let patient = Uuid::new_v4();

        let first = service.get_or_generate(&request(patient)).await.unwrap();
        let second = service.get_or_generate(&request(patient)).await.unwrap();

        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn report_id_lookup_is_tier_one() {
        let store = MemoryStore::new();
        seed_catalog(&store).await;
        let service = ReportService::new(store, NoReasoner);
        let patient = Uuid::new_v4();

        let generated = service.get_or_generate(&request(patient)).await.unwrap();

        let mut by_id = request(patient);
        by_id.report_id = Some(generated.id);
        // Different answers would compute a different cache key; tier 1
        // still serves the stored snapshot.
        by_id.survey.as_mut().unwrap().primary_goal = Some("volume".to_string());

        let fetched = service.get_or_generate(&by_id).await.unwrap();
        assert_eq!(fetched.id, generated.id);
    }

    #[tokio::test]
    async fn force_refresh_always_writes_a_new_snapshot() {
        let store = MemoryStore::new();
        seed_catalog(&store).await;
        let service = ReportService::new(store, NoReasoner);
        let patient = Uuid::new_v4();

        let first = service.get_or_generate(&request(patient)).await.unwrap();
        let mut refresh = request(patient);
        refresh.force_refresh = true;
        let second = service.get_or_generate(&refresh).await.unwrap();

        assert_ne!(first.id, second.id);
        // Same answers, same key: both snapshots share the cache key.
        assert_eq!(first.cache_key, second.cache_key);
    }

    #[tokio::test]
    async fn retune_creates_a_new_report_and_keeps_history() {
        let store = MemoryStore::new();
        seed_catalog(&store).await;
        let service = ReportService::new(store, NoReasoner);
        let patient = Uuid::new_v4();

        let before = service.get_or_generate(&request(patient)).await.unwrap();

        let mut retune = request(patient);
        retune.overrides = RetuneOverrides {
            pain_tolerance: Some(ToleranceLevel::VeryHigh),
            downtime_tolerance: None,
        };
        let after = service.get_or_generate(&retune).await.unwrap();

        assert_ne!(before.id, after.id);
        assert_ne!(before.cache_key, after.cache_key);
        assert_eq!(after.profile.pain_tolerance, ToleranceLevel::VeryHigh);
        // The original snapshot is untouched for before/after comparison.
        let stored_before = service.get_report(patient, before.id).await.unwrap();
        assert_eq!(stored_before.profile.pain_tolerance, before.profile.pain_tolerance);

        let summaries = service.list_summaries(patient).await.unwrap();
        assert_eq!(summaries.len(), 2);
    }

    #[tokio::test]
    async fn empty_catalog_is_the_only_hard_error() {
        let store = MemoryStore::new();
        let service = ReportService::new(store, NoReasoner);

        let err = service
            .get_or_generate(&request(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::CatalogUnavailable));
    }

    #[tokio::test]
    async fn accepted_reasoning_marks_report_ai_assisted() {
        let store = MemoryStore::new();
        seed_catalog(&store).await;
        let service = ReportService::new(
            store,
            CannedReasoner {
                names: ["Ulthera Deep Lifting", "Rejuran Healer", "Pico Toning"],
            },
        );

        let report = service
            .get_or_generate(&request(Uuid::new_v4()))
            .await
            .unwrap();

        assert_eq!(report.source_mode, SourceMode::AiAssisted);
        assert_eq!(report.recommendations[0].protocol_id, "p1");
        assert!(report.recommendations[0].rationale.contains("Ulthera"));
        // Invariants are re-imposed on model scores.
        assert!(report.recommendations[0].score >= 88);
        assert!(report.recommendations[0].score >= report.recommendations[1].score + 3);
        assert!(report.recommendations[1].score >= report.recommendations[2].score + 2);
    }

    #[tokio::test]
    async fn fabricated_candidate_falls_back_to_deterministic() {
        let store = MemoryStore::new();
        seed_catalog(&store).await;
        let service = ReportService::new(
            store,
            CannedReasoner {
                names: ["Ulthera Deep Lifting", "Miracle Laser 3000", "Pico Toning"],
            },
        );

        let report = service
            .get_or_generate(&request(Uuid::new_v4()))
            .await
            .unwrap();

        assert_eq!(report.source_mode, SourceMode::Deterministic);
        assert_eq!(report.recommendations.len(), 3);
    }

    #[tokio::test]
    async fn reasoning_error_falls_back_to_deterministic() {
        let store = MemoryStore::new();
        seed_catalog(&store).await;
        let service = ReportService::new(store, FailingReasoner);

        let report = service
            .get_or_generate(&request(Uuid::new_v4()))
            .await
            .unwrap();

        assert_eq!(report.source_mode, SourceMode::Deterministic);
        assert_eq!(report.recommendations.len(), 3);
    }

    #[tokio::test]
    async fn missing_report_id_maps_to_not_found() {
        let store = MemoryStore::new();
        seed_catalog(&store).await;
        let service = ReportService::new(store, NoReasoner);

        let missing = Uuid::new_v4();
        let err = service.get_report(Uuid::new_v4(), missing).await.unwrap_err();
        assert!(matches!(err, ReportError::NotFound { id } if id == missing));
    }
}
