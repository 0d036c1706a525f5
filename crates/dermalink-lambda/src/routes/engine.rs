use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dermalink_bedrock::explain::DeviceExplanation;
use dermalink_catalog::inventory;
use dermalink_core::models::language::Language;
use dermalink_core::models::matching::MatchResult;
use dermalink_core::models::report::Report;
use dermalink_core::models::profile::PatientProfile;
use dermalink_core::models::survey::RawSurveyPayload;
use dermalink_engine::normalize;
use dermalink_reports::ScoringRequest;

use crate::error::ApiError;
use crate::state::AppState;

/// Scoring request: returns the full report (exactly three ranked
/// recommendations) for a profile or raw survey payload.
pub async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<ScoringRequest>,
) -> Result<Json<Report>, ApiError> {
    let report = state.service.get_or_generate(&request).await?;
    Ok(Json(report))
}

#[derive(Deserialize)]
pub struct MatchRequest {
    pub patient_id: Uuid,
    pub report_id: Uuid,
}

#[derive(Serialize)]
pub struct MatchResponse {
    pub matches: Vec<MatchResult>,
}

/// Provider-match request for a stored report.
pub async fn match_providers(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, ApiError> {
    let matches = state
        .service
        .match_providers(request.patient_id, request.report_id)
        .await?;
    Ok(Json(MatchResponse { matches }))
}

#[derive(Deserialize)]
pub struct ExplainRequest {
    pub device_name: String,
    pub profile: Option<PatientProfile>,
    pub survey: Option<RawSurveyPayload>,
    pub language: Option<Language>,
}

/// "Why is this device not my top recommendation?" — constrained to a named
/// inventory device.
pub async fn explain(
    State(state): State<AppState>,
    Json(request): Json<ExplainRequest>,
) -> Result<Json<DeviceExplanation>, ApiError> {
    let profile = match request.profile {
        Some(profile) => profile,
        None => normalize::normalize_survey(
            &request.survey.unwrap_or_default(),
            request.language,
        ),
    };

    let device = inventory::find_device(&state.store, &request.device_name)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("device not found: {}", request.device_name)))?;

    let explanation = state
        .reasoning
        .explain(&profile, &device.name, device.description.as_deref())
        .await?;

    Ok(Json(explanation))
}
