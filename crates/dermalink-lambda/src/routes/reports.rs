use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;

use dermalink_core::models::report::{Report, ReportSummary};

use crate::error::ApiError;
use crate::state::AppState;

/// Report digests for a patient, newest first.
pub async fn list_reports(
    State(state): State<AppState>,
    Path(patient_id): Path<Uuid>,
) -> Result<Json<Vec<ReportSummary>>, ApiError> {
    let summaries = state.service.list_summaries(patient_id).await?;
    Ok(Json(summaries))
}

/// One stored report, with its frozen profile snapshot.
pub async fn get_report(
    State(state): State<AppState>,
    Path((patient_id, report_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Report>, ApiError> {
    let report = state.service.get_report(patient_id, report_id).await?;
    Ok(Json(report))
}
