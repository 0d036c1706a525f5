use std::sync::Arc;

use dermalink_reports::{Reasoning, ReportService};
use dermalink_storage::s3::S3Store;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ReportService<S3Store, Reasoning>>,
    pub store: S3Store,
    pub reasoning: Reasoning,
}
