use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// The one hard failure (catalog unavailable) and the reasoning-only
    /// endpoints when no model is configured.
    ServiceUnavailable(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<dermalink_reports::error::ReportError> for ApiError {
    fn from(e: dermalink_reports::error::ReportError) -> Self {
        use dermalink_reports::error::ReportError;
        match e {
            ReportError::CatalogUnavailable => {
                ApiError::ServiceUnavailable("treatment catalog unavailable".to_string())
            }
            ReportError::NotFound { id } => ApiError::NotFound(format!("report not found: {id}")),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<dermalink_catalog::error::CatalogError> for ApiError {
    fn from(e: dermalink_catalog::error::CatalogError) -> Self {
        use dermalink_catalog::error::CatalogError;
        match e {
            CatalogError::Storage(ref inner) if inner.is_not_found() => {
                ApiError::NotFound("inventory not published".to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<dermalink_bedrock::error::BedrockError> for ApiError {
    fn from(e: dermalink_bedrock::error::BedrockError) -> Self {
        ApiError::ServiceUnavailable(format!("reasoning service unavailable: {e}"))
    }
}

impl From<dermalink_storage::error::StorageError> for ApiError {
    fn from(e: dermalink_storage::error::StorageError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
