use thiserror::Error;
use uuid::Uuid;

use dermalink_engine::error::EngineError;

#[derive(Debug, Error)]
pub enum ReportError {
    /// The one hard error: no candidate protocols exist anywhere, so not
    /// even a degraded report can be synthesized.
    #[error("catalog unavailable: no candidate protocols exist")]
    CatalogUnavailable,

    #[error("report not found: {id}")]
    NotFound { id: Uuid },

    #[error("storage error: {0}")]
    Storage(#[from] dermalink_storage::error::StorageError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<EngineError> for ReportError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::CatalogUnavailable => ReportError::CatalogUnavailable,
        }
    }
}
