use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// No candidate protocols exist anywhere — the one hard-error condition
    /// in the pipeline. Every other degradation produces a ranking anyway.
    #[error("catalog unavailable: no candidate protocols exist")]
    CatalogUnavailable,
}
