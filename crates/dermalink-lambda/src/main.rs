use std::env;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

mod error;
mod routes;
mod state;

use dermalink_reports::{Reasoning, ReportService};
use dermalink_storage::s3::S3Store;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging for CloudWatch
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let bucket = env::var("DERMALINK_BUCKET").unwrap_or_else(|_| "dermalink".to_string());
    let store = S3Store::from_env(bucket).await;

    // The reasoning layer is strictly best-effort enrichment: with no model
    // configured, every request takes the deterministic path.
    let reasoning = match env::var("DERMALINK_MODEL_ID") {
        Ok(model_id) if !model_id.is_empty() => {
            tracing::info!(model_id, "reasoning service enabled");
            let client = dermalink_bedrock::client::build_client().await;
            Reasoning::bedrock(client, model_id)
        }
        _ => {
            tracing::info!("no model configured, reasoning service disabled");
            Reasoning::disabled()
        }
    };

    let service = ReportService::new(store.clone(), reasoning.clone());

    let state = AppState {
        service: Arc::new(service),
        store,
        reasoning,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        // Health (no auth)
        .route("/health", get(routes::health::health_check))
        .route("/catalog/inventory", get(routes::inventory::get_inventory))
        .route("/engine/analyze", post(routes::engine::analyze))
        .route("/engine/match", post(routes::engine::match_providers))
        .route("/engine/explain", post(routes::engine::explain))
        .route("/reports/{patient_id}", get(routes::reports::list_reports))
        .route(
            "/reports/{patient_id}/{report_id}",
            get(routes::reports::get_report),
        )
        .layer(cors)
        .with_state(state);

    lambda_http::run(app).await.map_err(|e| eyre::eyre!(e))
}
