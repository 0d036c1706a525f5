use axum::Json;
use axum::extract::State;

use dermalink_catalog::inventory::{self, Inventory};

use crate::error::ApiError;
use crate::state::AppState;

/// Device inventory, grouped by category for the consultation UI.
pub async fn get_inventory(State(state): State<AppState>) -> Result<Json<Inventory>, ApiError> {
    let inventory = inventory::load_inventory(&state.store).await?;
    Ok(Json(inventory))
}
