//! Handler for the workflow status catalog.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusOptionsResponse {
    pub status_options: Vec<String>,
}

/// GET /api/status-options
pub async fn list(State(state): State<AppState>) -> Json<StatusOptionsResponse> {
    Json(StatusOptionsResponse {
        status_options: state.catalog.options().to_vec(),
    })
}
