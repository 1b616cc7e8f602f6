use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::response::MessageResponse;
use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process is serving requests.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the database is reachable.
    pub db_healthy: bool,
}

/// GET / -- liveness banner.
async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Sales Estimation API is running",
    })
}

/// GET /healthz -- liveness plus a store reachability probe.
///
/// The process answers `ok` whenever it can serve the request; store trouble
/// only shows up in `db_healthy`.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = estimation_db::health_check(&state.pool).await.is_ok();
    if !db_healthy {
        tracing::warn!("Health check could not reach the store");
    }

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// Mount liveness and health routes (root level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/healthz", get(health_check))
}
