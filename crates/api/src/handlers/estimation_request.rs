//! Handlers for the `/estimation-requests` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use estimation_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use estimation_core::status::StatusCatalog;
use estimation_core::types::DbId;
use estimation_db::models::estimation_request::{
    CreateEstimationRequest, EstimationRequest, EstimationRequestListParams,
    UpdateEstimationRequest,
};
use estimation_db::repositories::EstimationRequestRepo;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::response::MessageResponse;
use crate::state::AppState;

/// POST /api/estimation-requests
pub async fn create(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateEstimationRequest>,
) -> AppResult<(StatusCode, Json<EstimationRequest>)> {
    warn_if_unlisted_status(&state.catalog, input.status.as_deref());

    let created = EstimationRequestRepo::create(&state.pool, &state.catalog, &input).await?;

    tracing::info!(
        estimation_request_id = created.id,
        status = %created.status,
        "Estimation request created"
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/estimation-requests?skip=&limit=
pub async fn list(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<EstimationRequestListParams>,
) -> AppResult<Json<Vec<EstimationRequest>>> {
    let offset = clamp_offset(params.skip);
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT);

    let requests = EstimationRequestRepo::list(&state.pool, offset, limit).await?;
    Ok(Json(requests))
}

/// GET /api/estimation-requests/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<EstimationRequest>> {
    let request = EstimationRequestRepo::find_by_id(&state.pool, id).await?;
    Ok(Json(request))
}

/// PUT /api/estimation-requests/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(patch): AppJson<UpdateEstimationRequest>,
) -> AppResult<Json<EstimationRequest>> {
    warn_if_unlisted_status(&state.catalog, patch.status.as_deref());

    let updated = EstimationRequestRepo::update(&state.pool, id, &patch).await?;

    tracing::info!(
        estimation_request_id = id,
        status = %updated.status,
        "Estimation request updated"
    );

    Ok(Json(updated))
}

/// DELETE /api/estimation-requests/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    EstimationRequestRepo::delete(&state.pool, id).await?;

    tracing::info!(estimation_request_id = id, "Estimation request deleted");

    Ok(Json(MessageResponse {
        message: "Estimation request deleted successfully",
    }))
}

/// Status is free text; a label outside the catalog is stored as-is but logged.
fn warn_if_unlisted_status(catalog: &StatusCatalog, status: Option<&str>) {
    if let Some(status) = status.filter(|s| !catalog.contains(s)) {
        tracing::warn!(status, "Status is not one of the catalog labels");
    }
}
