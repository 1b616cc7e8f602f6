pub mod estimation_request;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /status-options                       status catalog (GET)
///
/// /estimation-requests                  list, create
/// /estimation-requests/{id}             get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/status-options", get(handlers::status_options::list))
        .nest("/estimation-requests", estimation_request::router())
}
