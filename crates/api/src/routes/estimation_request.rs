//! Route definitions for estimation requests.
//!
//! Mounted at `/estimation-requests` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::estimation_request;
use crate::state::AppState;

/// Estimation request routes.
///
/// ```text
/// POST   /        -> create
/// GET    /        -> list (?skip=&limit=)
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(estimation_request::list).post(estimation_request::create),
        )
        .route(
            "/{id}",
            get(estimation_request::get_by_id)
                .put(estimation_request::update)
                .delete(estimation_request::delete),
        )
}
