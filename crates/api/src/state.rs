use std::sync::Arc;

use estimation_core::status::StatusCatalog;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool is reference-counted internally and the
/// catalog sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Backing store for estimation requests.
    pub pool: estimation_db::DbPool,
    /// Workflow status labels offered to clients.
    pub catalog: Arc<StatusCatalog>,
}
