//! Route definitions for the `/data-checks` resource (review history).

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::data_checks;
use crate::state::AppState;

/// Routes mounted at `/data-checks`.
///
/// ```text
/// GET    /                  list_history
/// GET    /stats             history_stats
/// PUT    /{id}              update_data_check
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(data_checks::list_history))
        .route("/stats", get(data_checks::history_stats))
        .route("/{id}", put(data_checks::update_data_check))
}
