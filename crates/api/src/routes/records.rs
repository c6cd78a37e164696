//! Route definitions for the `/records` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{data_checks, records};
use crate::state::AppState;

/// Routes mounted at `/records`.
///
/// ```text
/// GET    /list              list_unreviewed
/// GET    /{id}              get_record
/// POST   /{id}/feedback     submit_feedback
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/list", get(records::list_unreviewed))
        .route("/{id}", get(records::get_record))
        .route("/{id}/feedback", post(data_checks::submit_feedback))
}
