pub mod admin;
pub mod data_checks;
pub mod health;
pub mod records;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /records/list                          random page of unreviewed records
/// /records/{id}                          record with its decisions
/// /records/{id}/feedback                 submit or update own decision (POST)
///
/// /data-checks                           own review history
/// /data-checks/stats                     own decision counts per choice
/// /data-checks/{id}                      amend own decision (PUT)
///
/// /fragments/series                      fragment -> chart series (POST)
///
/// /admin/organizations                   list, create (admin only)
/// /admin/organizations/{id}              rename, delete
/// /admin/organizations/{id}/datasets     list, create
/// /admin/datasets/{id}                   delete
/// /admin/records                         ingest records (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/records", records::router())
        .nest("/data-checks", data_checks::router())
        .route(
            "/fragments/series",
            post(handlers::fragments::fragment_series),
        )
        .nest("/admin", admin::router())
}
