//! Route definitions for the `/admin` resource (admin role only).

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{admin, records};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /organizations                 list_organizations
/// POST   /organizations                 create_organization
/// PUT    /organizations/{id}            rename_organization
/// DELETE /organizations/{id}            delete_organization
/// GET    /organizations/{id}/datasets   list_datasets
/// POST   /organizations/{id}/datasets   create_dataset
/// DELETE /datasets/{id}                 delete_dataset
/// POST   /records                       ingest_records
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/organizations",
            get(admin::list_organizations).post(admin::create_organization),
        )
        .route(
            "/organizations/{id}",
            put(admin::rename_organization).delete(admin::delete_organization),
        )
        .route(
            "/organizations/{id}/datasets",
            get(admin::list_datasets).post(admin::create_dataset),
        )
        .route("/datasets/{id}", delete(admin::delete_dataset))
        .route("/records", post(records::ingest_records))
}
