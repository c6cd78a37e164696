//! Admin handlers for organization and dataset metadata.
//!
//! Names are unique ignoring case and surrounding whitespace: organizations
//! globally, datasets within their organization. Candidates are compared
//! against the existing names with `naming::is_name_taken` for a readable
//! 409; the unique indexes close the race between concurrent creates.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use biolabel_core::error::CoreError;
use biolabel_core::naming::{is_name_taken, validate_name};
use biolabel_core::types::DbId;
use biolabel_db::models::dataset::{CreateDataset, CreateDatasetRequest};
use biolabel_db::models::organization::OrganizationNameRequest;
use biolabel_db::repositories::{DatasetRepo, OrganizationRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Organizations
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/organizations
pub async fn list_organizations(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let organizations = OrganizationRepo::list(&state.pool).await?;
    Ok(Json(DataResponse {
        data: organizations,
    }))
}

/// POST /api/v1/admin/organizations
pub async fn create_organization(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<OrganizationNameRequest>,
) -> AppResult<impl IntoResponse> {
    let name = validate_name("Organization", &input.name)?;

    let existing = OrganizationRepo::list(&state.pool).await?;
    if is_name_taken(&name, existing.iter().map(|o| o.name.as_str())) {
        return Err(name_taken("Organization", &name));
    }

    let organization = OrganizationRepo::create(&state.pool, &name).await?;

    tracing::info!(
        organization_id = organization.id,
        user_id = admin.user_id,
        "Organization created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: organization }),
    ))
}

/// PUT /api/v1/admin/organizations/{id}
///
/// Rename an organization. A name that only differs from the current one in
/// case or padding is accepted and stored as given.
pub async fn rename_organization(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<OrganizationNameRequest>,
) -> AppResult<impl IntoResponse> {
    let name = validate_name("Organization", &input.name)?;

    let current = OrganizationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Organization", id))?;

    if current.name == name {
        return Ok(Json(DataResponse { data: current }));
    }

    let others = OrganizationRepo::list(&state.pool).await?;
    let other_names = others
        .iter()
        .filter(|o| o.id != id)
        .map(|o| o.name.as_str());
    if is_name_taken(&name, other_names) {
        return Err(name_taken("Organization", &name));
    }

    let organization = OrganizationRepo::rename(&state.pool, id, &name)
        .await?
        .ok_or_else(|| AppError::not_found("Organization", id))?;

    tracing::info!(
        organization_id = id,
        user_id = admin.user_id,
        "Organization renamed"
    );

    Ok(Json(DataResponse { data: organization }))
}

/// DELETE /api/v1/admin/organizations/{id}
///
/// Deletes the organization and its datasets. Records of those datasets are
/// kept but detached.
pub async fn delete_organization(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !OrganizationRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Organization", id));
    }

    tracing::info!(organization_id = id, user_id = admin.user_id, "Organization deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Datasets
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/organizations/{id}/datasets
pub async fn list_datasets(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(organization_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_organization_exists(&state, organization_id).await?;
    let datasets = DatasetRepo::list_for_organization(&state.pool, organization_id).await?;
    Ok(Json(DataResponse { data: datasets }))
}

/// POST /api/v1/admin/organizations/{id}/datasets
pub async fn create_dataset(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(organization_id): Path<DbId>,
    Json(input): Json<CreateDatasetRequest>,
) -> AppResult<impl IntoResponse> {
    let name = validate_name("Dataset", &input.name)?;
    ensure_organization_exists(&state, organization_id).await?;

    let siblings = DatasetRepo::list_for_organization(&state.pool, organization_id).await?;
    if is_name_taken(&name, siblings.iter().map(|d| d.name.as_str())) {
        return Err(name_taken("Dataset", &name));
    }

    let create = CreateDataset {
        organization_id,
        name,
        description: input.description,
    };
    let dataset = DatasetRepo::create(&state.pool, &create).await?;

    tracing::info!(
        dataset_id = dataset.id,
        organization_id,
        user_id = admin.user_id,
        "Dataset created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: dataset })))
}

/// DELETE /api/v1/admin/datasets/{id}
pub async fn delete_dataset(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !DatasetRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Dataset", id));
    }

    tracing::info!(dataset_id = id, user_id = admin.user_id, "Dataset deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_organization_exists(state: &AppState, id: DbId) -> AppResult<()> {
    OrganizationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Organization", id))?;
    Ok(())
}

fn name_taken(entity: &str, name: &str) -> AppError {
    AppError::Core(CoreError::Conflict(format!(
        "{entity} name '{name}' already exists"
    )))
}
