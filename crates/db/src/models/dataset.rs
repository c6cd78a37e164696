//! Dataset model and DTOs.

use biolabel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `datasets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Dataset {
    pub id: DbId,
    pub organization_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /admin/organizations/{id}/datasets`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDatasetRequest {
    pub name: String,
    pub description: Option<String>,
}

/// DTO for inserting a dataset. `name` is already validated and trimmed.
#[derive(Debug, Clone)]
pub struct CreateDataset {
    pub organization_id: DbId,
    pub name: String,
    pub description: Option<String>,
}
