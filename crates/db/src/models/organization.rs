//! Organization model and DTOs.

use biolabel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `organizations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Organization {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating or renaming an organization.
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationNameRequest {
    pub name: String,
}
