//! Repository for the `datasets` table.

use biolabel_core::types::DbId;
use sqlx::PgPool;

use crate::models::dataset::{CreateDataset, Dataset};

const COLUMNS: &str = "id, organization_id, name, description, created_at, updated_at";

/// Provides CRUD operations for datasets.
pub struct DatasetRepo;

impl DatasetRepo {
    /// Insert a new dataset, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateDataset) -> Result<Dataset, sqlx::Error> {
        let query = format!(
            "INSERT INTO datasets (organization_id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Dataset>(&query)
            .bind(input.organization_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a dataset by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Dataset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM datasets WHERE id = $1");
        sqlx::query_as::<_, Dataset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the datasets of one organization, ordered by name.
    pub async fn list_for_organization(
        pool: &PgPool,
        organization_id: DbId,
    ) -> Result<Vec<Dataset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM datasets
             WHERE organization_id = $1
             ORDER BY lower(name) ASC, id ASC"
        );
        sqlx::query_as::<_, Dataset>(&query)
            .bind(organization_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a dataset. Its records stay, detached. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM datasets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
