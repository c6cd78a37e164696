//! Repository for the `organizations` table.

use biolabel_core::types::DbId;
use sqlx::PgPool;

use crate::models::organization::Organization;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for organizations.
pub struct OrganizationRepo;

impl OrganizationRepo {
    /// Insert a new organization. `name` must already be trimmed.
    pub async fn create(pool: &PgPool, name: &str) -> Result<Organization, sqlx::Error> {
        let query = format!("INSERT INTO organizations (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Organization>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Find an organization by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Organization>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organizations WHERE id = $1");
        sqlx::query_as::<_, Organization>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all organizations ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Organization>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM organizations ORDER BY lower(name) ASC, id ASC");
        sqlx::query_as::<_, Organization>(&query).fetch_all(pool).await
    }

    /// Rename an organization. Returns `None` if no row with `id` exists.
    pub async fn rename(
        pool: &PgPool,
        id: DbId,
        name: &str,
    ) -> Result<Option<Organization>, sqlx::Error> {
        let query =
            format!("UPDATE organizations SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Organization>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Delete an organization and, by cascade, its datasets.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM organizations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
