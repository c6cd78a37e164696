//! Repository for the `data_checks` table.

use biolabel_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::data_check::{
    ChoiceCount, DataCheck, DataCheckHistoryItem, UpsertDataCheck, UpsertedDataCheck,
};

/// Column list for data_checks queries.
const COLUMNS: &str =
    "id, record_id, user_id, choice, rhythm, quality, comment, created_at, updated_at";

/// Provides upsert and read operations for review decisions.
pub struct DataCheckRepo;

impl DataCheckRepo {
    /// Create or update the decision for `(record_id, user_id)`.
    ///
    /// On conflict only the non-`None` fields of `input` overwrite the stored
    /// row. `inserted` is `true` when the row did not exist before.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertDataCheck,
    ) -> Result<UpsertedDataCheck, sqlx::Error> {
        let query = format!(
            "INSERT INTO data_checks (record_id, user_id, choice, rhythm, quality, comment)
             VALUES ($1, $2, COALESCE($3, 'unknown'), $4, $5, $6)
             ON CONFLICT (record_id, user_id) DO UPDATE SET
                choice = COALESCE($3, data_checks.choice),
                rhythm = COALESCE(EXCLUDED.rhythm, data_checks.rhythm),
                quality = COALESCE(EXCLUDED.quality, data_checks.quality),
                comment = COALESCE(EXCLUDED.comment, data_checks.comment)
             RETURNING {COLUMNS}, (xmax = 0) AS inserted"
        );
        sqlx::query_as::<_, UpsertedDataCheck>(&query)
            .bind(input.record_id)
            .bind(input.user_id)
            .bind(&input.choice)
            .bind(input.rhythm)
            .bind(input.quality)
            .bind(&input.comment)
            .fetch_one(pool)
            .await
    }

    /// Amend a decision by id, scoped to its owner.
    ///
    /// Returns `None` when the row does not exist or belongs to another user.
    pub async fn update_own(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpsertDataCheck,
    ) -> Result<Option<DataCheck>, sqlx::Error> {
        let query = format!(
            "UPDATE data_checks SET
                choice = COALESCE($3, choice),
                rhythm = COALESCE($4, rhythm),
                quality = COALESCE($5, quality),
                comment = COALESCE($6, comment)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DataCheck>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.choice)
            .bind(input.rhythm)
            .bind(input.quality)
            .bind(&input.comment)
            .fetch_optional(pool)
            .await
    }

    /// Find a decision by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<DataCheck>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM data_checks WHERE id = $1");
        sqlx::query_as::<_, DataCheck>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all decisions for the given records, oldest first per record.
    pub async fn list_for_records<'e>(
        executor: impl PgExecutor<'e>,
        record_ids: &[DbId],
    ) -> Result<Vec<DataCheck>, sqlx::Error> {
        if record_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM data_checks
             WHERE record_id = ANY($1)
             ORDER BY record_id, created_at ASC, id ASC"
        );
        sqlx::query_as::<_, DataCheck>(&query)
            .bind(record_ids)
            .fetch_all(executor)
            .await
    }

    /// A user's review history, most recently updated first.
    pub async fn list_history(
        pool: &PgPool,
        user_id: DbId,
        choice: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<DataCheckHistoryItem>, sqlx::Error> {
        sqlx::query_as::<_, DataCheckHistoryItem>(
            "SELECT dc.id, dc.record_id, dc.choice, dc.rhythm, dc.quality, dc.comment,
                    r.key, r.exam_uid, r.position, r.label,
                    dc.created_at, dc.updated_at
             FROM data_checks dc
             JOIN records r ON r.id = dc.record_id
             WHERE dc.user_id = $1
               AND ($2::TEXT IS NULL OR dc.choice = $2)
             ORDER BY dc.updated_at DESC, dc.id DESC
             LIMIT $3 OFFSET $4",
        )
        .bind(user_id)
        .bind(choice)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// Count a user's decisions grouped by choice.
    pub async fn count_by_choice(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ChoiceCount>, sqlx::Error> {
        sqlx::query_as::<_, ChoiceCount>(
            "SELECT choice, COUNT(*) AS count
             FROM data_checks
             WHERE user_id = $1
             GROUP BY choice
             ORDER BY choice",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
