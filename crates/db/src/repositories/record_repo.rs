//! Repository for the `records` table, including the review-queue sampler.

use std::collections::HashMap;

use biolabel_core::types::DbId;
use sqlx::{PgExecutor, PgPool, Postgres, Transaction};

use crate::models::data_check::DataCheck;
use crate::models::record::{CreateRecord, IngestSummary, Record, RecordWithChecks};
use crate::repositories::DataCheckRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, key, exam_uid, position, dataset_id, label, created_at, updated_at";

/// Same columns qualified with the `r` alias, for queries with subselects.
const R_COLUMNS: &str =
    "r.id, r.key, r.exam_uid, r.position, r.dataset_id, r.label, r.created_at, r.updated_at";

/// Records the user has not reviewed, optionally limited to some exams.
///
/// `$1` is the reviewer id, `$2` a nullable `TEXT[]` of exam uids.
const UNREVIEWED_PREDICATE: &str = "NOT EXISTS (
        SELECT 1 FROM data_checks dc
        WHERE dc.record_id = r.id AND dc.user_id = $1
    )
    AND ($2::TEXT[] IS NULL OR r.exam_uid = ANY($2))";

/// Provides ingestion and read operations for records.
pub struct RecordRepo;

impl RecordRepo {
    /// Insert a batch of records in a single statement.
    ///
    /// Records are immutable: a key that already exists (in the table or
    /// earlier in the batch) is skipped rather than updated.
    pub async fn ingest(pool: &PgPool, records: &[CreateRecord]) -> Result<IngestSummary, sqlx::Error> {
        let keys: Vec<&str> = records.iter().map(|r| r.key.as_str()).collect();
        let exam_uids: Vec<&str> = records.iter().map(|r| r.exam_uid.as_str()).collect();
        let positions: Vec<i32> = records.iter().map(|r| r.position).collect();
        let dataset_ids: Vec<Option<DbId>> = records.iter().map(|r| r.dataset_id).collect();
        let labels: Vec<Option<&str>> = records.iter().map(|r| r.label.as_deref()).collect();

        let result = sqlx::query(
            "INSERT INTO records (key, exam_uid, position, dataset_id, label)
             SELECT * FROM UNNEST($1::TEXT[], $2::TEXT[], $3::INTEGER[], $4::BIGINT[], $5::TEXT[])
             ON CONFLICT (key) DO NOTHING",
        )
        .bind(&keys)
        .bind(&exam_uids)
        .bind(&positions)
        .bind(&dataset_ids)
        .bind(&labels)
        .execute(pool)
        .await?;

        let inserted = result.rows_affected();
        let summary = IngestSummary {
            inserted,
            skipped: records.len() as u64 - inserted,
        };
        tracing::debug!(inserted = summary.inserted, skipped = summary.skipped, "Records ingested");
        Ok(summary)
    }

    /// Open a `REPEATABLE READ` transaction for reading a review page.
    ///
    /// The count and the sample of one page must see the same snapshot, or a
    /// commit landing between them can yield more records than `total`.
    pub async fn begin_review_snapshot(
        pool: &PgPool,
    ) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }

    /// Find a record by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Record>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM records WHERE id = $1");
        sqlx::query_as::<_, Record>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count records that `user_id` has not reviewed.
    ///
    /// `exam_uids = None` counts across all exams.
    pub async fn count_unreviewed<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
        exam_uids: Option<&[String]>,
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM records r WHERE {UNREVIEWED_PREDICATE}");
        sqlx::query_scalar::<_, i64>(&query)
            .bind(user_id)
            .bind(exam_uids)
            .fetch_one(executor)
            .await
    }

    /// Draw a uniform random sample of at most `limit` records that `user_id`
    /// has not reviewed.
    ///
    /// Sampling happens inside Postgres (`ORDER BY random() LIMIT`), so only
    /// `limit` rows ever cross the wire.
    pub async fn sample_unreviewed<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
        exam_uids: Option<&[String]>,
        limit: i64,
    ) -> Result<Vec<Record>, sqlx::Error> {
        let query = format!(
            "SELECT {R_COLUMNS} FROM records r
             WHERE {UNREVIEWED_PREDICATE}
             ORDER BY random()
             LIMIT $3"
        );
        sqlx::query_as::<_, Record>(&query)
            .bind(user_id)
            .bind(exam_uids)
            .bind(limit)
            .fetch_all(executor)
            .await
    }

    /// Attach every review decision to each record, preserving record order.
    pub async fn with_data_checks<'e>(
        executor: impl PgExecutor<'e>,
        records: Vec<Record>,
    ) -> Result<Vec<RecordWithChecks>, sqlx::Error> {
        let ids: Vec<DbId> = records.iter().map(|r| r.id).collect();
        let checks = DataCheckRepo::list_for_records(executor, &ids).await?;

        let mut by_record: HashMap<DbId, Vec<DataCheck>> = HashMap::new();
        for check in checks {
            by_record.entry(check.record_id).or_default().push(check);
        }

        Ok(records
            .into_iter()
            .map(|record| {
                let data_checks = by_record.remove(&record.id).unwrap_or_default();
                RecordWithChecks {
                    record,
                    data_checks,
                }
            })
            .collect())
    }
}
