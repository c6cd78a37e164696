//! Record (signal fragment) model and DTOs.

use biolabel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::data_check::DataCheck;

/// A row from the `records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Record {
    pub id: DbId,
    pub key: String,
    pub exam_uid: String,
    pub position: i32,
    pub dataset_id: Option<DbId>,
    pub label: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A record with every review decision made on it.
#[derive(Debug, Clone, Serialize)]
pub struct RecordWithChecks {
    #[serde(flatten)]
    pub record: Record,
    pub data_checks: Vec<DataCheck>,
}

/// One record to ingest.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRecord {
    pub key: String,
    pub exam_uid: String,
    pub position: i32,
    pub dataset_id: Option<DbId>,
    pub label: Option<String>,
}

/// Request body for `POST /admin/records`.
#[derive(Debug, Clone, Deserialize)]
pub struct IngestRecordsRequest {
    pub records: Vec<CreateRecord>,
}

/// Outcome of an ingestion batch. Keys that already exist are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub inserted: u64,
    pub skipped: u64,
}

/// Response body of `GET /records/list`.
#[derive(Debug, Serialize)]
pub struct UnreviewedPage {
    pub data: Vec<RecordWithChecks>,
    pub total: i64,
    pub limit: i64,
}
