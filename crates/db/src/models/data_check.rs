//! Review decision (`data_checks`) model and DTOs.

use biolabel_core::review::Choice;
use biolabel_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `data_checks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DataCheck {
    pub id: DbId,
    pub record_id: DbId,
    pub user_id: DbId,
    pub choice: String,
    pub rhythm: Option<i16>,
    pub quality: Option<i16>,
    pub comment: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Result of an upsert: the stored row and whether it was newly created.
#[derive(Debug, Clone, FromRow)]
pub struct UpsertedDataCheck {
    #[sqlx(flatten)]
    pub data_check: DataCheck,
    pub inserted: bool,
}

/// Request body for submitting or amending feedback.
///
/// Classification deployments send `choice`; rating deployments send
/// `rhythm`, `quality` and optionally `comment`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackRequest {
    pub choice: Option<Choice>,
    pub rhythm: Option<i16>,
    pub quality: Option<i16>,
    pub comment: Option<String>,
}

/// DTO for the `(record_id, user_id)` upsert.
///
/// `None` fields keep the stored value on update; a missing `choice` is
/// stored as `unknown` on insert.
#[derive(Debug, Clone)]
pub struct UpsertDataCheck {
    pub record_id: DbId,
    pub user_id: DbId,
    pub choice: Option<String>,
    pub rhythm: Option<i16>,
    pub quality: Option<i16>,
    pub comment: Option<String>,
}

impl UpsertDataCheck {
    pub fn from_request(record_id: DbId, user_id: DbId, input: &FeedbackRequest) -> Self {
        Self {
            record_id,
            user_id,
            choice: input.choice.map(|c| c.as_str().to_string()),
            rhythm: input.rhythm,
            quality: input.quality,
            comment: input.comment.clone(),
        }
    }
}

/// A history entry: the caller's decision joined with its record.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DataCheckHistoryItem {
    pub id: DbId,
    pub record_id: DbId,
    pub choice: String,
    pub rhythm: Option<i16>,
    pub quality: Option<i16>,
    pub comment: Option<String>,
    pub key: String,
    pub exam_uid: String,
    pub position: i32,
    pub label: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Number of a reviewer's decisions with a given choice.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChoiceCount {
    pub choice: String,
    pub count: i64,
}

/// Query parameters for `GET /data-checks`.
#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub choice: Option<Choice>,
}
