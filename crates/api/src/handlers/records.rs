//! Handlers for the review queue and record ingestion.

use std::collections::BTreeSet;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::Query;
use biolabel_core::pagination::resolve_review_limit;
use biolabel_core::records::{normalize_exam_filter, validate_batch_size, validate_record_identity};
use biolabel_core::types::DbId;
use biolabel_db::models::record::{CreateRecord, IngestRecordsRequest, UnreviewedPage};
use biolabel_db::repositories::{DatasetRepo, RecordRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::UnreviewedParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/records/list?limit=&exams[]=
///
/// A random page of records the caller has not reviewed yet, with the total
/// number of such records. `total` and the sample are read from one snapshot
/// with the same filter, so the page never holds more than `total` records.
pub async fn list_unreviewed(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<UnreviewedParams>,
) -> AppResult<Json<UnreviewedPage>> {
    let limit = resolve_review_limit(params.limit.as_deref(), state.config.max_review_page_size);
    let exams = normalize_exam_filter(params.exam_values());

    let mut tx = RecordRepo::begin_review_snapshot(&state.pool).await?;
    let total = RecordRepo::count_unreviewed(&mut *tx, auth.user_id, exams.as_deref()).await?;
    let sample =
        RecordRepo::sample_unreviewed(&mut *tx, auth.user_id, exams.as_deref(), limit).await?;
    let data = RecordRepo::with_data_checks(&mut *tx, sample).await?;
    tx.commit().await?;

    tracing::debug!(
        user_id = auth.user_id,
        total,
        returned = data.len(),
        limit,
        exam_filter = exams.as_ref().map_or(0, Vec::len),
        "Served review page"
    );

    Ok(Json(UnreviewedPage { data, total, limit }))
}

/// GET /api/v1/records/{id}
///
/// A single record with every decision made on it.
pub async fn get_record(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let record = RecordRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Record", id))?;

    let mut with_checks = RecordRepo::with_data_checks(&state.pool, vec![record]).await?;
    let data = with_checks
        .pop()
        .ok_or_else(|| AppError::InternalError("record vanished while attaching checks".into()))?;

    Ok(Json(DataResponse { data }))
}

/// POST /api/v1/admin/records
///
/// Ingest a batch of records. Existing keys are skipped, never overwritten.
pub async fn ingest_records(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<IngestRecordsRequest>,
) -> AppResult<impl IntoResponse> {
    validate_batch_size(input.records.len())?;
    let records = input
        .records
        .into_iter()
        .map(|record| -> AppResult<CreateRecord> {
            let (key, exam_uid) =
                validate_record_identity(&record.key, &record.exam_uid, record.position)?;
            Ok(CreateRecord {
                key,
                exam_uid,
                ..record
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    let dataset_ids: BTreeSet<DbId> = records.iter().filter_map(|r| r.dataset_id).collect();
    for dataset_id in dataset_ids {
        DatasetRepo::find_by_id(&state.pool, dataset_id)
            .await?
            .ok_or_else(|| AppError::not_found("Dataset", dataset_id))?;
    }

    let summary = RecordRepo::ingest(&state.pool, &records).await?;

    tracing::info!(
        user_id = admin.user_id,
        inserted = summary.inserted,
        skipped = summary.skipped,
        "Records ingested"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: summary })))
}
