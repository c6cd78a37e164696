//! Handlers for submitting, amending and listing review decisions.
//!
//! A reviewer holds at most one decision per record. Submitting again for
//! the same record updates that decision in place.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use biolabel_core::pagination::{
    clamp_limit, clamp_offset, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT,
};
use biolabel_core::review::{validate_feedback, FeedbackInput};
use biolabel_core::types::DbId;
use biolabel_db::models::data_check::{FeedbackRequest, HistoryParams, UpsertDataCheck};
use biolabel_db::repositories::{DataCheckRepo, RecordRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Check a feedback body against the configured review mode.
fn validate_request(state: &AppState, input: &FeedbackRequest) -> AppResult<()> {
    let feedback = FeedbackInput {
        choice: input.choice,
        rhythm: input.rhythm,
        quality: input.quality,
        comment: input.comment.as_deref(),
    };
    validate_feedback(state.config.review_mode, &feedback)?;
    Ok(())
}

/// POST /api/v1/records/{id}/feedback
///
/// Create or update the caller's decision on a record. Responds 201 when the
/// decision is new and 200 when an existing one was updated.
pub async fn submit_feedback(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(record_id): Path<DbId>,
    Json(input): Json<FeedbackRequest>,
) -> AppResult<impl IntoResponse> {
    validate_request(&state, &input)?;

    RecordRepo::find_by_id(&state.pool, record_id)
        .await?
        .ok_or_else(|| AppError::not_found("Record", record_id))?;

    let upsert = UpsertDataCheck::from_request(record_id, auth.user_id, &input);
    let outcome = DataCheckRepo::upsert(&state.pool, &upsert).await?;

    tracing::info!(
        user_id = auth.user_id,
        record_id,
        data_check_id = outcome.data_check.id,
        choice = %outcome.data_check.choice,
        created = outcome.inserted,
        "Feedback submitted"
    );

    let status = if outcome.inserted {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(DataResponse {
            data: outcome.data_check,
        }),
    ))
}

/// PUT /api/v1/data-checks/{id}
///
/// Amend one of the caller's own decisions from the history view.
pub async fn update_data_check(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<FeedbackRequest>,
) -> AppResult<impl IntoResponse> {
    validate_request(&state, &input)?;

    let existing = DataCheckRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|dc| dc.user_id == auth.user_id)
        .ok_or_else(|| AppError::not_found("DataCheck", id))?;

    let update = UpsertDataCheck::from_request(existing.record_id, auth.user_id, &input);
    let data_check = DataCheckRepo::update_own(&state.pool, id, auth.user_id, &update)
        .await?
        .ok_or_else(|| AppError::not_found("DataCheck", id))?;

    tracing::info!(
        user_id = auth.user_id,
        data_check_id = id,
        choice = %data_check.choice,
        "Feedback updated"
    );

    Ok(Json(DataResponse { data: data_check }))
}

/// GET /api/v1/data-checks?limit=&offset=&choice=
///
/// The caller's review history, most recent first.
pub async fn list_history(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT);
    let offset = clamp_offset(params.offset);
    let choice = params.choice.map(|c| c.as_str());

    let items =
        DataCheckRepo::list_history(&state.pool, auth.user_id, choice, limit, offset).await?;

    Ok(Json(DataResponse { data: items }))
}

/// GET /api/v1/data-checks/stats
///
/// How many decisions the caller made per choice.
pub async fn history_stats(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let counts = DataCheckRepo::count_by_choice(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: counts }))
}
