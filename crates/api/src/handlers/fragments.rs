//! Handler turning raw signal fragments into chart series.

use axum::extract::State;
use axum::Json;
use biolabel_core::chart::{to_chart_series, ChartSeries, Fragment};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/fragments/series
///
/// Stateless: the fragment is transposed into one labelled series per lead.
pub async fn fragment_series(
    _auth: AuthUser,
    State(_state): State<AppState>,
    Json(fragment): Json<Fragment>,
) -> AppResult<Json<DataResponse<ChartSeries>>> {
    let series = to_chart_series(&fragment)?;
    Ok(Json(DataResponse { data: series }))
}
