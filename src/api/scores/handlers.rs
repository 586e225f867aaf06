use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::report_cards::invalidate_exam_reports;
use crate::core::state::AppState;
use crate::schemas::score::{
    ScoreBatchRequest, ScoreBatchResponse, ScoreEntryResponse, ScoreListQuery,
};
use crate::services::scores::ScoreEntryService;

pub(super) async fn record_scores(
    Path(exam_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<ScoreBatchRequest>,
) -> Result<Json<ScoreBatchResponse>, ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let limit = state.settings().reports().max_scores_per_batch;
    if payload.scores.len() as u64 > limit {
        return Err(ApiError::BadRequest(format!(
            "A batch may contain at most {limit} score entries"
        )));
    }

    let entries = payload.into_entries(&exam_id);
    let count = ScoreEntryService::from_state(&state).record_scores(&exam_id, &entries).await?;
    invalidate_exam_reports(&state, &exam_id).await;

    Ok(Json(ScoreBatchResponse { success: true, count }))
}

pub(super) async fn list_scores(
    Path(exam_id): Path<String>,
    Query(query): Query<ScoreListQuery>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ScoreEntryResponse>>, ApiError> {
    let entries = ScoreEntryService::from_state(&state)
        .list_scores(&exam_id, query.student_id.as_deref())
        .await?;

    Ok(Json(entries.into_iter().map(Into::into).collect()))
}
