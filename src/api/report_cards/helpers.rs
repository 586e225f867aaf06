use crate::core::redis::exam_reports_key;
use crate::core::state::AppState;
use crate::schemas::report_card::ExamReportsResponse;
use crate::services::report_cards::{ReportCardError, ReportCardService};

/// Batch report view, served from Redis when a fresh copy is cached.
pub(super) async fn cached_exam_reports(
    state: &AppState,
    exam_id: &str,
) -> Result<ExamReportsResponse, ReportCardError> {
    let key = exam_reports_key(exam_id);

    match state.redis().get_json::<ExamReportsResponse>(&key).await {
        Ok(Some(cached)) => {
            tracing::debug!(exam_id = %exam_id, "Exam reports served from cache");
            return Ok(cached);
        }
        Ok(None) => {}
        Err(err) => {
            tracing::warn!(exam_id = %exam_id, error = %err, "Failed to read exam reports cache");
        }
    }

    let response: ExamReportsResponse =
        ReportCardService::from_state(state).exam_reports(exam_id).await?.into();

    let ttl = state.settings().reports().cache_ttl_seconds;
    if let Err(err) = state.redis().set_json(&key, &response, ttl).await {
        tracing::warn!(exam_id = %exam_id, error = %err, "Failed to cache exam reports");
    }

    Ok(response)
}

pub(crate) async fn invalidate_exam_reports(state: &AppState, exam_id: &str) {
    if let Err(err) = state.redis().delete(&exam_reports_key(exam_id)).await {
        tracing::warn!(exam_id = %exam_id, error = %err, "Failed to invalidate exam reports cache");
    }
}
