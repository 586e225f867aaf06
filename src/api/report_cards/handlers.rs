use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::schemas::report_card::{
    ExamReportsResponse, ExamStatisticsResponse, GenerateReportCardsResponse, ReportCardResponse,
    StudentReportResponse,
};
use crate::services::report_cards::ReportCardService;

use super::helpers;

pub(super) async fn generate_report_cards(
    Path(exam_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<GenerateReportCardsResponse>, ApiError> {
    let cards = ReportCardService::from_state(&state).generate(&exam_id).await?;
    helpers::invalidate_exam_reports(&state, &exam_id).await;

    let report_cards: Vec<ReportCardResponse> = cards.into_iter().map(Into::into).collect();
    Ok(Json(GenerateReportCardsResponse {
        success: true,
        count: report_cards.len(),
        report_cards,
    }))
}

pub(super) async fn list_report_cards(
    Path(exam_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ReportCardResponse>>, ApiError> {
    let cards = ReportCardService::from_state(&state).report_cards(&exam_id).await?;
    Ok(Json(cards.into_iter().map(Into::into).collect()))
}

pub(super) async fn get_report_card(
    Path((exam_id, student_id)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Json<ReportCardResponse>, ApiError> {
    let card = ReportCardService::from_state(&state)
        .report_card(&exam_id, &student_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Report card not found".to_string()))?;

    Ok(Json(card.into()))
}

pub(super) async fn exam_reports(
    Path(exam_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ExamReportsResponse>, ApiError> {
    Ok(Json(helpers::cached_exam_reports(&state, &exam_id).await?))
}

pub(super) async fn student_report(
    Path((exam_id, student_id)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Json<StudentReportResponse>, ApiError> {
    let view = ReportCardService::from_state(&state).student_report(&exam_id, &student_id).await?;
    Ok(Json(view.into()))
}

pub(super) async fn exam_statistics(
    Path(exam_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ExamStatisticsResponse>, ApiError> {
    let statistics = ReportCardService::from_state(&state).exam_statistics(&exam_id).await?;
    Ok(Json(ExamStatisticsResponse { exam_id, statistics }))
}
