mod handlers;
mod helpers;

use axum::{routing::get, routing::post, Router};

use crate::core::state::AppState;

pub(crate) use helpers::invalidate_exam_reports;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/:exam_id/report-cards", get(handlers::list_report_cards))
        .route("/:exam_id/report-cards/generate", post(handlers::generate_report_cards))
        .route("/:exam_id/report-cards/:student_id", get(handlers::get_report_card))
        .route("/:exam_id/reports", get(handlers::exam_reports))
        .route("/:exam_id/reports/:student_id", get(handlers::student_report))
        .route("/:exam_id/statistics", get(handlers::exam_statistics))
}
