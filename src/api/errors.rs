use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::services::report_cards::ReportCardError;
use crate::services::scores::ScoreEntryError;

#[derive(Debug, Serialize)]
struct ErrorResponse {
    status: u16,
    detail: String,
}

#[derive(Debug)]
pub(crate) enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    /// Log the underlying error with context and return an `Internal` variant.
    pub(crate) fn internal(err: impl std::fmt::Display, context: &str) -> Self {
        tracing::error!(error = %err, "{context}");
        Self::Internal(context.to_string())
    }
}

impl From<ReportCardError> for ApiError {
    fn from(err: ReportCardError) -> Self {
        match err {
            ReportCardError::ExamNotFound
            | ReportCardError::StudentNotFound
            | ReportCardError::NoScores => ApiError::NotFound(err.to_string()),
            ReportCardError::Store(err) => ApiError::internal(err, "Failed to load gradebook data"),
        }
    }
}

impl From<ScoreEntryError> for ApiError {
    fn from(err: ScoreEntryError) -> Self {
        match err {
            ScoreEntryError::ExamNotFound => ApiError::NotFound(err.to_string()),
            ScoreEntryError::UnknownQuestion(_)
            | ScoreEntryError::UnknownStudent(_)
            | ScoreEntryError::AboveMax { .. } => {
                ApiError::BadRequest(err.to_string())
            }
            ScoreEntryError::Store(err) => ApiError::internal(err, "Failed to record scores"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(ErrorResponse { status: status.as_u16(), detail })).into_response()
    }
}
