use thiserror::Error;

use crate::repositories::store::StoreError;

#[derive(Debug, Error)]
pub(crate) enum ReportCardError {
    #[error("Exam not found")]
    ExamNotFound,
    #[error("Student not found")]
    StudentNotFound,
    #[error("No scores recorded for this student in this exam")]
    NoScores,
    #[error(transparent)]
    Store(#[from] StoreError),
}
