use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use thiserror::Error;

use crate::core::state::AppState;
use crate::db::models::ScoreEntry;
use crate::repositories::store::{GradebookStore, StoreError};

#[derive(Debug, Error)]
pub(crate) enum ScoreEntryError {
    #[error("Exam not found")]
    ExamNotFound,
    #[error("Question {0} does not belong to this exam")]
    UnknownQuestion(String),
    #[error("Student {0} not found")]
    UnknownStudent(String),
    #[error("Score {score} for question {question_id} exceeds max score {max_score}")]
    AboveMax { question_id: String, score: f64, max_score: f64 },
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Clone)]
pub(crate) struct ScoreEntryService {
    store: Arc<dyn GradebookStore>,
}

impl ScoreEntryService {
    pub(crate) fn new(store: Arc<dyn GradebookStore>) -> Self {
        Self { store }
    }

    pub(crate) fn from_state(state: &AppState) -> Self {
        Self::new(state.store())
    }

    /// Checks every entry against the exam's template and the student roster, then
    /// upserts the whole batch.
    /// Nothing is written when any entry is rejected.
    pub(crate) async fn record_scores(
        &self,
        exam_id: &str,
        entries: &[ScoreEntry],
    ) -> Result<usize, ScoreEntryError> {
        let exam = self
            .store
            .exam_descriptor(exam_id)
            .await?
            .ok_or(ScoreEntryError::ExamNotFound)?;
        let questions = self.store.questions_for_template(&exam.template_id).await?;
        let max_scores: HashMap<&str, f64> =
            questions.iter().map(|question| (question.id.as_str(), question.max_score)).collect();

        for entry in entries {
            let max_score = *max_scores
                .get(entry.question_id.as_str())
                .ok_or_else(|| ScoreEntryError::UnknownQuestion(entry.question_id.clone()))?;
            if entry.score > max_score {
                return Err(ScoreEntryError::AboveMax {
                    question_id: entry.question_id.clone(),
                    score: entry.score,
                    max_score,
                });
            }
        }

        let mut checked = HashSet::new();
        for entry in entries {
            if !checked.insert(entry.student_id.as_str()) {
                continue;
            }
            if self.store.student_descriptor(&entry.student_id).await?.is_none() {
                return Err(ScoreEntryError::UnknownStudent(entry.student_id.clone()));
            }
        }

        let written = self.store.upsert_scores(entries).await?;
        metrics::counter!("score_entries_upserted_total").increment(written as u64);
        tracing::info!(exam_id = %exam_id, count = written, "Score entries recorded");

        Ok(written)
    }

    pub(crate) async fn list_scores(
        &self,
        exam_id: &str,
        student_id: Option<&str>,
    ) -> Result<Vec<ScoreEntry>, ScoreEntryError> {
        self.store.exam_descriptor(exam_id).await?.ok_or(ScoreEntryError::ExamNotFound)?;

        let entries = match student_id {
            Some(student_id) => self.store.student_score_entries(exam_id, student_id).await?,
            None => self.store.score_entries(exam_id).await?,
        };
        Ok(entries)
    }
}
