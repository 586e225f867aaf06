use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::models::ScoreEntry;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub(crate) struct ScoreEntryInput {
    #[serde(alias = "studentId")]
    #[validate(length(min = 1, message = "student_id must not be empty"))]
    pub(crate) student_id: String,
    #[serde(alias = "questionId")]
    #[validate(length(min = 1, message = "question_id must not be empty"))]
    pub(crate) question_id: String,
    #[validate(range(min = 0.0, message = "score must be non-negative"))]
    pub(crate) score: f64,
}

#[derive(Debug, Deserialize, Validate)]
pub(crate) struct ScoreBatchRequest {
    #[validate(length(min = 1, message = "scores must not be empty"), nested)]
    pub(crate) scores: Vec<ScoreEntryInput>,
}

impl ScoreBatchRequest {
    pub(crate) fn into_entries(self, exam_id: &str) -> Vec<ScoreEntry> {
        self.scores
            .into_iter()
            .map(|input| ScoreEntry {
                exam_id: exam_id.to_string(),
                student_id: input.student_id,
                question_id: input.question_id,
                score: input.score,
            })
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreBatchResponse {
    pub(crate) success: bool,
    pub(crate) count: usize,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScoreListQuery {
    #[serde(default)]
    pub(crate) student_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoreEntryResponse {
    pub(crate) student_id: String,
    pub(crate) question_id: String,
    pub(crate) score: f64,
}

impl From<ScoreEntry> for ScoreEntryResponse {
    fn from(entry: ScoreEntry) -> Self {
        Self { student_id: entry.student_id, question_id: entry.question_id, score: entry.score }
    }
}
