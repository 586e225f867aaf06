use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::PrimitiveDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct Question {
    pub(crate) id: String,
    pub(crate) exam_template_id: String,
    pub(crate) question_number: i32,
    pub(crate) module: Option<String>,
    pub(crate) knowledge_point: Option<String>,
    pub(crate) question_type: Option<String>,
    pub(crate) max_score: f64,
    pub(crate) sort_order: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct ScoreEntry {
    pub(crate) exam_id: String,
    pub(crate) student_id: String,
    pub(crate) question_id: String,
    pub(crate) score: f64,
}

/// Exam joined with its template, subject and grade.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct ExamDescriptor {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) exam_date: PrimitiveDateTime,
    pub(crate) class_id: String,
    pub(crate) template_id: String,
    pub(crate) template_name: String,
    pub(crate) subject_name: String,
    pub(crate) grade_name: String,
    pub(crate) template_total_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct StudentDescriptor {
    pub(crate) id: String,
    pub(crate) student_number: String,
    pub(crate) name: String,
    pub(crate) class_id: String,
    pub(crate) class_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub(crate) struct ReportCard {
    pub(crate) id: String,
    pub(crate) exam_id: String,
    pub(crate) student_id: String,
    pub(crate) total_score: f64,
    pub(crate) percentage: f64,
    pub(crate) class_rank: Option<i32>,
    pub(crate) grade_rank: Option<i32>,
    pub(crate) teacher_comment: Option<String>,
    pub(crate) created_at: PrimitiveDateTime,
    pub(crate) updated_at: PrimitiveDateTime,
}

/// Computed report card ready to be written; `grade_rank` is never populated yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ReportCardDraft {
    pub(crate) exam_id: String,
    pub(crate) student_id: String,
    pub(crate) total_score: f64,
    pub(crate) percentage: f64,
    pub(crate) class_rank: i32,
    pub(crate) grade_rank: Option<i32>,
}
