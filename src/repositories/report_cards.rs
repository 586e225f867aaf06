use sqlx::PgPool;
use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::db::models::ReportCard;

pub(crate) const COLUMNS: &str = "\
    id, exam_id, student_id, total_score, percentage, class_rank, grade_rank, \
    teacher_comment, created_at, updated_at";

pub(crate) struct UpsertReportCard<'a> {
    pub(crate) exam_id: &'a str,
    pub(crate) student_id: &'a str,
    pub(crate) total_score: f64,
    pub(crate) percentage: f64,
    pub(crate) class_rank: Option<i32>,
    pub(crate) grade_rank: Option<i32>,
    pub(crate) now: PrimitiveDateTime,
}

/// Keyed on (exam_id, student_id). An existing row keeps its id, created_at and
/// teacher_comment.
pub(crate) async fn upsert(
    pool: &PgPool,
    params: UpsertReportCard<'_>,
) -> Result<ReportCard, sqlx::Error> {
    sqlx::query_as::<_, ReportCard>(&format!(
        "INSERT INTO report_cards (
            id, exam_id, student_id, total_score, percentage, class_rank, grade_rank,
            created_at, updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
        ON CONFLICT (exam_id, student_id) DO UPDATE
        SET total_score = EXCLUDED.total_score,
            percentage = EXCLUDED.percentage,
            class_rank = EXCLUDED.class_rank,
            grade_rank = EXCLUDED.grade_rank,
            updated_at = EXCLUDED.updated_at
        RETURNING {COLUMNS}"
    ))
    .bind(Uuid::new_v4().to_string())
    .bind(params.exam_id)
    .bind(params.student_id)
    .bind(params.total_score)
    .bind(params.percentage)
    .bind(params.class_rank)
    .bind(params.grade_rank)
    .bind(params.now)
    .fetch_one(pool)
    .await
}

pub(crate) async fn list_by_exam(
    pool: &PgPool,
    exam_id: &str,
) -> Result<Vec<ReportCard>, sqlx::Error> {
    sqlx::query_as::<_, ReportCard>(&format!(
        "SELECT {COLUMNS}
         FROM report_cards
         WHERE exam_id = $1
         ORDER BY total_score DESC, class_rank ASC NULLS LAST"
    ))
    .bind(exam_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn find_by_exam_student(
    pool: &PgPool,
    exam_id: &str,
    student_id: &str,
) -> Result<Option<ReportCard>, sqlx::Error> {
    sqlx::query_as::<_, ReportCard>(&format!(
        "SELECT {COLUMNS}
         FROM report_cards
         WHERE exam_id = $1 AND student_id = $2"
    ))
    .bind(exam_id)
    .bind(student_id)
    .fetch_optional(pool)
    .await
}
