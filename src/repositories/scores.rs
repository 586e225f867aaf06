use sqlx::{PgPool, Postgres, Transaction};
use time::PrimitiveDateTime;
use uuid::Uuid;

use crate::db::models::ScoreEntry;

pub(crate) const COLUMNS: &str = "exam_id, student_id, question_id, score";

pub(crate) struct UpsertScore<'a> {
    pub(crate) exam_id: &'a str,
    pub(crate) student_id: &'a str,
    pub(crate) question_id: &'a str,
    pub(crate) score: f64,
    pub(crate) updated_at: PrimitiveDateTime,
}

pub(crate) async fn list_by_exam(
    pool: &PgPool,
    exam_id: &str,
) -> Result<Vec<ScoreEntry>, sqlx::Error> {
    sqlx::query_as::<_, ScoreEntry>(&format!(
        "SELECT {COLUMNS}
         FROM scores
         WHERE exam_id = $1
         ORDER BY created_at ASC, student_id ASC, question_id ASC"
    ))
    .bind(exam_id)
    .fetch_all(pool)
    .await
}

pub(crate) async fn list_by_exam_student(
    pool: &PgPool,
    exam_id: &str,
    student_id: &str,
) -> Result<Vec<ScoreEntry>, sqlx::Error> {
    sqlx::query_as::<_, ScoreEntry>(&format!(
        "SELECT {COLUMNS}
         FROM scores
         WHERE exam_id = $1 AND student_id = $2
         ORDER BY question_id ASC"
    ))
    .bind(exam_id)
    .bind(student_id)
    .fetch_all(pool)
    .await
}

/// Last write wins on (exam_id, student_id, question_id).
pub(crate) async fn upsert(
    tx: &mut Transaction<'_, Postgres>,
    params: UpsertScore<'_>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO scores (id, exam_id, student_id, question_id, score, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $6)
         ON CONFLICT (exam_id, student_id, question_id) DO UPDATE
         SET score = EXCLUDED.score,
             updated_at = EXCLUDED.updated_at",
    )
    .bind(Uuid::new_v4().to_string())
    .bind(params.exam_id)
    .bind(params.student_id)
    .bind(params.question_id)
    .bind(params.score)
    .bind(params.updated_at)
    .execute(&mut **tx)
    .await?;

    Ok(())
}
