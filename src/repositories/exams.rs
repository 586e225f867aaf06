use sqlx::PgPool;

use crate::db::models::ExamDescriptor;

pub(crate) async fn find_descriptor(
    pool: &PgPool,
    exam_id: &str,
) -> Result<Option<ExamDescriptor>, sqlx::Error> {
    sqlx::query_as::<_, ExamDescriptor>(
        "SELECT e.id,
                e.name,
                e.exam_date,
                e.class_id,
                t.id AS template_id,
                t.name AS template_name,
                s.name AS subject_name,
                g.display_name AS grade_name,
                t.total_score AS template_total_score
         FROM exams e
         JOIN exam_templates t ON t.id = e.exam_template_id
         JOIN subjects s ON s.id = t.subject_id
         JOIN grades g ON g.id = t.grade_id
         WHERE e.id = $1",
    )
    .bind(exam_id)
    .fetch_optional(pool)
    .await
}
