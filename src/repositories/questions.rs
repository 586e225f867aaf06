use sqlx::PgPool;

use crate::db::models::Question;

pub(crate) const COLUMNS: &str = "\
    id, exam_template_id, question_number, module, knowledge_point, question_type, \
    max_score, sort_order";

pub(crate) async fn list_by_template(
    pool: &PgPool,
    template_id: &str,
) -> Result<Vec<Question>, sqlx::Error> {
    sqlx::query_as::<_, Question>(&format!(
        "SELECT {COLUMNS}
         FROM questions
         WHERE exam_template_id = $1
         ORDER BY sort_order ASC, question_number ASC"
    ))
    .bind(template_id)
    .fetch_all(pool)
    .await
}
