use sqlx::PgPool;

use crate::db::models::StudentDescriptor;

pub(crate) async fn find_descriptor(
    pool: &PgPool,
    student_id: &str,
) -> Result<Option<StudentDescriptor>, sqlx::Error> {
    sqlx::query_as::<_, StudentDescriptor>(
        "SELECT s.id, s.student_number, s.name, s.class_id, c.name AS class_name
         FROM students s
         JOIN classes c ON c.id = s.class_id
         WHERE s.id = $1",
    )
    .bind(student_id)
    .fetch_optional(pool)
    .await
}
