use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

use crate::core::time::primitive_now_utc;
use crate::db::models::{
    ExamDescriptor, Question, ReportCard, ReportCardDraft, ScoreEntry, StudentDescriptor,
};
use crate::repositories;

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence seam used by the report-card services. The Postgres store is built
/// once in the composition root and shared through `AppState`.
#[async_trait]
pub(crate) trait GradebookStore: Send + Sync {
    async fn exam_descriptor(&self, exam_id: &str) -> Result<Option<ExamDescriptor>, StoreError>;

    async fn student_descriptor(
        &self,
        student_id: &str,
    ) -> Result<Option<StudentDescriptor>, StoreError>;

    /// Ordered by sort order ascending.
    async fn questions_for_template(&self, template_id: &str)
        -> Result<Vec<Question>, StoreError>;

    async fn score_entries(&self, exam_id: &str) -> Result<Vec<ScoreEntry>, StoreError>;

    async fn student_score_entries(
        &self,
        exam_id: &str,
        student_id: &str,
    ) -> Result<Vec<ScoreEntry>, StoreError>;

    /// Writes every entry atomically; returns the number of entries written.
    async fn upsert_scores(&self, entries: &[ScoreEntry]) -> Result<usize, StoreError>;

    async fn upsert_report_card(&self, draft: &ReportCardDraft) -> Result<ReportCard, StoreError>;

    async fn report_cards(&self, exam_id: &str) -> Result<Vec<ReportCard>, StoreError>;

    async fn report_card(
        &self,
        exam_id: &str,
        student_id: &str,
    ) -> Result<Option<ReportCard>, StoreError>;

    async fn ping(&self) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub(crate) struct PgGradebookStore {
    pool: PgPool,
}

impl PgGradebookStore {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GradebookStore for PgGradebookStore {
    async fn exam_descriptor(&self, exam_id: &str) -> Result<Option<ExamDescriptor>, StoreError> {
        Ok(repositories::exams::find_descriptor(&self.pool, exam_id).await?)
    }

    async fn student_descriptor(
        &self,
        student_id: &str,
    ) -> Result<Option<StudentDescriptor>, StoreError> {
        Ok(repositories::students::find_descriptor(&self.pool, student_id).await?)
    }

    async fn questions_for_template(
        &self,
        template_id: &str,
    ) -> Result<Vec<Question>, StoreError> {
        Ok(repositories::questions::list_by_template(&self.pool, template_id).await?)
    }

    async fn score_entries(&self, exam_id: &str) -> Result<Vec<ScoreEntry>, StoreError> {
        Ok(repositories::scores::list_by_exam(&self.pool, exam_id).await?)
    }

    async fn student_score_entries(
        &self,
        exam_id: &str,
        student_id: &str,
    ) -> Result<Vec<ScoreEntry>, StoreError> {
        Ok(repositories::scores::list_by_exam_student(&self.pool, exam_id, student_id).await?)
    }

    async fn upsert_scores(&self, entries: &[ScoreEntry]) -> Result<usize, StoreError> {
        let now = primitive_now_utc();
        let mut tx = self.pool.begin().await?;

        for entry in entries {
            repositories::scores::upsert(
                &mut tx,
                repositories::scores::UpsertScore {
                    exam_id: &entry.exam_id,
                    student_id: &entry.student_id,
                    question_id: &entry.question_id,
                    score: entry.score,
                    updated_at: now,
                },
            )
            .await?;
        }

        tx.commit().await?;
        Ok(entries.len())
    }

    async fn upsert_report_card(&self, draft: &ReportCardDraft) -> Result<ReportCard, StoreError> {
        let card = repositories::report_cards::upsert(
            &self.pool,
            repositories::report_cards::UpsertReportCard {
                exam_id: &draft.exam_id,
                student_id: &draft.student_id,
                total_score: draft.total_score,
                percentage: draft.percentage,
                class_rank: Some(draft.class_rank),
                grade_rank: draft.grade_rank,
                now: primitive_now_utc(),
            },
        )
        .await?;

        Ok(card)
    }

    async fn report_cards(&self, exam_id: &str) -> Result<Vec<ReportCard>, StoreError> {
        Ok(repositories::report_cards::list_by_exam(&self.pool, exam_id).await?)
    }

    async fn report_card(
        &self,
        exam_id: &str,
        student_id: &str,
    ) -> Result<Option<ReportCard>, StoreError> {
        Ok(repositories::report_cards::find_by_exam_student(&self.pool, exam_id, student_id)
            .await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(repositories::health::ping(&self.pool).await?)
    }
}
