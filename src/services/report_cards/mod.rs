mod aggregator;
mod error;
mod ranking;
mod stats;

use std::sync::Arc;
use std::time::Instant;

pub(crate) use aggregator::{aggregate, aggregate_student, StudentReport};
pub(crate) use error::ReportCardError;
pub(crate) use ranking::build_report_cards;
pub(crate) use stats::{exam_statistics, round2, ExamStatistics};

use crate::core::config::RankingPolicy;
use crate::core::state::AppState;
use crate::db::models::{ExamDescriptor, Question, ReportCard, StudentDescriptor};
use crate::repositories::store::GradebookStore;

/// Single-student view resolved with its exam and student descriptors.
#[derive(Debug, Clone)]
pub(crate) struct StudentReportView {
    pub(crate) exam: ExamDescriptor,
    pub(crate) student: StudentDescriptor,
    pub(crate) report: StudentReport,
}

#[derive(Debug, Clone)]
pub(crate) struct ExamReportsView {
    pub(crate) exam: ExamDescriptor,
    pub(crate) reports: Vec<StudentReport>,
}

/// Aggregation, ranking and persistence of report cards over a [`GradebookStore`].
#[derive(Clone)]
pub(crate) struct ReportCardService {
    store: Arc<dyn GradebookStore>,
    policy: RankingPolicy,
}

impl ReportCardService {
    pub(crate) fn new(store: Arc<dyn GradebookStore>, policy: RankingPolicy) -> Self {
        Self { store, policy }
    }

    pub(crate) fn from_state(state: &AppState) -> Self {
        Self::new(state.store(), state.settings().reports().ranking_policy)
    }

    /// Recomputes and upserts the report card of every student with scores in the exam.
    pub(crate) async fn generate(&self, exam_id: &str) -> Result<Vec<ReportCard>, ReportCardError> {
        let started = Instant::now();
        let exam = self.exam(exam_id).await?;
        let questions = self.questions(&exam).await?;
        let entries = self.store.score_entries(exam_id).await?;

        let reports = aggregate(exam_id, &entries, &questions);
        let drafts =
            build_report_cards(exam_id, &reports, exam.template_total_score, self.policy);

        let mut cards = Vec::with_capacity(drafts.len());
        for draft in &drafts {
            cards.push(self.store.upsert_report_card(draft).await?);
        }

        metrics::counter!("report_cards_generated_total").increment(cards.len() as u64);
        metrics::histogram!("report_card_generation_seconds")
            .record(started.elapsed().as_secs_f64());
        tracing::info!(
            exam_id = %exam_id,
            count = cards.len(),
            policy = self.policy.as_str(),
            "Report cards generated"
        );

        Ok(cards)
    }

    pub(crate) async fn student_report(
        &self,
        exam_id: &str,
        student_id: &str,
    ) -> Result<StudentReportView, ReportCardError> {
        let exam = self.exam(exam_id).await?;
        let student = self
            .store
            .student_descriptor(student_id)
            .await?
            .ok_or(ReportCardError::StudentNotFound)?;

        let entries = self.store.student_score_entries(exam_id, student_id).await?;
        if entries.is_empty() {
            return Err(ReportCardError::NoScores);
        }

        let questions = self.questions(&exam).await?;
        let report = aggregate_student(exam_id, student_id, &entries, &questions)
            .ok_or(ReportCardError::NoScores)?;

        Ok(StudentReportView { exam, student, report })
    }

    pub(crate) async fn exam_reports(
        &self,
        exam_id: &str,
    ) -> Result<ExamReportsView, ReportCardError> {
        let exam = self.exam(exam_id).await?;
        let questions = self.questions(&exam).await?;
        let entries = self.store.score_entries(exam_id).await?;

        let reports = aggregate(exam_id, &entries, &questions);
        Ok(ExamReportsView { exam, reports })
    }

    pub(crate) async fn exam_statistics(
        &self,
        exam_id: &str,
    ) -> Result<ExamStatistics, ReportCardError> {
        let view = self.exam_reports(exam_id).await?;
        Ok(exam_statistics(&view.reports))
    }

    /// Persisted cards for the exam, best total first.
    pub(crate) async fn report_cards(
        &self,
        exam_id: &str,
    ) -> Result<Vec<ReportCard>, ReportCardError> {
        self.exam(exam_id).await?;
        Ok(self.store.report_cards(exam_id).await?)
    }

    pub(crate) async fn report_card(
        &self,
        exam_id: &str,
        student_id: &str,
    ) -> Result<Option<ReportCard>, ReportCardError> {
        self.exam(exam_id).await?;
        Ok(self.store.report_card(exam_id, student_id).await?)
    }

    async fn exam(&self, exam_id: &str) -> Result<ExamDescriptor, ReportCardError> {
        self.store.exam_descriptor(exam_id).await?.ok_or(ReportCardError::ExamNotFound)
    }

    async fn questions(&self, exam: &ExamDescriptor) -> Result<Vec<Question>, ReportCardError> {
        let questions = self.store.questions_for_template(&exam.template_id).await?;

        let question_total: f64 = questions.iter().map(|question| question.max_score).sum();
        if round2(question_total) != round2(exam.template_total_score) {
            tracing::warn!(
                exam_id = %exam.id,
                template_id = %exam.template_id,
                question_total = round2(question_total),
                template_total_score = exam.template_total_score,
                "Template total score differs from the sum of question max scores"
            );
        }

        Ok(questions)
    }
}
