use serde::{Deserialize, Serialize};

use crate::core::time::format_primitive;
use crate::db::models::{ExamDescriptor, ReportCard, StudentDescriptor};
use crate::services::report_cards::{
    ExamReportsView, ExamStatistics, StudentReport, StudentReportView,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ExamSummaryResponse {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) exam_date: String,
    pub(crate) template_name: String,
    pub(crate) subject_name: String,
    pub(crate) grade_name: String,
    pub(crate) template_total_score: f64,
}

impl From<ExamDescriptor> for ExamSummaryResponse {
    fn from(exam: ExamDescriptor) -> Self {
        Self {
            id: exam.id,
            name: exam.name,
            exam_date: format_primitive(exam.exam_date),
            template_name: exam.template_name,
            subject_name: exam.subject_name,
            grade_name: exam.grade_name,
            template_total_score: exam.template_total_score,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct StudentSummaryResponse {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) student_number: String,
    pub(crate) class_name: String,
}

impl From<StudentDescriptor> for StudentSummaryResponse {
    fn from(student: StudentDescriptor) -> Self {
        Self {
            id: student.id,
            name: student.name,
            student_number: student.student_number,
            class_name: student.class_name,
        }
    }
}

/// Single-student report. `total_max` is the sum of question max scores and
/// `exam.template_total_score` the template's declared total; both are kept.
#[derive(Debug, Serialize)]
pub(crate) struct StudentReportResponse {
    pub(crate) exam: ExamSummaryResponse,
    pub(crate) student: StudentSummaryResponse,
    #[serde(flatten)]
    pub(crate) report: StudentReport,
}

impl From<StudentReportView> for StudentReportResponse {
    fn from(view: StudentReportView) -> Self {
        Self { exam: view.exam.into(), student: view.student.into(), report: view.report }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct ExamReportsResponse {
    pub(crate) exam: ExamSummaryResponse,
    pub(crate) reports: Vec<StudentReport>,
}

impl From<ExamReportsView> for ExamReportsResponse {
    fn from(view: ExamReportsView) -> Self {
        Self { exam: view.exam.into(), reports: view.reports }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ExamStatisticsResponse {
    pub(crate) exam_id: String,
    #[serde(flatten)]
    pub(crate) statistics: ExamStatistics,
}

#[derive(Debug, Serialize)]
pub(crate) struct ReportCardResponse {
    pub(crate) id: String,
    pub(crate) exam_id: String,
    pub(crate) student_id: String,
    pub(crate) total_score: f64,
    pub(crate) percentage: f64,
    pub(crate) class_rank: Option<i32>,
    pub(crate) grade_rank: Option<i32>,
    pub(crate) teacher_comment: Option<String>,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
}

impl From<ReportCard> for ReportCardResponse {
    fn from(card: ReportCard) -> Self {
        Self {
            id: card.id,
            exam_id: card.exam_id,
            student_id: card.student_id,
            total_score: card.total_score,
            percentage: card.percentage,
            class_rank: card.class_rank,
            grade_rank: card.grade_rank,
            teacher_comment: card.teacher_comment,
            created_at: format_primitive(card.created_at),
            updated_at: format_primitive(card.updated_at),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateReportCardsResponse {
    pub(crate) success: bool,
    pub(crate) count: usize,
    pub(crate) report_cards: Vec<ReportCardResponse>,
}
