use serde::{Deserialize, Serialize};

use super::aggregator::StudentReport;

/// Bucket used for questions without a module or knowledge point.
pub(crate) const UNCLASSIFIED_LABEL: &str = "未分类";

/// Rounds to two decimals; non-finite input collapses to zero.
pub(crate) fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// `earned / possible * 100` rounded to two decimals, or zero for an empty or
/// degenerate denominator.
pub(crate) fn percentage(earned: f64, possible: f64) -> f64 {
    if possible <= 0.0 || !possible.is_finite() {
        return 0.0;
    }
    round2(earned / possible * 100.0)
}

pub(crate) fn group_label(label: Option<&str>) -> &str {
    match label {
        Some(value) if !value.trim().is_empty() => value,
        _ => UNCLASSIFIED_LABEL,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct StudentTotal {
    pub(crate) student_id: String,
    pub(crate) total_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ExamStatistics {
    pub(crate) total_students: usize,
    pub(crate) average_score: f64,
    pub(crate) max_score: f64,
    pub(crate) min_score: f64,
    pub(crate) student_scores: Vec<StudentTotal>,
}

pub(crate) fn exam_statistics(reports: &[StudentReport]) -> ExamStatistics {
    let student_scores: Vec<StudentTotal> = reports
        .iter()
        .map(|report| StudentTotal {
            student_id: report.student_id.clone(),
            total_score: report.total_earned,
        })
        .collect();

    if student_scores.is_empty() {
        return ExamStatistics {
            total_students: 0,
            average_score: 0.0,
            max_score: 0.0,
            min_score: 0.0,
            student_scores,
        };
    }

    let totals = student_scores.iter().map(|item| item.total_score);
    let sum: f64 = totals.clone().sum();
    let max_score = totals.clone().fold(f64::MIN, f64::max);
    let min_score = totals.fold(f64::MAX, f64::min);

    ExamStatistics {
        total_students: student_scores.len(),
        average_score: round2(sum / student_scores.len() as f64),
        max_score: round2(max_score),
        min_score: round2(min_score),
        student_scores,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_handles_half_and_non_finite() {
        assert_eq!(round2(84.0), 84.0);
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(12.346), 12.35);
        assert_eq!(round2(f64::NAN), 0.0);
        assert_eq!(round2(f64::INFINITY), 0.0);
        assert_eq!(round2(-0.001), 0.0);
    }

    #[test]
    fn percentage_guards_zero_denominator() {
        assert_eq!(percentage(17.0, 20.0), 85.0);
        assert_eq!(percentage(5.0, 0.0), 0.0);
        assert_eq!(percentage(0.0, 0.0), 0.0);
        assert_eq!(percentage(5.0, -10.0), 0.0);
        assert_eq!(percentage(5.0, f64::NAN), 0.0);
    }

    #[test]
    fn group_label_falls_back_to_unclassified() {
        assert_eq!(group_label(Some("应用题")), "应用题");
        assert_eq!(group_label(None), UNCLASSIFIED_LABEL);
        assert_eq!(group_label(Some("")), UNCLASSIFIED_LABEL);
        assert_eq!(group_label(Some("   ")), UNCLASSIFIED_LABEL);
    }

    #[test]
    fn exam_statistics_empty_is_zeroed() {
        let stats = exam_statistics(&[]);
        assert_eq!(stats.total_students, 0);
        assert_eq!(stats.average_score, 0.0);
        assert_eq!(stats.max_score, 0.0);
        assert_eq!(stats.min_score, 0.0);
    }

    #[test]
    fn exam_statistics_summarises_totals() {
        let reports = vec![
            StudentReport::empty("s1", 42.0, 50.0),
            StudentReport::empty("s2", 47.0, 50.0),
            StudentReport::empty("s3", 30.5, 50.0),
        ];

        let stats = exam_statistics(&reports);
        assert_eq!(stats.total_students, 3);
        assert_eq!(stats.average_score, 39.83);
        assert_eq!(stats.max_score, 47.0);
        assert_eq!(stats.min_score, 30.5);
        assert_eq!(stats.student_scores[1].student_id, "s2");
    }
}
