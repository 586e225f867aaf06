use std::cmp::Ordering;

use crate::core::config::RankingPolicy;
use crate::db::models::ReportCardDraft;

use super::aggregator::StudentReport;
use super::stats::{percentage, round2};

/// Orders students by total descending and assigns class ranks under `policy`.
///
/// The sort is stable, so equal totals keep the order in which the reports were
/// given. Percentages are taken against the template's declared total score.
pub(crate) fn build_report_cards(
    exam_id: &str,
    reports: &[StudentReport],
    template_total_score: f64,
    policy: RankingPolicy,
) -> Vec<ReportCardDraft> {
    let mut ranked: Vec<&StudentReport> = reports.iter().collect();
    ranked.sort_by(|left, right| {
        right.total_earned.partial_cmp(&left.total_earned).unwrap_or(Ordering::Equal)
    });

    let mut drafts = Vec::with_capacity(ranked.len());
    let mut previous: Option<(f64, i32)> = None;

    for (index, report) in ranked.into_iter().enumerate() {
        let position = index as i32 + 1;
        let class_rank = match (policy, previous) {
            (RankingPolicy::Competition, Some((total, rank))) if total == report.total_earned => rank,
            _ => position,
        };
        previous = Some((report.total_earned, class_rank));

        drafts.push(ReportCardDraft {
            exam_id: exam_id.to_string(),
            student_id: report.student_id.clone(),
            total_score: round2(report.total_earned),
            percentage: percentage(report.total_earned, template_total_score),
            class_rank,
            grade_rank: None,
        });
    }

    drafts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranks(drafts: &[ReportCardDraft]) -> Vec<(String, i32)> {
        drafts.iter().map(|draft| (draft.student_id.clone(), draft.class_rank)).collect()
    }

    #[test]
    fn scenario_b_ranks_and_percentages() {
        let reports =
            vec![StudentReport::empty("a", 42.0, 50.0), StudentReport::empty("b", 47.0, 50.0)];

        let drafts = build_report_cards("exam-1", &reports, 50.0, RankingPolicy::Sequential);

        assert_eq!(drafts[0].student_id, "b");
        assert_eq!(drafts[0].class_rank, 1);
        assert_eq!(drafts[0].percentage, 94.0);
        assert_eq!(drafts[1].student_id, "a");
        assert_eq!(drafts[1].class_rank, 2);
        assert_eq!(drafts[1].percentage, 84.0);
        assert!(drafts.iter().all(|draft| draft.grade_rank.is_none()));
        assert!(drafts.iter().all(|draft| draft.exam_id == "exam-1"));
    }

    #[test]
    fn sequential_ranks_are_a_permutation_even_with_ties() {
        let reports = vec![
            StudentReport::empty("s1", 30.0, 50.0),
            StudentReport::empty("s2", 45.0, 50.0),
            StudentReport::empty("s3", 45.0, 50.0),
            StudentReport::empty("s4", 10.0, 50.0),
            StudentReport::empty("s5", 45.0, 50.0),
        ];

        let drafts = build_report_cards("exam-1", &reports, 50.0, RankingPolicy::Sequential);
        let mut seen: Vec<i32> = drafts.iter().map(|draft| draft.class_rank).collect();
        seen.sort_unstable();

        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
        assert_eq!(
            ranks(&drafts),
            vec![
                ("s2".to_string(), 1),
                ("s3".to_string(), 2),
                ("s5".to_string(), 3),
                ("s1".to_string(), 4),
                ("s4".to_string(), 5),
            ]
        );
        for pair in drafts.windows(2) {
            assert!(pair[0].total_score >= pair[1].total_score);
        }
    }

    #[test]
    fn competition_policy_shares_rank_and_skips() {
        let reports = vec![
            StudentReport::empty("s1", 40.0, 50.0),
            StudentReport::empty("s2", 35.0, 50.0),
            StudentReport::empty("s3", 35.0, 50.0),
            StudentReport::empty("s4", 20.0, 50.0),
        ];

        let drafts = build_report_cards("exam-1", &reports, 50.0, RankingPolicy::Competition);

        assert_eq!(
            ranks(&drafts),
            vec![
                ("s1".to_string(), 1),
                ("s2".to_string(), 2),
                ("s3".to_string(), 2),
                ("s4".to_string(), 4),
            ]
        );
    }

    #[test]
    fn zero_template_total_gives_zero_percentage() {
        let reports = vec![StudentReport::empty("s1", 12.0, 0.0)];

        let drafts = build_report_cards("exam-1", &reports, 0.0, RankingPolicy::Sequential);

        assert_eq!(drafts[0].percentage, 0.0);
        assert_eq!(drafts[0].total_score, 12.0);
        assert_eq!(drafts[0].class_rank, 1);
    }

    #[test]
    fn rebuilding_from_same_reports_is_identical() {
        let reports = vec![
            StudentReport::empty("s1", 18.5, 40.0),
            StudentReport::empty("s2", 33.25, 40.0),
            StudentReport::empty("s3", 18.5, 40.0),
        ];

        let first = build_report_cards("exam-1", &reports, 40.0, RankingPolicy::Sequential);
        let second = build_report_cards("exam-1", &reports, 40.0, RankingPolicy::Sequential);

        assert_eq!(first, second);
    }

    #[test]
    fn no_reports_no_cards() {
        assert!(build_report_cards("exam-1", &[], 50.0, RankingPolicy::Competition).is_empty());
    }
}
