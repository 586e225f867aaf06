use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::db::models::{Question, ScoreEntry};

use super::stats::{group_label, percentage, round2};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct QuestionScore {
    pub(crate) question_id: String,
    pub(crate) question_number: i32,
    pub(crate) module: Option<String>,
    pub(crate) knowledge_point: Option<String>,
    pub(crate) question_type: Option<String>,
    pub(crate) max_score: f64,
    pub(crate) student_score: f64,
}

/// One module or knowledge-point bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Breakdown {
    pub(crate) label: String,
    pub(crate) count: usize,
    pub(crate) earned: f64,
    pub(crate) max: f64,
    pub(crate) percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct StudentReport {
    pub(crate) student_id: String,
    pub(crate) total_earned: f64,
    pub(crate) total_max: f64,
    pub(crate) percentage: f64,
    pub(crate) question_scores: Vec<QuestionScore>,
    pub(crate) modules: Vec<Breakdown>,
    pub(crate) knowledge_points: Vec<Breakdown>,
}

/// Builds one report per student that has at least one entry for `exam_id`.
///
/// Every question of the template counts toward the denominator; a question the
/// student has no entry for scores zero. Entries for other exams or for questions
/// outside `questions` are dropped. Scores are taken as recorded, without clamping
/// to `[0, max_score]`.
pub(crate) fn aggregate(
    exam_id: &str,
    entries: &[ScoreEntry],
    questions: &[Question],
) -> Vec<StudentReport> {
    let mut ordered: Vec<&Question> = questions.iter().collect();
    ordered.sort_by_key(|question| question.sort_order);

    let known: HashSet<&str> = ordered.iter().map(|question| question.id.as_str()).collect();

    let mut students: Vec<(&str, HashMap<&str, f64>)> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut dropped = 0usize;

    for entry in entries {
        if entry.exam_id != exam_id {
            dropped += 1;
            continue;
        }

        let position = *positions.entry(entry.student_id.as_str()).or_insert_with(|| {
            students.push((entry.student_id.as_str(), HashMap::new()));
            students.len() - 1
        });

        if !known.contains(entry.question_id.as_str()) {
            dropped += 1;
            continue;
        }

        students[position].1.insert(entry.question_id.as_str(), entry.score);
    }

    if dropped > 0 {
        tracing::warn!(
            exam_id = %exam_id,
            dropped,
            "Ignoring score entries that do not belong to the exam template"
        );
    }

    students
        .into_iter()
        .map(|(student_id, scores)| build_student_report(exam_id, student_id, &ordered, &scores))
        .collect()
}

/// Report for a single student, or `None` when the student has no entry for the exam.
pub(crate) fn aggregate_student(
    exam_id: &str,
    student_id: &str,
    entries: &[ScoreEntry],
    questions: &[Question],
) -> Option<StudentReport> {
    let own: Vec<ScoreEntry> =
        entries.iter().filter(|entry| entry.student_id == student_id).cloned().collect();

    aggregate(exam_id, &own, questions).into_iter().next()
}

fn build_student_report(
    exam_id: &str,
    student_id: &str,
    questions: &[&Question],
    scores: &HashMap<&str, f64>,
) -> StudentReport {
    let mut total_earned = 0.0;
    let mut total_max = 0.0;
    let mut out_of_range = 0usize;
    let mut modules = Partition::default();
    let mut knowledge_points = Partition::default();
    let mut question_scores = Vec::with_capacity(questions.len());

    for question in questions {
        let earned = scores.get(question.id.as_str()).copied().unwrap_or(0.0);
        if earned < 0.0 || earned > question.max_score {
            out_of_range += 1;
        }

        total_earned += earned;
        total_max += question.max_score;
        modules.add(group_label(question.module.as_deref()), earned, question.max_score);
        knowledge_points.add(
            group_label(question.knowledge_point.as_deref()),
            earned,
            question.max_score,
        );

        question_scores.push(QuestionScore {
            question_id: question.id.clone(),
            question_number: question.question_number,
            module: question.module.clone(),
            knowledge_point: question.knowledge_point.clone(),
            question_type: question.question_type.clone(),
            max_score: round2(question.max_score),
            student_score: round2(earned),
        });
    }

    if out_of_range > 0 {
        tracing::warn!(
            exam_id = %exam_id,
            student_id = %student_id,
            out_of_range,
            "Scores outside [0, max_score] were aggregated as recorded"
        );
    }

    StudentReport {
        student_id: student_id.to_string(),
        total_earned: round2(total_earned),
        total_max: round2(total_max),
        percentage: percentage(total_earned, total_max),
        question_scores,
        modules: modules.finish(),
        knowledge_points: knowledge_points.finish(),
    }
}

/// Label-keyed sums kept in first-seen order.
#[derive(Default)]
struct Partition {
    buckets: Vec<Bucket>,
    index: HashMap<String, usize>,
}

struct Bucket {
    label: String,
    count: usize,
    earned: f64,
    max: f64,
}

impl Partition {
    fn add(&mut self, label: &str, earned: f64, max: f64) {
        let position = match self.index.get(label) {
            Some(position) => *position,
            None => {
                self.buckets.push(Bucket { label: label.to_string(), count: 0, earned: 0.0, max: 0.0 });
                self.index.insert(label.to_string(), self.buckets.len() - 1);
                self.buckets.len() - 1
            }
        };

        let bucket = &mut self.buckets[position];
        bucket.count += 1;
        bucket.earned += earned;
        bucket.max += max;
    }

    fn finish(self) -> Vec<Breakdown> {
        self.buckets
            .into_iter()
            .map(|bucket| Breakdown {
                percentage: percentage(bucket.earned, bucket.max),
                earned: round2(bucket.earned),
                max: round2(bucket.max),
                count: bucket.count,
                label: bucket.label,
            })
            .collect()
    }
}

#[cfg(test)]
impl StudentReport {
    pub(crate) fn empty(student_id: &str, total_earned: f64, total_max: f64) -> Self {
        Self {
            student_id: student_id.to_string(),
            total_earned,
            total_max,
            percentage: percentage(total_earned, total_max),
            question_scores: Vec::new(),
            modules: Vec::new(),
            knowledge_points: Vec::new(),
        }
    }
}
