//! Scoring submitted answers against a stored answer key.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::bank::Question;

/// One answer as sent by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedAnswer {
    #[serde(default)]
    pub question_id: i64,
    #[serde(default)]
    pub choice: i64,
}

/// Per-question review entry returned after grading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewItem {
    pub question_id: u32,
    pub question: String,
    pub options: Vec<String>,
    pub correct_choice: i32,
    pub user_choice: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeReport {
    pub score: usize,
    /// Size of the whole stored set, not of the submission.
    pub total: usize,
    /// In submission order.
    pub results: Vec<ReviewItem>,
}

/// Grade `answers` against `questions`.
///
/// Answers naming a question outside the set are ignored. Every other answer
/// gets a review item, but a question scores at most once per submission.
pub fn grade(questions: &[Question], answers: &[SubmittedAnswer]) -> GradeReport {
    let by_id: HashMap<u32, &Question> = questions.iter().map(|q| (q.id, q)).collect();
    let mut scored = HashSet::with_capacity(answers.len());

    let mut score = 0;
    let mut results = Vec::with_capacity(answers.len());

    for answer in answers {
        let Some(question) = u32::try_from(answer.question_id)
            .ok()
            .and_then(|id| by_id.get(&id))
        else {
            continue;
        };
        if answer.choice == i64::from(question.answer) && scored.insert(question.id) {
            score += 1;
        }
        results.push(ReviewItem {
            question_id: question.id,
            question: question.question.clone(),
            options: question.options.clone(),
            correct_choice: question.answer,
            user_choice: answer.choice,
        });
    }

    GradeReport {
        score,
        total: questions.len(),
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::NO_ANSWER;

    fn q(id: u32, answer: i32) -> Question {
        Question {
            id,
            question: format!("Q{id}"),
            options: vec!["a".into(), "b".into(), "c".into()],
            answer,
        }
    }

    fn a(question_id: i64, choice: i64) -> SubmittedAnswer {
        SubmittedAnswer {
            question_id,
            choice,
        }
    }

    #[test]
    fn test_single_correct_answer() {
        let questions = vec![Question {
            id: 1,
            question: "first".into(),
            options: vec!["a".into(), "b".into()],
            answer: 0,
        }];

        let report = grade(&questions, &[a(1, 0)]);
        assert_eq!(report.score, 1);
        assert_eq!(report.total, 1);
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].correct_choice, 0);
        assert_eq!(report.results[0].user_choice, 0);
    }

    #[test]
    fn test_wrong_answer_still_reviewed() {
        let report = grade(&[q(1, 2)], &[a(1, 0)]);
        assert_eq!(report.score, 0);
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].correct_choice, 2);
        assert_eq!(report.results[0].user_choice, 0);
    }

    #[test]
    fn test_unknown_question_is_skipped() {
        let questions = vec![q(1, 0), q(2, 1)];
        let report = grade(&questions, &[a(999, 0), a(2, 1), a(-4, 0)]);

        assert_eq!(report.score, 1);
        assert_eq!(report.total, 2);
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].question_id, 2);
    }

    #[test]
    fn test_total_counts_whole_set() {
        let questions = vec![q(1, 0), q(2, 0), q(3, 0)];
        let report = grade(&questions, &[a(1, 0)]);
        assert_eq!(report.score, 1);
        assert_eq!(report.total, 3);

        let empty = grade(&questions, &[]);
        assert_eq!(empty.score, 0);
        assert_eq!(empty.total, 3);
        assert!(empty.results.is_empty());
    }

    #[test]
    fn test_results_follow_submission_order() {
        let questions = vec![q(1, 0), q(2, 0), q(3, 0)];
        let report = grade(&questions, &[a(3, 0), a(1, 1), a(2, 0)]);
        let order: Vec<u32> = report.results.iter().map(|r| r.question_id).collect();
        assert_eq!(order, vec![3, 1, 2]);
        assert_eq!(report.score, 2);
    }

    #[test]
    fn test_sentinel_question_passes_through() {
        let report = grade(&[q(5, NO_ANSWER)], &[a(5, 0)]);
        assert_eq!(report.score, 0);
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].correct_choice, NO_ANSWER);
    }

    #[test]
    fn test_repeated_answer_scores_once() {
        let report = grade(&[q(1, 0)], &[a(1, 0), a(1, 0), a(1, 1)]);
        assert_eq!(report.score, 1);
        assert_eq!(report.total, 1);
        assert_eq!(report.results.len(), 3);
        let choices: Vec<i64> = report.results.iter().map(|r| r.user_choice).collect();
        assert_eq!(choices, vec![0, 0, 1]);
        assert!(report.score <= report.total);
    }

    #[test]
    fn test_repeated_answer_right_after_wrong_scores() {
        let report = grade(&[q(1, 0)], &[a(1, 1), a(1, 0)]);
        assert_eq!(report.score, 1);
        assert_eq!(report.results.len(), 2);
        let choices: Vec<i64> = report.results.iter().map(|r| r.user_choice).collect();
        assert_eq!(choices, vec![1, 0]);
    }

    #[test]
    fn test_grading_is_idempotent() {
        let questions = vec![q(1, 0), q(2, 1), q(3, 2)];
        let answers = vec![a(1, 0), a(2, 2), a(42, 0), a(3, 2)];
        assert_eq!(grade(&questions, &answers), grade(&questions, &answers));
    }
}
