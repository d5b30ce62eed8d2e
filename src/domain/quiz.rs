//! Quiz configuration parsing and grading.
//!
//! Quiz tasks store their correct answers in the task's
//! `learn_questions` JSON column. A quiz with a null or missing
//! correct-answer configuration is an invalid task and is rejected
//! rather than silently treated as always-correct.

use serde_json::Value;

use super::task::Task;
use crate::error::QuestError;

/// Default passing score (percent) when the task does not set one.
pub const DEFAULT_PASSING_SCORE: u32 = 80;

/// Parsed quiz configuration for one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSpec {
    /// Correct answer indices. One element for single-select.
    pub correct_answers: Vec<usize>,
    /// Whether more than one answer must be selected.
    pub multi_select: bool,
    /// Minimum score (percent) required to pass.
    pub passing_score: u32,
}

/// Outcome of grading one submitted answer set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizGrade {
    /// Whether the submission meets the passing score.
    pub passed: bool,
    /// Score in percent (all-or-nothing per question set).
    pub score: u32,
}

impl QuizSpec {
    /// Extracts the quiz configuration from a task's `learn_questions`
    /// column.
    ///
    /// Accepts either the current shape
    /// `{"correctAnswers": [0, 2], "multiSelect": true}` or the legacy
    /// single-answer shape `{"correctAnswer": 1}`.
    ///
    /// # Errors
    ///
    /// Returns [`QuestError::InvalidTaskConfig`] when the column is null,
    /// not an object, or names no correct answer.
    pub fn from_task(task: &Task) -> Result<Self, QuestError> {
        let config = task
            .learn_questions
            .as_ref()
            .filter(|v| !v.is_null())
            .ok_or_else(|| {
                QuestError::InvalidTaskConfig(format!(
                    "quiz task {} has no correct-answer configuration",
                    task.id
                ))
            })?;

        let passing_score = task.learn_passing_score.unwrap_or(DEFAULT_PASSING_SCORE);

        let correct_answers: Vec<usize> =
            if let Some(list) = config.get("correctAnswers").and_then(Value::as_array) {
                list.iter()
                    .map(|v| v.as_u64().map(|n| n as usize))
                    .collect::<Option<Vec<_>>>()
                    .ok_or_else(|| {
                        QuestError::InvalidTaskConfig(format!(
                            "quiz task {} has non-integer correct answers",
                            task.id
                        ))
                    })?
            } else if let Some(single) = config.get("correctAnswer").and_then(Value::as_u64) {
                vec![single as usize]
            } else {
                return Err(QuestError::InvalidTaskConfig(format!(
                    "quiz task {} names no correct answer",
                    task.id
                )));
            };

        if correct_answers.is_empty() {
            return Err(QuestError::InvalidTaskConfig(format!(
                "quiz task {} has an empty correct-answer list",
                task.id
            )));
        }

        let multi_select = config
            .get("multiSelect")
            .and_then(Value::as_bool)
            .unwrap_or(correct_answers.len() > 1);

        Ok(Self {
            correct_answers,
            multi_select,
            passing_score,
        })
    }

    /// Grades a submitted answer set.
    ///
    /// Single-select: exactly one answer matching the configured one.
    /// Multi-select: the submitted set must equal the configured set,
    /// order-independent, with no extras and no omissions.
    #[must_use]
    pub fn grade(&self, answers: &[usize]) -> QuizGrade {
        let correct = if self.multi_select {
            let mut submitted: Vec<usize> = answers.to_vec();
            let mut expected = self.correct_answers.clone();
            submitted.sort_unstable();
            submitted.dedup();
            expected.sort_unstable();
            expected.dedup();
            submitted == expected
        } else {
            answers.len() == 1 && answers.first() == self.correct_answers.first()
        };

        let score = if correct { 100 } else { 0 };
        QuizGrade {
            passed: score >= self.passing_score,
            score,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::ids::{QuestId, TaskId};
    use crate::domain::task::TaskKind;

    fn quiz_task(config: Option<serde_json::Value>) -> Task {
        Task {
            id: TaskId::new(),
            quest_id: QuestId::new(),
            title: "Protocol quiz".to_string(),
            kind: TaskKind::Learn,
            xp_reward: 100,
            order_index: 0,
            social_platform: None,
            social_action: None,
            social_url: None,
            social_username: None,
            social_post_id: None,
            learn_questions: config,
            learn_passing_score: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn single_select_grading() {
        let task = quiz_task(Some(serde_json::json!({ "correctAnswers": [1] })));
        let Ok(spec) = QuizSpec::from_task(&task) else {
            panic!("valid config");
        };
        assert!(spec.grade(&[1]).passed);
        assert!(!spec.grade(&[0]).passed);
        assert!(!spec.grade(&[1, 2]).passed);
        assert!(!spec.grade(&[]).passed);
    }

    #[test]
    fn multi_select_is_order_independent_set_equality() {
        let task = quiz_task(Some(
            serde_json::json!({ "correctAnswers": [0, 2], "multiSelect": true }),
        ));
        let Ok(spec) = QuizSpec::from_task(&task) else {
            panic!("valid config");
        };
        assert!(spec.grade(&[0, 2]).passed);
        assert!(spec.grade(&[2, 0]).passed);
        assert!(!spec.grade(&[0]).passed);
        assert!(!spec.grade(&[0, 1, 2]).passed);
    }

    #[test]
    fn legacy_single_answer_shape() {
        let task = quiz_task(Some(serde_json::json!({ "correctAnswer": 3 })));
        let Ok(spec) = QuizSpec::from_task(&task) else {
            panic!("valid config");
        };
        assert_eq!(spec.correct_answers, vec![3]);
        assert!(!spec.multi_select);
        assert!(spec.grade(&[3]).passed);
    }

    #[test]
    fn null_config_is_rejected_not_auto_correct() {
        for config in [None, Some(serde_json::Value::Null)] {
            let task = quiz_task(config);
            let result = QuizSpec::from_task(&task);
            assert!(matches!(result, Err(QuestError::InvalidTaskConfig(_))));
        }
    }

    #[test]
    fn empty_answer_list_is_rejected() {
        let task = quiz_task(Some(serde_json::json!({ "correctAnswers": [] })));
        assert!(QuizSpec::from_task(&task).is_err());
    }

    #[test]
    fn grade_respects_passing_score() {
        let mut task = quiz_task(Some(serde_json::json!({ "correctAnswers": [1] })));
        task.learn_passing_score = Some(100);
        let Ok(spec) = QuizSpec::from_task(&task) else {
            panic!("valid config");
        };
        let grade = spec.grade(&[1]);
        assert!(grade.passed);
        assert_eq!(grade.score, 100);
    }
}
