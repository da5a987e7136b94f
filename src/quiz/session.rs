//! Quiz-taking state: answer selection and scoring.

use super::{answer_label, Quiz};
use crate::error::{Result, VidlensError};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info};

/// Feedback for one question after submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionFeedback {
    /// Question text as stored, including its label.
    pub question: String,
    /// The user's answer letter, empty if unanswered.
    pub given: String,
    /// The expected answer letter.
    pub correct: String,
    pub is_correct: bool,
}

impl fmt::Display for QuestionFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_correct {
            write!(f, "Correct: {} - Answer: {}", self.question, self.correct)
        } else {
            write!(
                f,
                "Incorrect: {} - Your answer: {} - Correct answer: {}",
                self.question, self.given, self.correct
            )
        }
    }
}

/// Outcome of submitting a quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub feedback: Vec<QuestionFeedback>,
}

impl QuizResult {
    /// Score banner, e.g. "You scored 7 out of 10!".
    pub fn headline(&self) -> String {
        format!("You scored {} out of {}!", self.score, self.total)
    }
}

/// Phase of a quiz that has been generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizPhase {
    /// Answers are being collected.
    Active,
    /// The quiz was scored with the answers at submission time.
    Submitted(QuizResult),
}

/// A generated quiz together with the user's answers.
///
/// Creating a new `QuizSession` is the only way to reset answers; a fresh
/// quiz always starts with every answer empty.
#[derive(Debug, Clone)]
pub struct QuizSession {
    quiz: Quiz,
    answers: Vec<String>,
    phase: QuizPhase,
}

impl QuizSession {
    /// Start collecting answers for `quiz`.
    pub fn new(quiz: Quiz) -> Self {
        let answers = vec![String::new(); quiz.len()];
        Self {
            quiz,
            answers,
            phase: QuizPhase::Active,
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// Current answer letters, parallel to the questions.
    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn phase(&self) -> &QuizPhase {
        &self.phase
    }

    /// The last submission result, if the quiz is currently submitted.
    pub fn result(&self) -> Option<&QuizResult> {
        match &self.phase {
            QuizPhase::Submitted(result) => Some(result),
            QuizPhase::Active => None,
        }
    }

    /// Record the option at `position` as the answer to question `index`.
    ///
    /// Overwrites any earlier answer for that question. Selecting after a
    /// submission returns the quiz to the active phase.
    pub fn select(&mut self, index: usize, position: usize) -> Result<()> {
        let question = self.quiz.get(index).ok_or_else(|| {
            VidlensError::InvalidInput(format!(
                "Question {} does not exist (quiz has {} questions)",
                index + 1,
                self.quiz.len()
            ))
        })?;

        if position >= question.options.len() {
            return Err(VidlensError::InvalidInput(format!(
                "Question {} has no option {}",
                index + 1,
                position + 1
            )));
        }

        let label = answer_label(position).ok_or_else(|| {
            VidlensError::InvalidInput(format!("Option {} has no answer letter", position + 1))
        })?;

        debug!("Question {} answered with {}", index + 1, label);
        self.answers[index] = label;
        self.phase = QuizPhase::Active;
        Ok(())
    }

    /// Score the current answers. Submitting again recomputes the result.
    pub fn submit(&mut self) -> QuizResult {
        let feedback: Vec<QuestionFeedback> = self
            .quiz
            .iter()
            .zip(&self.answers)
            .map(|(q, given)| QuestionFeedback {
                question: q.text.clone(),
                given: given.clone(),
                correct: q.correct.clone(),
                is_correct: *given == q.correct,
            })
            .collect();

        let result = QuizResult {
            score: self.quiz.score(&self.answers),
            total: self.quiz.len(),
            feedback,
        };

        info!("Quiz submitted: {}/{}", result.score, result.total);
        self.phase = QuizPhase::Submitted(result.clone());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::Question;

    fn question(n: usize, correct: &str) -> Question {
        Question {
            text: format!("Q{}: question {}", n, n),
            options: vec![
                "a) one".to_string(),
                "b) two".to_string(),
                "c) three".to_string(),
                "d) four".to_string(),
            ],
            correct: correct.to_string(),
        }
    }

    fn session(correct: &[&str]) -> QuizSession {
        let questions = correct
            .iter()
            .enumerate()
            .map(|(i, c)| question(i + 1, c))
            .collect();
        QuizSession::new(Quiz::new(questions))
    }

    #[test]
    fn test_new_session_has_empty_answers() {
        let s = session(&["a", "b", "c"]);
        assert_eq!(s.answers(), &["", "", ""]);
        assert_eq!(s.phase(), &QuizPhase::Active);
        assert!(s.result().is_none());
    }

    #[test]
    fn test_select_maps_position_to_letter() {
        let mut s = session(&["a", "b"]);
        s.select(1, 3).unwrap();
        s.select(0, 0).unwrap();
        assert_eq!(s.answers(), &["a", "d"]);
    }

    #[test]
    fn test_reselect_overwrites_only_that_question() {
        let mut s = session(&["a", "b", "c"]);
        s.select(0, 1).unwrap();
        s.select(2, 2).unwrap();
        s.select(0, 3).unwrap();
        assert_eq!(s.answers(), &["d", "", "c"]);
    }

    #[test]
    fn test_select_out_of_range_is_rejected() {
        let mut s = session(&["a"]);
        assert!(matches!(s.select(1, 0), Err(VidlensError::InvalidInput(_))));
        assert!(matches!(s.select(0, 4), Err(VidlensError::InvalidInput(_))));
        assert_eq!(s.answers(), &[""]);
    }

    #[test]
    fn test_question_without_options_cannot_be_answered() {
        let mut s = QuizSession::new(Quiz::new(vec![Question::new("Q1: bare")]));
        assert!(s.select(0, 0).is_err());
    }

    #[test]
    fn test_submit_scores_and_reports_feedback() {
        let mut s = session(&["b", "a"]);
        s.select(0, 1).unwrap();
        s.select(1, 2).unwrap();

        let result = s.submit();

        assert_eq!(result.score, 1);
        assert_eq!(result.total, 2);
        assert_eq!(result.headline(), "You scored 1 out of 2!");
        assert!(result.feedback[0].is_correct);
        assert_eq!(
            result.feedback[0].to_string(),
            "Correct: Q1: question 1 - Answer: b"
        );
        assert!(!result.feedback[1].is_correct);
        assert_eq!(
            result.feedback[1].to_string(),
            "Incorrect: Q2: question 2 - Your answer: c - Correct answer: a"
        );
        assert_eq!(s.result(), Some(&result));
    }

    #[test]
    fn test_resubmit_is_idempotent() {
        let mut s = session(&["a", "b"]);
        s.select(0, 0).unwrap();
        let first = s.submit();
        let second = s.submit();
        assert_eq!(first, second);
    }

    #[test]
    fn test_select_after_submit_reactivates() {
        let mut s = session(&["a"]);
        s.submit();
        assert!(s.result().is_some());

        s.select(0, 0).unwrap();
        assert_eq!(s.phase(), &QuizPhase::Active);
        assert_eq!(s.submit().score, 1);
    }

    #[test]
    fn test_empty_quiz_scores_zero_of_zero() {
        let mut s = QuizSession::new(Quiz::default());
        let result = s.submit();
        assert_eq!(result.score, 0);
        assert_eq!(result.total, 0);
        assert!(result.feedback.is_empty());
    }
}
