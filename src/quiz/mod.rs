//! Quiz model, parsing of generated quiz text, and quiz-taking state.

mod parser;
mod session;

pub use parser::parse_quiz;
pub use session::{QuestionFeedback, QuizPhase, QuizResult, QuizSession};

use serde::{Deserialize, Serialize};

/// A multiple-choice question as produced by the generator.
///
/// Malformed questions are represented as-is: fewer than four options, or an
/// empty `correct` label, are both possible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Question line including its label, e.g. "Q3: ...".
    pub text: String,
    /// Option lines including their letter label, e.g. "a) ...", in order.
    pub options: Vec<String>,
    /// Correct answer letter ("a".."d"), or empty if none was given.
    pub correct: String,
}

impl Question {
    /// Create a question with no options and no correct answer yet.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: Vec::new(),
            correct: String::new(),
        }
    }

    /// Option texts with the leading letter label removed.
    ///
    /// An option without a `") "` separator is shown in full.
    pub fn display_options(&self) -> Vec<&str> {
        self.options
            .iter()
            .map(|opt| opt.split_once(") ").map(|(_, text)| text).unwrap_or(opt.as_str()))
            .collect()
    }
}

/// Answer letter for an option position: 0 -> "a", 1 -> "b", ...
///
/// Returns `None` past "z".
pub fn answer_label(position: usize) -> Option<String> {
    u8::try_from(position)
        .ok()
        .filter(|p| *p < 26)
        .map(|p| char::from(b'a' + p).to_string())
}

/// An ordered list of questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub questions: Vec<Question>,
}

impl Quiz {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Parse model output into a quiz. Never fails; may be empty.
    pub fn parse(text: &str) -> Self {
        Self::new(parse_quiz(text))
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    /// Number of answers that exactly equal the question's correct label.
    pub fn score(&self, answers: &[String]) -> usize {
        self.questions
            .iter()
            .zip(answers)
            .filter(|(q, answer)| **answer == q.correct)
            .count()
    }
}
