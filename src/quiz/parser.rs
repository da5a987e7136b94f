//! Line-oriented parser for model-generated quiz text.
//!
//! Expected block format:
//!
//! ```text
//! Q1: What is 2+2?
//! a) 3
//! b) 4
//! c) 5
//! d) 6
//! Correct: b
//! ```
//!
//! Parsing never fails. Lines before the first question, blank lines and
//! commentary are skipped; incomplete blocks are kept as they are.

use super::Question;
use tracing::{debug, info, warn};

const OPTION_PREFIXES: [&str; 4] = ["a)", "b)", "c)", "d)"];
const CORRECT_PREFIX: &str = "Correct:";

/// Parse quiz text into questions, in the order they appear.
pub fn parse_quiz(text: &str) -> Vec<Question> {
    let mut questions = Vec::new();
    let mut current: Option<Question> = None;

    for line in text.lines().map(str::trim) {
        if line.starts_with('Q') {
            if let Some(question) = current.take() {
                questions.push(question);
            }
            current = Some(Question::new(line));
        } else if OPTION_PREFIXES.iter().any(|p| line.starts_with(p)) {
            if let Some(question) = current.as_mut() {
                question.options.push(line.to_string());
            }
        } else if line.starts_with(CORRECT_PREFIX) {
            if let Some(question) = current.as_mut() {
                question.correct = parse_correct(line);
            }
        }
    }

    if let Some(question) = current {
        questions.push(question);
    }

    if questions.is_empty() {
        warn!("No questions were parsed from the quiz text.");
    } else {
        info!("Parsed {} questions", questions.len());
        debug!("Parsed questions: {:?}", questions);
    }

    questions
}

/// The answer letter of a `Correct:` line: the text after the first colon up
/// to any further colon, trimmed, with one trailing `)` removed.
fn parse_correct(line: &str) -> String {
    let answer = line.split(':').nth(1).map(str::trim).unwrap_or_default();
    answer.strip_suffix(')').unwrap_or(answer).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(n: usize, correct: Option<&str>) -> String {
        let mut text = format!(
            "Q{n}: Question number {n}?\na) first\nb) second\nc) third\nd) fourth\n"
        );
        if let Some(letter) = correct {
            text.push_str(&format!("Correct: {}\n", letter));
        }
        text
    }

    #[test]
    fn test_single_question() {
        let questions = parse_quiz("Q1: What is 2+2?\na) 3\nb) 4\nc) 5\nd) 6\nCorrect: b)");

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].text, "Q1: What is 2+2?");
        assert_eq!(questions[0].options, vec!["a) 3", "b) 4", "c) 5", "d) 6"]);
        assert_eq!(questions[0].correct, "b");
    }

    #[test]
    fn test_ten_well_formed_blocks() {
        let letters = ["a", "b", "c", "d"];
        let text = (1..=10)
            .map(|n| block(n, Some(letters[n % 4])))
            .collect::<Vec<_>>()
            .join("\n");

        let questions = parse_quiz(&text);

        assert_eq!(questions.len(), 10);
        for (i, q) in questions.iter().enumerate() {
            assert!(q.text.starts_with(&format!("Q{}:", i + 1)));
            assert_eq!(q.options.len(), 4);
            assert_eq!(q.correct, letters[(i + 1) % 4]);
        }
    }

    #[test]
    fn test_missing_correct_line_only_affects_its_block() {
        let text = [block(1, Some("a")), block(2, None), block(3, Some("c)"))].join("\n");

        let questions = parse_quiz(&text);

        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].correct, "a");
        assert_eq!(questions[1].correct, "");
        assert_eq!(questions[1].options.len(), 4);
        assert_eq!(questions[2].correct, "c");
    }

    #[test]
    fn test_no_question_lines_yields_empty() {
        assert!(parse_quiz("").is_empty());
        assert!(parse_quiz("   \n\n").is_empty());
        assert!(parse_quiz("a) orphan option\nCorrect: a\nSorry, I can't do that.").is_empty());
    }

    #[test]
    fn test_lines_before_first_question_are_dropped() {
        let text = "Here is your quiz:\na) stray\nCorrect: d\n\nQ1: Real?\na) yes\nb) no";
        let questions = parse_quiz(text);

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].options, vec!["a) yes", "b) no"]);
        assert_eq!(questions[0].correct, "");
    }

    #[test]
    fn test_short_question_kept_as_is() {
        let questions = parse_quiz("Q1: Two options\na) one\nb) two\nCorrect: b\nQ2: None\nCorrect: a");

        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].options.len(), 2);
        assert!(questions[1].options.is_empty());
        assert_eq!(questions[1].correct, "a");
    }

    #[test]
    fn test_indentation_and_crlf_are_trimmed() {
        let text = "  Q1: Indented?\r\n    a) yes\r\n    b) no\r\n  Correct:   a)  \r\n";
        let questions = parse_quiz(text);

        assert_eq!(questions[0].text, "Q1: Indented?");
        assert_eq!(questions[0].options, vec!["a) yes", "b) no"]);
        assert_eq!(questions[0].correct, "a");
    }

    #[test]
    fn test_prefixes_are_case_sensitive() {
        let text = "q1: lowercase does not start a question\nQ1: Upper\nA) capital option\na) ok\ncorrect: b";
        let questions = parse_quiz(text);

        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].options, vec!["a) ok"]);
        assert_eq!(questions[0].correct, "");
    }

    #[test]
    fn test_correct_takes_text_between_first_and_second_colon() {
        assert_eq!(parse_correct("Correct: b)"), "b");
        assert_eq!(parse_correct("Correct:c"), "c");
        assert_eq!(parse_correct("Correct: a))"), "a)");
        assert_eq!(parse_correct("Correct: b: because"), "b");
        assert_eq!(parse_correct("Correct: c) : see above"), "c");
        assert_eq!(parse_correct("Correct:"), "");
    }

    #[test]
    fn test_explained_answer_still_scores() {
        let quiz = crate::quiz::Quiz::parse("Q1: Pick\na) x\nb) y\nCorrect: b: the second option");
        assert_eq!(quiz.get(0).unwrap().correct, "b");
        assert_eq!(quiz.score(&["b".to_string()]), 1);
    }

    #[test]
    fn test_later_correct_line_overwrites() {
        let questions = parse_quiz("Q1: Twice\na) x\nCorrect: a\nCorrect: d");
        assert_eq!(questions[0].correct, "d");
    }
}
