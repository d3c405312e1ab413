//! Quiz question type.

use serde::{Deserialize, Serialize};

/// Number of questions in a generated quiz.
pub const QUIZ_LENGTH: usize = 5;

/// Number of options per question.
pub const QUIZ_OPTION_COUNT: usize = 4;

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// Question text
    pub question: String,

    /// Answer options, in display order
    pub options: Vec<String>,

    /// The option that is correct; equals one of `options`
    pub correct_answer: String,
}

impl QuizQuestion {
    /// Create a new question.
    pub fn new(
        question: impl Into<String>,
        options: impl IntoIterator<Item = impl Into<String>>,
        correct_answer: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            options: options.into_iter().map(Into::into).collect(),
            correct_answer: correct_answer.into(),
        }
    }

    /// Check whether `option` is one of this question's options.
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    /// Check whether `answer` is the correct one.
    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_answer == answer
    }

    /// Index of the correct option, if present.
    pub fn correct_index(&self) -> Option<usize> {
        self.options.iter().position(|o| *o == self.correct_answer)
    }

    /// Shape violations, or `None` when the question is well formed.
    pub fn validate(&self) -> Option<String> {
        if self.question.trim().is_empty() {
            return Some("question text is empty".to_string());
        }
        if self.options.len() != QUIZ_OPTION_COUNT {
            return Some(format!(
                "expected {} options, got {}",
                QUIZ_OPTION_COUNT,
                self.options.len()
            ));
        }
        if !self.has_option(&self.correct_answer) {
            return Some(format!(
                "correct answer {:?} is not among the options",
                self.correct_answer
            ));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QuizQuestion {
        QuizQuestion::new("2 + 2?", ["3", "4", "5", "6"], "4")
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["correctAnswer"], "4");
        assert!(json.get("correct_answer").is_none());
    }

    #[test]
    fn test_correct_index() {
        assert_eq!(sample().correct_index(), Some(1));
        assert!(sample().is_correct("4"));
        assert!(!sample().is_correct("5"));
    }

    #[test]
    fn test_validate() {
        assert_eq!(sample().validate(), None);

        let short = QuizQuestion::new("q", ["a", "b"], "a");
        assert!(short.validate().unwrap().contains("expected 4 options"));

        let orphan = QuizQuestion::new("q", ["a", "b", "c", "d"], "e");
        assert!(orphan.validate().unwrap().contains("not among the options"));
    }
}
