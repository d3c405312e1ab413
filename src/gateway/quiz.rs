//! Quiz response schema and parsing.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::model::{QuizQuestion, QUIZ_LENGTH};

/// Response schema sent with quiz requests.
///
/// An object with one property, `quiz`, holding the question list.
pub fn quiz_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "quiz": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "question": { "type": "STRING" },
                        "options": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" }
                        },
                        "correctAnswer": { "type": "STRING" }
                    },
                    "required": ["question", "options", "correctAnswer"]
                }
            }
        },
        "required": ["quiz"]
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuizPayload {
    Wrapped { quiz: Vec<QuizQuestion> },
    Bare(Vec<QuizQuestion>),
}

impl QuizPayload {
    fn into_questions(self) -> Vec<QuizQuestion> {
        match self {
            QuizPayload::Wrapped { quiz } => quiz,
            QuizPayload::Bare(questions) => questions,
        }
    }
}

/// Parse and validate a quiz response.
///
/// Text that does not start with `{` or `[` after trimming is rejected
/// without attempting a parse.
pub fn parse_quiz(text: &str) -> Result<Vec<QuizQuestion>> {
    let trimmed = text.trim();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return Err(Error::QuizFormat(preview(trimmed)));
    }

    let payload: QuizPayload = serde_json::from_str(trimmed)?;
    let questions = payload.into_questions();
    validate_quiz(&questions)?;
    Ok(questions)
}

/// Check question count and per-question shape.
pub fn validate_quiz(questions: &[QuizQuestion]) -> Result<()> {
    if questions.len() != QUIZ_LENGTH {
        return Err(Error::InvalidQuiz(format!(
            "expected {} questions, got {}",
            QUIZ_LENGTH,
            questions.len()
        )));
    }

    for (index, question) in questions.iter().enumerate() {
        if let Some(problem) = question.validate() {
            return Err(Error::InvalidQuiz(format!("question {}: {}", index + 1, problem)));
        }
    }

    Ok(())
}

fn preview(text: &str) -> String {
    const MAX: usize = 40;
    match text.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question_json(n: usize) -> Value {
        json!({
            "question": format!("Question {n}?"),
            "options": ["A", "B", "C", "D"],
            "correctAnswer": "B"
        })
    }

    fn quiz_json(count: usize) -> Value {
        Value::Array((0..count).map(question_json).collect())
    }

    #[test]
    fn test_schema_shape() {
        let schema = quiz_schema();
        assert_eq!(schema["required"][0], "quiz");
        let item = &schema["properties"]["quiz"]["items"];
        assert!(item["properties"].get("correctAnswer").is_some());
    }

    #[test]
    fn test_parse_wrapped() {
        let text = json!({ "quiz": quiz_json(5) }).to_string();
        let questions = parse_quiz(&format!("  \n{}\n", text)).unwrap();
        assert_eq!(questions.len(), 5);
        assert_eq!(questions[0].correct_answer, "B");
    }

    #[test]
    fn test_parse_bare_array() {
        let questions = parse_quiz(&quiz_json(5).to_string()).unwrap();
        assert_eq!(questions[4].question, "Question 4?");
    }

    #[test]
    fn test_rejects_non_json_prefix() {
        let err = parse_quiz("```json\n{\"quiz\": []}\n```").unwrap_err();
        assert!(matches!(err, Error::QuizFormat(_)));

        let err = parse_quiz("Sorry, I cannot do that.").unwrap_err();
        assert!(matches!(err, Error::QuizFormat(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = parse_quiz("{\"quiz\": [").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn test_rejects_wrong_count() {
        let text = json!({ "quiz": quiz_json(3) }).to_string();
        let err = parse_quiz(&text).unwrap_err();
        assert!(err.to_string().contains("expected 5 questions, got 3"));
    }

    #[test]
    fn test_rejects_answer_outside_options() {
        let mut quiz = quiz_json(5);
        quiz[2]["correctAnswer"] = json!("Z");
        let err = parse_quiz(&quiz.to_string()).unwrap_err();
        assert!(err.to_string().contains("question 3"));
    }

    #[test]
    fn test_preview_truncates() {
        let long = "x".repeat(100);
        assert_eq!(preview(&long).len(), 43);
        assert_eq!(preview("short"), "short");
    }
}
