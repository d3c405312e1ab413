//! Integration tests for the language-model gateway.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reportlens::error::{Error, Result};
use reportlens::gateway::{
    CompletionClient, CompletionRequest, Gateway, ANSWER_FALLBACK, MISSING_API_KEY_TEXT,
    SUMMARY_FALLBACK,
};
use reportlens::{QUIZ_LENGTH, QUIZ_OPTION_COUNT};

/// Client that replays scripted replies and counts calls.
struct ScriptedClient {
    replies: Mutex<VecDeque<std::result::Result<String, String>>>,
    calls: AtomicUsize,
}

impl ScriptedClient {
    fn new(replies: Vec<std::result::Result<&str, &str>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(
                replies
                    .into_iter()
                    .map(|r| r.map(str::to_string).map_err(str::to_string))
                    .collect(),
            ),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err("script exhausted".to_string()));
        reply.map_err(|message| Error::Api {
            status: 503,
            message,
        })
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

fn quiz_json() -> String {
    let questions: Vec<String> = (0..5)
        .map(|i| {
            format!(
                r#"{{"question":"Q{i}?","options":["a{i}","b{i}","c{i}","d{i}"],"correctAnswer":"b{i}"}}"#
            )
        })
        .collect();
    format!(r#"{{"quiz":[{}]}}"#, questions.join(","))
}

#[tokio::test]
async fn test_fallback_variants_never_fail() {
    let failing = Gateway::with_client(ScriptedClient::new(vec![Err("down"), Err("down")]));
    assert_eq!(failing.summarize_or_fallback("", "").await, SUMMARY_FALLBACK);
    assert_eq!(failing.answer_or_fallback("", "").await, ANSWER_FALLBACK);

    let unconfigured = Gateway::unconfigured();
    assert_eq!(unconfigured.summarize_or_fallback("", "").await, MISSING_API_KEY_TEXT);
    assert_eq!(unconfigured.answer_or_fallback("", "").await, MISSING_API_KEY_TEXT);

    let working = Gateway::with_client(ScriptedClient::new(vec![Ok("Summary."), Ok("Answer.")]));
    assert_eq!(working.summarize_or_fallback("t", "c").await, "Summary.");
    assert_eq!(working.answer_or_fallback("d", "q").await, "Answer.");
}

#[tokio::test]
async fn test_typed_errors_behind_fallbacks() {
    let gateway = Gateway::with_client(ScriptedClient::new(vec![Err("down")]));
    assert!(matches!(
        gateway.summarize("t", "c").await,
        Err(Error::Api { status: 503, .. })
    ));
    assert!(matches!(
        Gateway::unconfigured().answer("d", "q").await,
        Err(Error::MissingApiKey)
    ));
}

#[tokio::test]
async fn test_quiz_success_shape() {
    let json = quiz_json();
    let client = ScriptedClient::new(vec![Ok(json.as_str())]);
    let gateway = Gateway::with_client(client.clone());

    let quiz = gateway.generate_quiz("report").await.unwrap();
    assert_eq!(quiz.len(), QUIZ_LENGTH);
    for question in &quiz {
        assert_eq!(question.options.len(), QUIZ_OPTION_COUNT);
        assert!(question.options.contains(&question.correct_answer));
    }
    assert_eq!(client.calls(), 1);
}

#[tokio::test]
async fn test_quiz_fails_without_key() {
    let result = Gateway::unconfigured().generate_quiz("report").await;
    assert!(matches!(result, Err(Error::MissingApiKey)));
}

#[tokio::test]
async fn test_quiz_fails_on_remote_failure() {
    let gateway = Gateway::with_client(ScriptedClient::new(vec![Err("timeout")]));
    let err = gateway.generate_quiz("report").await.unwrap_err();
    assert!(matches!(err, Error::QuizGeneration(_)));
    assert!(err.to_string().starts_with("Failed to generate quiz"));
}

#[tokio::test]
async fn test_quiz_fails_fast_on_non_json() {
    let gateway =
        Gateway::with_client(ScriptedClient::new(vec![Ok("Sure! Here is your quiz: {}")]));
    match gateway.generate_quiz("report").await {
        Err(Error::QuizGeneration(inner)) => assert!(matches!(*inner, Error::QuizFormat(_))),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_quiz_rejects_wrong_shape() {
    let short = r#"{"quiz":[{"question":"Q?","options":["a","b","c","d"],"correctAnswer":"a"}]}"#;
    let gateway = Gateway::with_client(ScriptedClient::new(vec![Ok(short)]));
    match gateway.generate_quiz("report").await {
        Err(Error::QuizGeneration(inner)) => assert!(matches!(*inner, Error::InvalidQuiz(_))),
        other => panic!("unexpected result: {other:?}"),
    }
}
