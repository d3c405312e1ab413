//! Language-model gateway.
//!
//! Shapes the three prompts (summary, answer, quiz) and parses the three
//! response shapes. The remote model itself sits behind
//! [`CompletionClient`].
//!
//! Every operation has a typed core returning [`Result`]. Summaries and
//! answers also come in a `*_or_fallback` form that never fails and yields
//! displayable text instead: the configuration message when no credential
//! is set, or a fixed fallback string on any other failure. Quiz generation
//! has no such form since there is no placeholder quiz worth showing.
//!
//! # Example
//!
//! ```no_run
//! use reportlens::gateway::{Gateway, GatewayConfig};
//!
//! # async fn run() -> reportlens::Result<()> {
//! let gateway = Gateway::new(&GatewayConfig::from_env())?;
//! let summary = gateway
//!     .summarize_or_fallback("I. Introduction", "Section text...")
//!     .await;
//! println!("{}", summary);
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod gemini;
pub mod prompt;
mod quiz;

pub use client::{CompletionClient, CompletionRequest};
pub use config::{
    GatewayConfig, API_KEY_ENV, API_KEY_FALLBACK_ENV, DEFAULT_BASE_URL, DEFAULT_MODEL, MODEL_ENV,
};
pub use gemini::GeminiClient;
pub use quiz::{parse_quiz, quiz_schema, validate_quiz};

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::QuizQuestion;

/// Shown in place of a summary when generation fails.
pub const SUMMARY_FALLBACK: &str = "Failed to generate summary.";

/// Shown in place of an answer when the request fails.
pub const ANSWER_FALLBACK: &str = "Failed to get an answer. Please try again.";

/// Shown in place of a summary or answer when no credential is configured.
pub const MISSING_API_KEY_TEXT: &str =
    "Error: API key is not configured. Set GEMINI_API_KEY to enable AI features.";

/// Entry point for the three model-backed operations.
///
/// Cheap to clone; clones share the underlying client.
#[derive(Clone, Default)]
pub struct Gateway {
    client: Option<Arc<dyn CompletionClient>>,
}

impl Gateway {
    /// Create a gateway from configuration.
    ///
    /// Without a credential the gateway is built anyway and every call
    /// reports the configuration error.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        if !config.has_api_key() {
            log::warn!("No API key configured; AI features are disabled");
            return Ok(Self::unconfigured());
        }
        let client = GeminiClient::new(config)?;
        log::debug!("Gateway using model {}", client.model_name());
        Ok(Self::with_client(Arc::new(client)))
    }

    /// Create a gateway over an existing client.
    pub fn with_client(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Create a gateway with no credential.
    pub fn unconfigured() -> Self {
        Self { client: None }
    }

    /// Whether remote calls can be made.
    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    /// Model identifier, if configured.
    pub fn model_name(&self) -> Option<&str> {
        self.client.as_deref().map(|c| c.model_name())
    }

    fn client(&self) -> Result<&dyn CompletionClient> {
        self.client.as_deref().ok_or(Error::MissingApiKey)
    }

    /// Summarize one section in a single paragraph.
    pub async fn summarize(&self, title: &str, content: &str) -> Result<String> {
        let client = self.client()?;
        let request = CompletionRequest::text(prompt::summary_prompt(title, content));
        let text = client.complete(&request).await?;
        log::info!("Generated summary for {:?}", title);
        Ok(text.trim().to_string())
    }

    /// Summarize one section, resolving every failure to display text.
    pub async fn summarize_or_fallback(&self, title: &str, content: &str) -> String {
        match self.summarize(title, content).await {
            Ok(text) => text,
            Err(e) => fallback_text(e, SUMMARY_FALLBACK, "summary"),
        }
    }

    /// Answer a question using the full report as context.
    pub async fn answer(&self, document: &str, question: &str) -> Result<String> {
        let client = self.client()?;
        let request = CompletionRequest::text(prompt::answer_prompt(document, question));
        let text = client.complete(&request).await?;
        log::info!("Answered question ({} chars)", question.len());
        Ok(text.trim().to_string())
    }

    /// Answer a question, resolving every failure to display text.
    pub async fn answer_or_fallback(&self, document: &str, question: &str) -> String {
        match self.answer(document, question).await {
            Ok(text) => text,
            Err(e) => fallback_text(e, ANSWER_FALLBACK, "answer"),
        }
    }

    /// Generate a five-question multiple-choice quiz.
    ///
    /// A missing credential surfaces as [`Error::MissingApiKey`]; every other
    /// failure (transport, API, format, validation) as
    /// [`Error::QuizGeneration`].
    pub async fn generate_quiz(&self, document: &str) -> Result<Vec<QuizQuestion>> {
        let client = self.client()?;
        let request = CompletionRequest::structured(prompt::quiz_prompt(document), quiz_schema());

        let questions = async {
            let text = client.complete(&request).await?;
            parse_quiz(&text)
        }
        .await
        .map_err(|e| {
            log::warn!("Quiz generation failed: {}", e);
            e.into_quiz_failure()
        })?;

        log::info!("Generated quiz with {} questions", questions.len());
        Ok(questions)
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("model", &self.model_name())
            .finish()
    }
}

fn fallback_text(err: Error, fallback: &str, operation: &str) -> String {
    if err.is_config() {
        MISSING_API_KEY_TEXT.to_string()
    } else {
        log::warn!("{} request failed: {}", operation, err);
        fallback.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Client that returns one canned reply and records prompts.
    struct CannedClient {
        reply: std::result::Result<String, String>,
        requests: Mutex<Vec<CompletionRequest>>,
    }

    impl CannedClient {
        fn ok(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err("connection reset".to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CompletionClient for CannedClient {
        async fn complete(&self, request: &CompletionRequest) -> Result<String> {
            self.requests.lock().unwrap().push(request.clone());
            self.reply.clone().map_err(Error::Other)
        }

        fn model_name(&self) -> &str {
            "canned"
        }
    }

    #[test]
    fn test_new_without_key_is_unconfigured() {
        let gateway = Gateway::new(&GatewayConfig::new()).unwrap();
        assert!(!gateway.is_configured());
        assert_eq!(gateway.model_name(), None);
    }

    #[test]
    fn test_new_with_key_is_configured() {
        let config = GatewayConfig::new().with_api_key("k").with_model("m");
        let gateway = Gateway::new(&config).unwrap();
        assert!(gateway.is_configured());
        assert_eq!(gateway.model_name(), Some("m"));
    }

    #[tokio::test]
    async fn test_summarize_trims_reply() {
        let client = CannedClient::ok("  A tidy paragraph.\n");
        let gateway = Gateway::with_client(client.clone());

        let text = gateway.summarize("Abstract", "body").await.unwrap();
        assert_eq!(text, "A tidy paragraph.");

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert!(!requests[0].is_structured());
        assert!(requests[0].prompt.contains("\"Abstract\""));
    }

    #[tokio::test]
    async fn test_fallbacks_on_failure() {
        let gateway = Gateway::with_client(CannedClient::failing());
        assert_eq!(gateway.summarize_or_fallback("t", "c").await, SUMMARY_FALLBACK);
        assert_eq!(gateway.answer_or_fallback("doc", "q").await, ANSWER_FALLBACK);
    }

    #[tokio::test]
    async fn test_config_error_text_when_unconfigured() {
        let gateway = Gateway::unconfigured();
        assert_eq!(gateway.summarize_or_fallback("t", "c").await, MISSING_API_KEY_TEXT);
        assert_eq!(gateway.answer_or_fallback("", "").await, MISSING_API_KEY_TEXT);
        assert!(matches!(
            gateway.generate_quiz("doc").await,
            Err(Error::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn test_quiz_request_is_structured() {
        let client = CannedClient::ok("not json");
        let gateway = Gateway::with_client(client.clone());

        let err = gateway.generate_quiz("doc").await.unwrap_err();
        assert!(matches!(err, Error::QuizGeneration(_)));

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests[0].schema, Some(quiz_schema()));
    }
}
