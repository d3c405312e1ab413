//! Error types for reportlens library.

use std::io;
use thiserror::Error;

/// Result type alias for reportlens operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while sectioning, querying the model, or
/// driving a session.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading the report.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// No API credential is configured for the language-model gateway.
    #[error("API key is not configured")]
    MissingApiKey,

    /// Transport-level failure talking to the model provider.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The provider answered, but without any usable text.
    #[error("Empty response: {0}")]
    EmptyResponse(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Quiz response text is not JSON at all.
    #[error("Quiz response is not JSON: {0}")]
    QuizFormat(String),

    /// Quiz response parsed but violates the expected shape.
    #[error("Invalid quiz: {0}")]
    InvalidQuiz(String),

    /// Quiz generation failed; wraps the underlying cause.
    #[error("Failed to generate quiz: {0}")]
    QuizGeneration(#[source] Box<Error>),

    /// Operation not allowed in the current store state.
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    /// Quiz answer does not fit the question.
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Section index is out of range.
    #[error("Section {0} is out of range (report has {1} sections)")]
    SectionOutOfRange(usize, usize),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wrap an error as a quiz-generation failure.
    ///
    /// A missing credential is passed through untouched so callers can tell
    /// configuration problems apart from remote ones.
    pub fn into_quiz_failure(self) -> Self {
        match self {
            Error::MissingApiKey | Error::QuizGeneration(_) => self,
            other => Error::QuizGeneration(Box::new(other)),
        }
    }

    /// Whether this error stems from missing configuration.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::MissingApiKey)
    }
}
