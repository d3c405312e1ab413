//! Completion client seam.
//!
//! The gateway treats the remote model as a single `complete` call taking a
//! prompt and an optional response schema.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// A single completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Prompt text
    pub prompt: String,

    /// JSON schema the response must follow; plain text when `None`
    pub schema: Option<Value>,
}

impl CompletionRequest {
    /// Create a plain-text request.
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            schema: None,
        }
    }

    /// Create a schema-constrained request.
    pub fn structured(prompt: impl Into<String>, schema: Value) -> Self {
        Self {
            prompt: prompt.into(),
            schema: Some(schema),
        }
    }

    /// Whether the response is constrained to a schema.
    pub fn is_structured(&self) -> bool {
        self.schema.is_some()
    }
}

/// Remote text/JSON completion capability.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Run the prompt and return the raw response text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
