//! Document-level types.

use crate::error::Result;
use crate::parser::{SectionOptions, Sectionizer};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use super::Section;

/// The report being viewed.
///
/// Immutable once built; clones share the same text buffer.
#[derive(Debug, Clone)]
pub struct Document {
    text: Arc<str>,
    metadata: Metadata,
}

impl Document {
    /// Create a document from its full text.
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        let text = text.into();
        let metadata = Metadata::from_text(&text);
        Self { text, metadata }
    }

    /// Load a document from a UTF-8 file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!(
            "Loaded report from {} ({} bytes)",
            path.as_ref().display(),
            text.len()
        );
        Ok(Self::new(text))
    }

    /// Full document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Shared handle to the document text.
    pub fn shared_text(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    /// Document statistics.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Top-level title (first `# ` heading), if any.
    pub fn title(&self) -> Option<&str> {
        self.metadata.title.as_deref()
    }

    /// Check if the document has no content.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Split into sections using the default options.
    pub fn sections(&self) -> Vec<Section> {
        self.sections_with(&SectionOptions::default())
    }

    /// Split into sections using custom options.
    pub fn sections_with(&self, options: &SectionOptions) -> Vec<Section> {
        Sectionizer::new(options.clone()).segment(&self.text)
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Document {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// Document statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Top-level title
    pub title: Option<String>,

    /// Whitespace-separated token count
    pub word_count: usize,

    /// Character count
    pub char_count: usize,

    /// Number of second-level headings
    pub heading_count: usize,
}

impl Metadata {
    fn from_text(text: &str) -> Self {
        let title = text
            .lines()
            .find_map(|line| line.strip_prefix("# "))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Self {
            title,
            word_count: text.split_whitespace().count(),
            char_count: text.chars().count(),
            heading_count: text.lines().filter(|l| l.starts_with("## ")).count(),
        }
    }
}
