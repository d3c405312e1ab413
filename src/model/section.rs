//! Section type.

use serde::{Deserialize, Serialize};

use crate::render::Highlighter;

/// A titled span of the report bounded by second-level headings.
///
/// `content` never includes the heading line itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text without the marker prefix
    pub title: String,

    /// Body text, lines kept verbatim
    pub content: String,
}

impl Section {
    /// Create a new section.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Check if the body is empty after trimming whitespace.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Case-insensitive match against title or content, using the same
    /// matcher that highlights the Report view.
    ///
    /// An empty or whitespace-only term matches everything.
    pub fn matches(&self, term: &str) -> bool {
        Highlighter::new(term).map_or(true, |h| self.matches_with(&h))
    }

    /// Match against an already compiled search term.
    pub fn matches_with(&self, highlighter: &Highlighter) -> bool {
        highlighter.is_match(&self.title) || highlighter.is_match(&self.content)
    }
}
