//! Sectioning options and configuration.

/// Default second-level heading marker.
pub const DEFAULT_HEADING_MARKER: &str = "## ";

/// Default title of the leading section.
pub const DEFAULT_ABSTRACT_TITLE: &str = "Abstract";

/// Options for splitting a report into sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionOptions {
    /// Prefix that marks a second-level heading line
    pub heading_marker: String,

    /// Title of the leading section, always emitted first
    pub abstract_title: String,

    /// Literal text that ends the abstract span.
    /// When unset (or not found) the abstract ends at the next heading.
    pub abstract_end_marker: Option<String>,
}

impl SectionOptions {
    /// Create new section options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading marker.
    pub fn with_heading_marker(mut self, marker: impl Into<String>) -> Self {
        self.heading_marker = marker.into();
        self
    }

    /// Set the abstract title.
    pub fn with_abstract_title(mut self, title: impl Into<String>) -> Self {
        self.abstract_title = title.into();
        self
    }

    /// Set the literal marker that ends the abstract span.
    pub fn with_abstract_end_marker(mut self, marker: impl Into<String>) -> Self {
        self.abstract_end_marker = Some(marker.into());
        self
    }
}

impl Default for SectionOptions {
    fn default() -> Self {
        Self {
            heading_marker: DEFAULT_HEADING_MARKER.to_string(),
            abstract_title: DEFAULT_ABSTRACT_TITLE.to_string(),
            abstract_end_marker: None,
        }
    }
}
