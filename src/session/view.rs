//! View state machine: active mode plus the Report search term.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// The four top-level views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    /// Full report, filtered by the search term
    #[default]
    Report,
    /// One AI summary per section
    Summaries,
    /// Free-text question answering
    Qna,
    /// Multiple-choice quiz
    Quiz,
}

impl ViewMode {
    /// All modes in menu order.
    pub const ALL: [ViewMode; 4] = [
        ViewMode::Report,
        ViewMode::Summaries,
        ViewMode::Qna,
        ViewMode::Quiz,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Report => "Report",
            ViewMode::Summaries => "Summaries",
            ViewMode::Qna => "Q&A",
            ViewMode::Quiz => "Quiz",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ViewMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "report" => Ok(ViewMode::Report),
            "summaries" | "summary" => Ok(ViewMode::Summaries),
            "qa" | "q&a" | "qna" => Ok(ViewMode::Qna),
            "quiz" => Ok(ViewMode::Quiz),
            other => Err(Error::Other(format!("Unknown view: {}", other))),
        }
    }
}

/// Active view and search term.
///
/// Any view can be reached from any other. The search term belongs to the
/// Report view and survives navigation away from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    mode: ViewMode,
    search: String,
}

impl ViewState {
    /// Start in the Report view with an empty search.
    pub fn new() -> Self {
        Self::default()
    }

    /// Active view.
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Current search term.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Switch views. Returns `true` if the mode changed.
    pub fn navigate(&mut self, mode: ViewMode) -> bool {
        if self.mode == mode {
            return false;
        }
        log::debug!("View {} -> {}", self.mode, mode);
        self.mode = mode;
        true
    }

    /// Replace the search term, switching to Report first if needed.
    ///
    /// Returns `true` if this forced a view change.
    pub fn set_search(&mut self, term: impl Into<String>) -> bool {
        let switched = self.navigate(ViewMode::Report);
        self.search = term.into();
        switched
    }

    /// Clear the search term (also a Report-scoped edit).
    pub fn clear_search(&mut self) -> bool {
        self.set_search(String::new())
    }
}
