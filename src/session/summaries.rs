//! Per-section summary cache with a section cursor.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::Section;

/// Lifecycle of one section's summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryState {
    /// Never requested
    Unrequested,
    /// Request in flight
    Loading,
    /// Text available (real summary or fallback)
    Loaded,
}

/// Cached summary for one section title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEntry {
    /// Summary text; empty while loading
    pub text: String,

    /// Whether the request is still in flight
    pub loading: bool,

    generation: u64,
}

/// Permission to issue one summarize call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryTicket {
    /// Section position
    pub index: usize,

    /// Section title (the cache key)
    pub title: String,

    generation: u64,
}

/// Summary store for the Summaries view.
///
/// Each title moves `Unrequested -> Loading -> Loaded` exactly once; the
/// store never issues a second request for a title it has seen.
#[derive(Debug, Clone)]
pub struct SummaryStore {
    sections: Arc<[Section]>,
    cursor: usize,
    entries: HashMap<String, SummaryEntry>,
    next_generation: u64,
}

impl SummaryStore {
    /// Create a store over the report's sections.
    pub fn new(sections: Arc<[Section]>) -> Self {
        Self {
            sections,
            cursor: 0,
            entries: HashMap::new(),
            next_generation: 0,
        }
    }

    /// Number of sections.
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check if there are no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Position of the section on screen.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Section on screen.
    pub fn current(&self) -> Option<&Section> {
        self.sections.get(self.cursor)
    }

    /// Section at `index`.
    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Lifecycle state for `title`.
    pub fn state(&self, title: &str) -> SummaryState {
        match self.entries.get(title) {
            None => SummaryState::Unrequested,
            Some(entry) if entry.loading => SummaryState::Loading,
            Some(_) => SummaryState::Loaded,
        }
    }

    /// Cached entry for `title`.
    pub fn entry(&self, title: &str) -> Option<&SummaryEntry> {
        self.entries.get(title)
    }

    /// Cached entry for the section on screen.
    pub fn current_entry(&self) -> Option<&SummaryEntry> {
        self.current().and_then(|s| self.entries.get(&s.title))
    }

    /// Whether the section on screen is waiting for its summary.
    pub fn is_current_loading(&self) -> bool {
        self.current_entry().is_some_and(|e| e.loading)
    }

    /// Whether `prev_section` would move.
    pub fn can_prev(&self) -> bool {
        self.cursor > 0 && !self.is_current_loading()
    }

    /// Whether `next_section` would move.
    pub fn can_next(&self) -> bool {
        self.cursor + 1 < self.len() && !self.is_current_loading()
    }

    /// Request the summary at `index` if it was never requested.
    ///
    /// Returns `None` for titles already loading or loaded.
    pub fn request(&mut self, index: usize) -> Option<SummaryTicket> {
        let title = self.sections.get(index)?.title.clone();
        if self.entries.contains_key(&title) {
            return None;
        }

        self.next_generation += 1;
        let generation = self.next_generation;
        self.entries.insert(
            title.clone(),
            SummaryEntry {
                text: String::new(),
                loading: true,
                generation,
            },
        );
        log::debug!("Summary requested for {:?}", title);

        Some(SummaryTicket {
            index,
            title,
            generation,
        })
    }

    /// Request the section on screen (entering the view).
    pub fn enter(&mut self) -> Option<SummaryTicket> {
        self.request(self.cursor)
    }

    /// Move to the next section, requesting it if needed.
    pub fn next_section(&mut self) -> Option<SummaryTicket> {
        if !self.can_next() {
            return None;
        }
        self.cursor += 1;
        self.request(self.cursor)
    }

    /// Move to the previous section, requesting it if needed.
    pub fn prev_section(&mut self) -> Option<SummaryTicket> {
        if !self.can_prev() {
            return None;
        }
        self.cursor -= 1;
        self.request(self.cursor)
    }

    /// Jump to `index`, requesting it if needed.
    pub fn go_to(&mut self, index: usize) -> Result<Option<SummaryTicket>> {
        if index >= self.len() {
            return Err(Error::SectionOutOfRange(index, self.len()));
        }
        if self.is_current_loading() && index != self.cursor {
            return Err(Error::InvalidTransition(
                "cannot leave a section while its summary is loading".into(),
            ));
        }
        self.cursor = index;
        Ok(self.request(index))
    }

    /// Store the result for a ticket. Returns `false` if it was stale.
    pub fn complete(&mut self, ticket: SummaryTicket, text: String) -> bool {
        match self.entries.get_mut(&ticket.title) {
            Some(entry) if entry.loading && entry.generation == ticket.generation => {
                entry.text = text;
                entry.loading = false;
                true
            }
            _ => {
                log::warn!("Discarding stale summary for {:?}", ticket.title);
                false
            }
        }
    }
}
