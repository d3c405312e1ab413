//! Interactive session: view state plus the three per-feature stores.
//!
//! The session is synchronous. Actions that need the model return a
//! [`Request`]; running it against a [`Gateway`] yields a [`Completion`],
//! which is handed back through [`Session::apply`]. A front end can run
//! requests in the background and keep accepting input meanwhile.
//!
//! # Example
//!
//! ```no_run
//! use reportlens::gateway::{Gateway, GatewayConfig};
//! use reportlens::session::{Session, ViewMode};
//! use reportlens::Document;
//!
//! # async fn run() -> reportlens::Result<()> {
//! let gateway = Gateway::new(&GatewayConfig::from_env())?;
//! let mut session = Session::new(Document::from_file("report.md")?);
//!
//! if let Some(request) = session.navigate(ViewMode::Summaries) {
//!     let completion = request.run(&gateway).await;
//!     session.apply(completion);
//! }
//! # Ok(())
//! # }
//! ```

mod qna;
mod quiz;
mod summaries;
mod view;

pub use qna::{QnaExchange, QnaState, QnaStore, QnaTicket};
pub use quiz::{QuizSession, QuizState, QuizStore, QuizTicket};
pub use summaries::{SummaryEntry, SummaryState, SummaryStore, SummaryTicket};
pub use view::{ViewMode, ViewState};

use std::sync::Arc;

use crate::error::Result;
use crate::gateway::Gateway;
use crate::model::{Document, QuizQuestion, Section};
use crate::parser::SectionOptions;
use crate::render::Highlighter;

/// A gateway call the session wants made.
#[derive(Debug, Clone)]
pub enum Request {
    /// Summarize one section
    Summary {
        ticket: SummaryTicket,
        content: String,
    },
    /// Answer a question over the report
    Answer {
        ticket: QnaTicket,
        question: String,
        document: Arc<str>,
    },
    /// Generate a quiz over the report
    Quiz {
        ticket: QuizTicket,
        document: Arc<str>,
    },
}

impl Request {
    /// Execute the call. Never fails; failures travel inside the
    /// completion.
    pub async fn run(self, gateway: &Gateway) -> Completion {
        match self {
            Request::Summary { ticket, content } => {
                let text = gateway.summarize_or_fallback(&ticket.title, &content).await;
                Completion::Summary { ticket, text }
            }
            Request::Answer {
                ticket,
                question,
                document,
            } => {
                let text = gateway.answer_or_fallback(&document, &question).await;
                Completion::Answer { ticket, text }
            }
            Request::Quiz { ticket, document } => {
                let result = gateway.generate_quiz(&document).await;
                Completion::Quiz { ticket, result }
            }
        }
    }

    /// Short description for status lines.
    pub fn describe(&self) -> String {
        match self {
            Request::Summary { ticket, .. } => format!("Summarizing {}", ticket.title),
            Request::Answer { .. } => "Answering question".to_string(),
            Request::Quiz { .. } => "Generating quiz".to_string(),
        }
    }
}

/// The outcome of a [`Request`].
#[derive(Debug)]
pub enum Completion {
    /// Summary text (or fallback)
    Summary { ticket: SummaryTicket, text: String },
    /// Answer text (or fallback)
    Answer { ticket: QnaTicket, text: String },
    /// Generated questions or the failure
    Quiz {
        ticket: QuizTicket,
        result: Result<Vec<QuizQuestion>>,
    },
}

/// State for one viewing session over a fixed report.
#[derive(Debug, Clone)]
pub struct Session {
    document: Document,
    sections: Arc<[Section]>,
    view: ViewState,
    summaries: SummaryStore,
    qna: QnaStore,
    quiz: QuizStore,
}

impl Session {
    /// Create a session with default sectioning.
    pub fn new(document: Document) -> Self {
        Self::with_options(document, &SectionOptions::default())
    }

    /// Create a session with custom sectioning.
    pub fn with_options(document: Document, options: &SectionOptions) -> Self {
        let sections: Arc<[Section]> = document.sections_with(options).into();
        Self {
            summaries: SummaryStore::new(Arc::clone(&sections)),
            sections,
            document,
            view: ViewState::new(),
            qna: QnaStore::new(),
            quiz: QuizStore::new(),
        }
    }

    /// The report.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// All sections in document order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// View state.
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Active view.
    pub fn mode(&self) -> ViewMode {
        self.view.mode()
    }

    /// Summary store.
    pub fn summaries(&self) -> &SummaryStore {
        &self.summaries
    }

    /// Q&A store.
    pub fn qna(&self) -> &QnaStore {
        &self.qna
    }

    /// Quiz store.
    pub fn quiz(&self) -> &QuizStore {
        &self.quiz
    }

    /// Mutable quiz store, for acknowledging errors.
    pub fn quiz_mut(&mut self) -> &mut QuizStore {
        &mut self.quiz
    }

    /// Switch views. Entering Summaries requests the section on screen if
    /// it has never been requested.
    pub fn navigate(&mut self, mode: ViewMode) -> Option<Request> {
        self.view.navigate(mode);
        if mode == ViewMode::Summaries {
            return self.summaries.enter().map(|t| self.summary_request(t));
        }
        None
    }

    /// Edit the Report search term (switches to Report if elsewhere).
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.view.set_search(term);
    }

    /// Sections the Report view shows for the current search term.
    pub fn report_sections(&self) -> Vec<&Section> {
        match Highlighter::new(self.view.search()) {
            Some(h) => self.sections.iter().filter(|s| s.matches_with(&h)).collect(),
            None => self.sections.iter().collect(),
        }
    }

    /// Move to the next summary.
    pub fn next_section(&mut self) -> Option<Request> {
        self.summaries
            .next_section()
            .map(|t| self.summary_request(t))
    }

    /// Move to the previous summary.
    pub fn prev_section(&mut self) -> Option<Request> {
        self.summaries
            .prev_section()
            .map(|t| self.summary_request(t))
    }

    /// Jump to the summary at `index`.
    pub fn go_to_section(&mut self, index: usize) -> Result<Option<Request>> {
        Ok(self.summaries.go_to(index)?.map(|t| self.summary_request(t)))
    }

    /// Ask a question. Ignored when blank or while another is in flight.
    pub fn ask(&mut self, question: &str) -> Option<Request> {
        let ticket = self.qna.submit(question)?;
        let question = self
            .qna
            .exchange()
            .map(|e| e.question.clone())
            .unwrap_or_default();
        Some(Request::Answer {
            ticket,
            question,
            document: self.document.shared_text(),
        })
    }

    /// Start a new quiz, discarding the current one. Ignored while a quiz
    /// is already being generated.
    pub fn start_quiz(&mut self) -> Option<Request> {
        let ticket = self.quiz.start()?;
        Some(Request::Quiz {
            ticket,
            document: self.document.shared_text(),
        })
    }

    /// Pick an option for a quiz question.
    pub fn select_answer(&mut self, index: usize, option: &str) -> Result<()> {
        self.quiz.select(index, option)
    }

    /// Submit the quiz and return the score.
    pub fn submit_quiz(&mut self) -> Result<usize> {
        self.quiz.submit()
    }

    /// Apply a finished request. Returns `false` if it was stale.
    ///
    /// Results are stored even when their view is not on screen.
    pub fn apply(&mut self, completion: Completion) -> bool {
        match completion {
            Completion::Summary { ticket, text } => self.summaries.complete(ticket, text),
            Completion::Answer { ticket, text } => self.qna.complete(ticket, text),
            Completion::Quiz { ticket, result } => self.quiz.complete(ticket, result),
        }
    }

    /// Run a request to completion and apply it.
    pub async fn drive(&mut self, request: Request, gateway: &Gateway) -> bool {
        let completion = request.run(gateway).await;
        self.apply(completion)
    }

    fn summary_request(&self, ticket: SummaryTicket) -> Request {
        let content = self
            .sections
            .get(ticket.index)
            .map(|s| s.content.clone())
            .unwrap_or_default();
        Request::Summary { ticket, content }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "# Report\n\n## Abstract\nAbout solar.\n\n## I. Intro\nSolar panels.\n\n## II. Wind\nTurbines.\n";

    #[test]
    fn test_new_session() {
        let session = Session::new(Document::new(REPORT));
        assert_eq!(session.mode(), ViewMode::Report);
        assert_eq!(session.sections().len(), 3);
        assert_eq!(session.summaries().len(), 3);
    }

    #[test]
    fn test_enter_summaries_requests_current() {
        let mut session = Session::new(Document::new(REPORT));
        let request = session.navigate(ViewMode::Summaries).unwrap();
        match request {
            Request::Summary { ticket, content } => {
                assert_eq!(ticket.title, "Abstract");
                assert_eq!(content, "About solar.");
            }
            other => panic!("unexpected request: {other:?}"),
        }

        // Re-entering while loading issues nothing
        session.navigate(ViewMode::Report);
        assert!(session.navigate(ViewMode::Summaries).is_none());
    }

    #[test]
    fn test_report_filter() {
        let mut session = Session::new(Document::new(REPORT));
        assert_eq!(session.report_sections().len(), 3);

        session.navigate(ViewMode::Quiz);
        session.set_search("solar");
        assert_eq!(session.mode(), ViewMode::Report);

        let titles: Vec<_> = session.report_sections().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Abstract", "I. Intro"]);
    }

    #[test]
    fn test_ask_builds_request() {
        let mut session = Session::new(Document::new(REPORT));
        assert!(session.ask("   ").is_none());

        match session.ask(" Why solar? ").unwrap() {
            Request::Answer {
                question, document, ..
            } => {
                assert_eq!(question, "Why solar?");
                assert_eq!(&*document, REPORT);
            }
            other => panic!("unexpected request: {other:?}"),
        }
        assert!(session.ask("again").is_none());
    }

    #[test]
    fn test_start_quiz_once_while_loading() {
        let mut session = Session::new(Document::new(REPORT));
        assert!(session.start_quiz().is_some());
        assert_eq!(session.quiz().state(), QuizState::Loading);
        assert!(session.start_quiz().is_none());
    }

    #[test]
    fn test_request_describe() {
        let mut session = Session::new(Document::new(REPORT));
        assert_eq!(session.start_quiz().unwrap().describe(), "Generating quiz");
        let request = session.navigate(ViewMode::Summaries).unwrap();
        assert_eq!(request.describe(), "Summarizing Abstract");
    }

    #[tokio::test]
    async fn test_drive_without_key() {
        let gateway = Gateway::unconfigured();
        let mut session = Session::new(Document::new(REPORT));

        let request = session.navigate(ViewMode::Summaries).unwrap();
        assert!(session.drive(request, &gateway).await);
        let entry = session.summaries().entry("Abstract").unwrap();
        assert_eq!(entry.text, crate::gateway::MISSING_API_KEY_TEXT);

        let request = session.start_quiz().unwrap();
        assert!(session.drive(request, &gateway).await);
        assert_eq!(session.quiz().state(), QuizState::Empty);
        assert!(session.quiz().last_error().is_some());
    }
}
