//! # reportlens
//!
//! Sectioned viewer for a single fixed report, with language-model backed
//! section summaries, question answering, and quiz generation.
//!
//! ## Quick Start
//!
//! ```no_run
//! use reportlens::{segment, Document};
//!
//! fn main() -> reportlens::Result<()> {
//!     let doc = Document::from_file("report.md")?;
//!
//!     for section in segment(doc.text()) {
//!         println!("{}", section.title);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Sectioning**: abstract first, then one section per `## ` heading
//! - **Four views**: Report (with search), Summaries, Q&A, Quiz
//! - **Per-feature stores**: request lifecycle and cached results per session
//! - **Gateway**: prompt shaping and response parsing for a Gemini-style model,
//!   behind a swappable [`gateway::CompletionClient`]

pub mod error;
pub mod gateway;
pub mod model;
pub mod parser;
pub mod render;
pub mod session;

// Re-export commonly used types
pub use error::{Error, Result};
pub use gateway::{Gateway, GatewayConfig};
pub use model::{Document, Metadata, QuizQuestion, Section, QUIZ_LENGTH, QUIZ_OPTION_COUNT};
pub use parser::{segment, SectionOptions, Sectionizer};
pub use render::{highlight, JsonFormat, ReportFormat};
pub use session::{Completion, Request, Session, ViewMode};

use std::path::Path;

/// Load a report from a file.
///
/// # Example
///
/// ```no_run
/// let doc = reportlens::load_file("report.md").unwrap();
/// println!("Words: {}", doc.metadata().word_count);
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    Document::from_file(path)
}

/// Load a report from a file and split it into sections.
pub fn sections_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Section>> {
    Ok(load_file(path)?.sections())
}

/// Builder for a viewing session and its gateway.
///
/// # Example
///
/// ```no_run
/// use reportlens::{GatewayConfig, ReportLens};
///
/// let viewer = ReportLens::new()
///     .with_gateway_config(GatewayConfig::from_env())
///     .with_abstract_end_marker("## I.")
///     .open_file("report.md")?;
/// println!("{} sections", viewer.session().sections().len());
/// # Ok::<(), reportlens::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReportLens {
    section_options: SectionOptions,
    gateway_config: GatewayConfig,
}

impl ReportLens {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set sectioning options.
    pub fn with_section_options(mut self, options: SectionOptions) -> Self {
        self.section_options = options;
        self
    }

    /// Set the literal marker that ends the abstract.
    pub fn with_abstract_end_marker(mut self, marker: impl Into<String>) -> Self {
        self.section_options = self.section_options.with_abstract_end_marker(marker);
        self
    }

    /// Set gateway configuration.
    pub fn with_gateway_config(mut self, config: GatewayConfig) -> Self {
        self.gateway_config = config;
        self
    }

    /// Set the API credential.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.gateway_config = self.gateway_config.with_api_key(key);
        self
    }

    /// Open a session over a document.
    pub fn open(self, document: Document) -> Result<Viewer> {
        let gateway = Gateway::new(&self.gateway_config)?;
        let session = Session::with_options(document, &self.section_options);
        Ok(Viewer { session, gateway })
    }

    /// Open a session over a document loaded from a file.
    pub fn open_file<P: AsRef<Path>>(self, path: P) -> Result<Viewer> {
        let document = Document::from_file(path)?;
        self.open(document)
    }
}

/// A session paired with the gateway that serves its requests.
#[derive(Debug)]
pub struct Viewer {
    session: Session,
    gateway: Gateway,
}

impl Viewer {
    /// Pair an existing session and gateway.
    pub fn from_parts(session: Session, gateway: Gateway) -> Self {
        Self { session, gateway }
    }

    /// The session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// The gateway.
    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Run a request to completion and apply its result.
    pub async fn resolve(&mut self, request: Request) -> bool {
        self.session.drive(request, &self.gateway).await
    }

    /// Split back into session and gateway.
    pub fn into_parts(self) -> (Session, Gateway) {
        (self.session, self.gateway)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "## Abstract\nabs\n## I. X\nfoo\n## II. Y\n";

    #[test]
    fn test_builder_default() {
        let builder = ReportLens::default();
        assert_eq!(builder.section_options, SectionOptions::default());
        assert!(!builder.gateway_config.has_api_key());
    }

    #[test]
    fn test_builder_chained() {
        let builder = ReportLens::new()
            .with_abstract_end_marker("## I.")
            .with_api_key("key");
        assert_eq!(
            builder.section_options.abstract_end_marker.as_deref(),
            Some("## I.")
        );
        assert!(builder.gateway_config.has_api_key());
    }

    #[test]
    fn test_open_without_key() {
        let viewer = ReportLens::new().open(Document::new(REPORT)).unwrap();
        assert!(!viewer.gateway().is_configured());
        assert_eq!(viewer.session().sections().len(), 2);
    }

    #[test]
    fn test_open_missing_file() {
        let result = ReportLens::new().open_file("/no/such/report.md");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_sections_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("r.md");
        std::fs::write(&path, REPORT).unwrap();

        let sections = sections_from_file(&path).unwrap();
        let titles: Vec<_> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Abstract", "I. X"]);
    }

    #[tokio::test]
    async fn test_viewer_resolve() {
        let mut viewer = ReportLens::new().open(Document::new(REPORT)).unwrap();
        let request = viewer
            .session_mut()
            .ask("What is X?")
            .expect("question accepted");
        assert!(viewer.resolve(request).await);

        let exchange = viewer.session().qna().exchange().unwrap();
        assert_eq!(exchange.answer, gateway::MISSING_API_KEY_TEXT);
    }
}
