//! Data model for the report and the derived data shown per session.
//!
//! The document is immutable and shared; sections are derived from it once,
//! and quiz questions arrive from the language-model gateway.

mod document;
mod quiz;
mod section;

pub use document::{Document, Metadata};
pub use quiz::{QuizQuestion, QUIZ_LENGTH, QUIZ_OPTION_COUNT};
pub use section::Section;
