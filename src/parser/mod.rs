//! Report parsing: splitting raw text into titled sections.

mod options;
mod sectionizer;

pub use options::SectionOptions;
pub use sectionizer::{segment, Sectionizer};
