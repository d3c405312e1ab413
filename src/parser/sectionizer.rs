//! Splits report text into an ordered list of sections.
//!
//! The abstract is extracted from its own span first; the remaining sections
//! come from a single line scan that opens a new section at every
//! second-level heading.

use crate::model::Section;

use super::SectionOptions;

/// Split `text` into sections with the default options.
pub fn segment(text: &str) -> Vec<Section> {
    Sectionizer::default().segment(text)
}

/// Report sectionizer.
#[derive(Debug, Clone, Default)]
pub struct Sectionizer {
    options: SectionOptions,
}

impl Sectionizer {
    /// Create a new sectionizer.
    pub fn new(options: SectionOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &SectionOptions {
        &self.options
    }

    /// Split a report into sections.
    ///
    /// The first section is always the abstract, even when its text is
    /// empty. Every later section matches one heading, in document order;
    /// headings whose body is blank produce nothing.
    pub fn segment(&self, text: &str) -> Vec<Section> {
        let mut sections = vec![Section::new(
            self.options.abstract_title.clone(),
            self.extract_abstract(text),
        )];

        // `None` is the placeholder for the preamble and the abstract body,
        // both of which are covered by the span extracted above.
        let mut current: Option<String> = None;
        let mut buffer = String::new();

        for line in text.split_inclusive('\n') {
            match self.heading_title(line) {
                Some(title) => {
                    flush(&mut sections, current.take(), &mut buffer);
                    if title != self.options.abstract_title {
                        current = Some(title.to_string());
                    }
                }
                None => buffer.push_str(line),
            }
        }
        flush(&mut sections, current, &mut buffer);

        log::debug!("Segmented report into {} sections", sections.len());
        sections
    }

    /// Heading text if `line` is a second-level heading.
    fn heading_title<'a>(&self, line: &'a str) -> Option<&'a str> {
        line.strip_prefix(self.options.heading_marker.as_str())
            .map(str::trim)
    }

    fn extract_abstract(&self, text: &str) -> String {
        let title = self.options.abstract_title.as_str();
        let start = line_offsets(text)
            .find(|(_, line)| self.heading_title(line) == Some(title))
            .map(|(offset, line)| offset + line.len());

        let Some(start) = start else {
            // No abstract heading: use the preamble before the first heading.
            let end = self.next_heading_offset(text).unwrap_or(text.len());
            return text[..end].trim().to_string();
        };

        let rest = &text[start..];
        let end = self
            .options
            .abstract_end_marker
            .as_deref()
            .and_then(|marker| rest.find(marker))
            .or_else(|| self.next_heading_offset(rest))
            .unwrap_or(rest.len());

        rest[..end].trim().to_string()
    }

    fn next_heading_offset(&self, text: &str) -> Option<usize> {
        line_offsets(text)
            .find(|(_, line)| self.heading_title(line).is_some())
            .map(|(offset, _)| offset)
    }
}

/// Emit the open section if it has a title and a non-blank body.
fn flush(sections: &mut Vec<Section>, title: Option<String>, buffer: &mut String) {
    if let Some(title) = title {
        if !buffer.trim().is_empty() {
            sections.push(Section::new(title, std::mem::take(buffer)));
        }
    }
    buffer.clear();
}

/// Lines (with terminators) paired with their byte offsets.
fn line_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.split_inclusive('\n').scan(0usize, |offset, line| {
        let start = *offset;
        *offset += line.len();
        Some((start, line))
    })
}
