//! Report view rendering.

use crate::model::Section;

use super::highlight::{escape_html, Highlighter};

/// Output format for the Report view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Markdown, reassembled from the sections
    #[default]
    Markdown,
    /// HTML fragments with search matches marked
    Html,
}

/// Render the sections shown by the Report view.
///
/// The search term only affects the HTML output; filtering happens
/// upstream.
pub fn render_report(sections: &[&Section], term: &str, format: ReportFormat) -> String {
    let highlighter = Highlighter::new(term);
    let mut output = String::new();

    for section in sections {
        match format {
            ReportFormat::Markdown => {
                output.push_str("## ");
                output.push_str(&section.title);
                output.push_str("\n\n");
                output.push_str(section.content.trim());
                output.push_str("\n\n");
            }
            ReportFormat::Html => {
                let (title, content) = match &highlighter {
                    Some(h) => (h.to_html(&section.title), h.to_html(section.content.trim())),
                    None => (
                        escape_html(&section.title),
                        escape_html(section.content.trim()),
                    ),
                };
                output.push_str("<section>\n<h2>");
                output.push_str(&title);
                output.push_str("</h2>\n<div class=\"content\">");
                output.push_str(&content);
                output.push_str("</div>\n</section>\n");
            }
        }
    }

    output.trim_end().to_string()
}
