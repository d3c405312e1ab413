//! Rendering: search highlighting, the Report view, and JSON output.

mod highlight;
mod json;
mod report;

pub use highlight::{escape_html, highlight, match_ranges, Highlighter};
pub use json::{to_json, JsonFormat};
pub use report::{render_report, ReportFormat};
