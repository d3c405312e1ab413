//! Search-match highlighting.
//!
//! Matching is literal and case-insensitive. The HTML form escapes the
//! section text and wraps each match in `<mark>`; markdown conversion is
//! left to the caller.

use regex::{Regex, RegexBuilder};
use std::ops::Range;

/// Compiled search term.
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Regex,
}

impl Highlighter {
    /// Compile a search term. Returns `None` for blank terms.
    pub fn new(term: &str) -> Option<Self> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }
        match RegexBuilder::new(&regex::escape(term))
            .case_insensitive(true)
            .build()
        {
            Ok(pattern) => Some(Self { pattern }),
            Err(e) => {
                log::warn!("Search term could not be compiled: {}", e);
                None
            }
        }
    }

    /// Byte ranges of every match in `text`.
    pub fn ranges(&self, text: &str) -> Vec<Range<usize>> {
        self.pattern.find_iter(text).map(|m| m.range()).collect()
    }

    /// Whether `text` contains a match.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Number of matches in `text`.
    pub fn count(&self, text: &str) -> usize {
        self.pattern.find_iter(text).count()
    }

    /// Escape `text` as HTML and wrap matches in `<mark>`.
    pub fn to_html(&self, text: &str) -> String {
        let mut output = String::with_capacity(text.len() + 16);
        let mut last = 0;
        for range in self.ranges(text) {
            output.push_str(&escape_html(&text[last..range.start]));
            output.push_str("<mark>");
            output.push_str(&escape_html(&text[range.clone()]));
            output.push_str("</mark>");
            last = range.end;
        }
        output.push_str(&escape_html(&text[last..]));
        output
    }
}

/// Annotate `content` for display: HTML-escaped, matches of `term` marked.
pub fn highlight(content: &str, term: &str) -> String {
    match Highlighter::new(term) {
        Some(h) => h.to_html(content),
        None => escape_html(content),
    }
}

/// Byte ranges of case-insensitive matches of `term` in `content`.
pub fn match_ranges(content: &str, term: &str) -> Vec<Range<usize>> {
    Highlighter::new(term)
        .map(|h| h.ranges(content))
        .unwrap_or_default()
}

/// Escape HTML special characters.
pub fn escape_html(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
    }

    #[test]
    fn test_highlight_case_insensitive() {
        assert_eq!(
            highlight("Solar and solar", "SOLAR"),
            "<mark>Solar</mark> and <mark>solar</mark>"
        );
    }

    #[test]
    fn test_highlight_escapes_match_and_context() {
        assert_eq!(
            highlight("<b>x & y</b>", "x & y"),
            "&lt;b&gt;<mark>x &amp; y</mark>&lt;/b&gt;"
        );
    }

    #[test]
    fn test_blank_term_only_escapes() {
        assert_eq!(highlight("a<b", "  "), "a&lt;b");
        assert!(match_ranges("anything", "").is_empty());
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        assert_eq!(match_ranges("cost (USD) vs cost", "(usd)"), vec![5..10]);
        assert!(match_ranges("abc", ".*").is_empty());
    }

    #[test]
    fn test_count() {
        let h = Highlighter::new("na").unwrap();
        assert_eq!(h.count("banana"), 2);
    }
}
