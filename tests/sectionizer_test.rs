//! Integration tests for report sectioning.

use reportlens::{segment, Document, SectionOptions, Sectionizer};

fn titles(text: &str) -> Vec<String> {
    segment(text).into_iter().map(|s| s.title).collect()
}

#[test]
fn test_n_headings_give_n_plus_one_sections() {
    for n in 0..6 {
        let mut text = String::from("# Title\n\n## Abstract\nThe abstract.\n\n");
        for i in 0..n {
            text.push_str(&format!("## Part {}\nBody of part {}.\n\n", i, i));
        }

        let sections = segment(&text);
        assert_eq!(sections.len(), n + 1, "with {} headings", n);
        assert_eq!(sections[0].title, "Abstract");
        for (i, section) in sections.iter().skip(1).enumerate() {
            assert_eq!(section.title, format!("Part {}", i));
        }
    }
}

#[test]
fn test_empty_trailing_heading_dropped() {
    let text = "## Abstract\nabstract text\n## I. X\nfoo\n## II. Y\n";
    let sections = segment(text);

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].title, "Abstract");
    assert_eq!(sections[0].content, "abstract text");
    assert_eq!(sections[1].title, "I. X");
    assert_eq!(sections[1].content.trim(), "foo");
}

#[test]
fn test_whitespace_between_headings_dropped() {
    assert_eq!(
        titles("## Abstract\na\n## Empty\n   \n\n## Full\nbody\n"),
        ["Abstract", "Full"]
    );
}

#[test]
fn test_content_excludes_heading_and_keeps_lines() {
    let text = "## Abstract\na\n## Methods\nline one\n\nline two\n";
    let sections = segment(text);
    assert_eq!(sections[1].content, "line one\n\nline two\n");
    assert!(!sections[1].content.contains("## "));
}

#[test]
fn test_deeper_headings_stay_in_content() {
    let text = "## Abstract\na\n## Results\n### Detail\nnumbers\n";
    let sections = segment(text);
    assert_eq!(sections.len(), 2);
    assert!(sections[1].content.contains("### Detail"));
}

#[test]
fn test_abstract_kept_when_empty() {
    let sections = segment("## Abstract\n\n## I. Intro\ntext\n");
    assert_eq!(sections[0].title, "Abstract");
    assert!(sections[0].content.is_empty());
    assert_eq!(sections.len(), 2);
}

#[test]
fn test_abstract_end_marker() {
    let text = "## Abstract\nkeep this\nKeywords: storage\n## I. Intro\ntext\n";
    let sectionizer =
        Sectionizer::new(SectionOptions::new().with_abstract_end_marker("Keywords:"));
    let sections = sectionizer.segment(text);
    assert_eq!(sections[0].content, "keep this");
    assert_eq!(sections[1].title, "I. Intro");
}

#[test]
fn test_document_sections_match_segment() {
    let text = "# Report\n## Abstract\nx\n## A\ny\n";
    let doc = Document::new(text);
    assert_eq!(doc.sections(), segment(text));
    assert_eq!(doc.title(), Some("Report"));
}
