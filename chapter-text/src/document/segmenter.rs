//! Line stream to document segmentation.

use log::debug;
use std::io::BufRead;

use super::{Document, Element};
use crate::config::{ChapterTextConfig, DEFAULT_BREAK_THRESHOLD};
use crate::error::Result;
use crate::input::for_each_line;
use crate::paragraph::Paragraph;

/// Turns lines into paragraphs, breaks and chapter titles.
///
/// Non-empty lines with no significant gap between them accumulate into one
/// paragraph element. A gap only counts once it is longer than
/// `break_threshold` empty lines. After the scan, any single-line paragraph
/// directly followed by a break is reclassified as a chapter title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segmenter {
    break_threshold: usize,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(DEFAULT_BREAK_THRESHOLD)
    }
}

impl Segmenter {
    pub fn new(break_threshold: usize) -> Self {
        Self { break_threshold }
    }

    pub fn from_config(config: &ChapterTextConfig) -> Self {
        Self::new(config.break_threshold)
    }

    pub fn break_threshold(&self) -> usize {
        self.break_threshold
    }

    /// Segment an in-memory sequence of lines.
    pub fn segment<I, S>(&self, lines: I) -> Document
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut scan = Scan::new(self.break_threshold);
        for line in lines {
            scan.push(line.into());
        }
        scan.finish()
    }

    /// Drain a reader line by line. `\n` and `\r\n` terminators are stripped
    /// and bytes that are not valid UTF-8 are replaced with U+FFFD.
    pub fn segment_reader<R: BufRead>(&self, reader: R) -> Result<Document> {
        let mut scan = Scan::new(self.break_threshold);
        for_each_line(reader, |line| scan.push(line))?;
        Ok(scan.finish())
    }
}

/// State of the first pass.
struct Scan {
    break_threshold: usize,
    empty_run: usize,
    lines_seen: usize,
    elements: Vec<Element>,
}

impl Scan {
    fn new(break_threshold: usize) -> Self {
        Self {
            break_threshold,
            empty_run: 0,
            lines_seen: 0,
            elements: Vec::new(),
        }
    }

    fn push(&mut self, line: String) {
        self.lines_seen += 1;

        if line.is_empty() {
            self.empty_run += 1;
            return;
        }

        if self.empty_run > self.break_threshold {
            self.elements.push(Element::Break);
        }

        match self.elements.last_mut() {
            Some(Element::Paragraph(lines)) => lines.push(Paragraph::from(line)),
            _ => self
                .elements
                .push(Element::Paragraph(vec![Paragraph::from(line)])),
        }

        self.empty_run = 0;
    }

    fn finish(mut self) -> Document {
        let mut titles = 0;
        for i in 1..self.elements.len() {
            if self.elements[i] == Element::Break && self.elements[i - 1].promote_to_title() {
                titles += 1;
            }
        }

        debug!(
            "Segmented {} line(s) into {} element(s), {} chapter title(s)",
            self.lines_seen,
            self.elements.len(),
            titles
        );

        Document::from_elements(self.elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ElementKind;
    use proptest::prelude::*;
    use std::io::Cursor;

    fn kinds(doc: &Document) -> Vec<ElementKind> {
        doc.iter().map(Element::kind).collect()
    }

    fn gap(n: usize) -> Vec<&'static str> {
        vec![""; n]
    }

    #[test]
    fn test_empty_input() {
        let doc = Segmenter::default().segment(Vec::<String>::new());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_only_empty_lines() {
        let doc = Segmenter::default().segment(gap(10));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_consecutive_lines_accumulate() {
        let doc = Segmenter::default().segment(["one", "two", "three"]);
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.elements()[0].content().len(), 3);
        assert_eq!(doc.elements()[0].kind(), ElementKind::Paragraph);
    }

    #[test]
    fn test_short_gaps_do_not_split_paragraphs() {
        let mut lines = vec!["one"];
        lines.extend(gap(3));
        lines.push("two");
        let doc = Segmenter::default().segment(lines);
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.elements()[0].content().len(), 2);
    }

    #[test]
    fn test_title_needs_more_than_threshold() {
        for blanks in 1..=3 {
            let mut lines = vec!["Chapter One"];
            lines.extend(gap(blanks));
            lines.push("Body text.");
            let doc = Segmenter::default().segment(lines);
            assert!(
                doc.iter().all(|e| e.kind() == ElementKind::Paragraph),
                "{} blank line(s) should not produce a title",
                blanks
            );
        }

        for blanks in [4, 5, 9] {
            let mut lines = vec!["Chapter One"];
            lines.extend(gap(blanks));
            lines.push("Body text.");
            let doc = Segmenter::default().segment(lines);
            assert_eq!(
                kinds(&doc),
                vec![
                    ElementKind::ChapterTitle,
                    ElementKind::Break,
                    ElementKind::Paragraph
                ]
            );
            assert_eq!(doc.elements()[0].content()[0].as_str(), "Chapter One");
        }
    }

    #[test]
    fn test_multi_line_paragraph_before_break_is_not_title() {
        let mut lines = vec!["line one", "line two"];
        lines.extend(gap(4));
        lines.push("after");
        let doc = Segmenter::default().segment(lines);
        assert_eq!(
            kinds(&doc),
            vec![ElementKind::Paragraph, ElementKind::Break, ElementKind::Paragraph]
        );
    }

    #[test]
    fn test_leading_gap_emits_break_at_front() {
        let mut lines = gap(5);
        lines.push("text");
        let doc = Segmenter::default().segment(lines);
        assert_eq!(kinds(&doc), vec![ElementKind::Break, ElementKind::Paragraph]);
    }

    #[test]
    fn test_trailing_gap_adds_nothing() {
        let mut lines = vec!["Only line"];
        lines.extend(gap(8));
        let doc = Segmenter::default().segment(lines);
        assert_eq!(kinds(&doc), vec![ElementKind::Paragraph]);
    }

    #[test]
    fn test_lone_paragraph_is_never_title() {
        let doc = Segmenter::default().segment(["Lonely"]);
        assert_eq!(kinds(&doc), vec![ElementKind::Paragraph]);
    }

    #[test]
    fn test_custom_threshold() {
        let lines = vec!["Title", "", "Body"];
        let doc = Segmenter::new(0).segment(lines);
        assert_eq!(
            kinds(&doc),
            vec![
                ElementKind::ChapterTitle,
                ElementKind::Break,
                ElementKind::Paragraph
            ]
        );
    }

    #[test]
    fn test_segment_reader_strips_crlf() {
        let text = "Title\r\n\r\n\r\n\r\n\r\nFirst line\r\nSecond line\r\n";
        let doc = Segmenter::default()
            .segment_reader(Cursor::new(text))
            .unwrap();
        assert_eq!(
            kinds(&doc),
            vec![
                ElementKind::ChapterTitle,
                ElementKind::Break,
                ElementKind::Paragraph
            ]
        );
        assert_eq!(doc.elements()[2].content()[1].as_str(), "Second line");
    }

    #[test]
    fn test_segment_reader_accepts_invalid_utf8() {
        let bytes: &[u8] = b"Ca\xefda\n\n\n\n\nBody\n";
        let doc = Segmenter::default().segment_reader(bytes).unwrap();
        assert_eq!(doc.chapter_titles(), vec!["Ca\u{fffd}da"]);
    }

    #[test]
    fn test_from_config_uses_threshold() {
        let config = ChapterTextConfig {
            break_threshold: 7,
            ..ChapterTextConfig::default()
        };
        assert_eq!(Segmenter::from_config(&config).break_threshold(), 7);
    }

    proptest! {
        #[test]
        fn prop_segmentation_is_deterministic(
            lines in prop::collection::vec(prop_oneof![Just(String::new()), "[a-z ]{1,12}"], 0..60)
        ) {
            let segmenter = Segmenter::default();
            let first = segmenter.segment(lines.clone());
            let second = segmenter.segment(lines);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_no_adjacent_paragraph_elements(
            lines in prop::collection::vec(prop_oneof![Just(String::new()), "[a-z]{1,8}"], 0..60)
        ) {
            let doc = Segmenter::default().segment(lines);
            for pair in doc.elements().windows(2) {
                prop_assert!(
                    !(pair[0].kind() == ElementKind::Paragraph && pair[1].kind() == ElementKind::Paragraph)
                );
            }
        }
    }
}
