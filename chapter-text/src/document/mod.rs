//! Structured document model: an ordered run of paragraphs, chapter titles and breaks.

mod index;
mod segmenter;

pub use segmenter::Segmenter;

use serde::Serialize;
use std::io::BufRead;

use crate::config::ChapterTextConfig;
use crate::error::Result;
use crate::notes::merge_notes;
use crate::paragraph::Paragraph;

/// The kind of an [`Element`], without its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Paragraph,
    ChapterTitle,
    Break,
}

/// One structural unit of a segmented document.
///
/// A title always holds exactly one line and a break holds none, so those
/// shapes are carried by the variants themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum Element {
    /// Consecutive non-empty lines, never empty
    Paragraph(Vec<Paragraph>),
    /// A single line followed by a significant gap
    ChapterTitle(Paragraph),
    /// A gap of more than the break threshold empty lines
    Break,
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Paragraph(_) => ElementKind::Paragraph,
            Element::ChapterTitle(_) => ElementKind::ChapterTitle,
            Element::Break => ElementKind::Break,
        }
    }

    /// Lines carried by this element; empty for a break.
    pub fn content(&self) -> &[Paragraph] {
        match self {
            Element::Paragraph(lines) => lines,
            Element::ChapterTitle(title) => std::slice::from_ref(title),
            Element::Break => &[],
        }
    }

    /// Turn a single-line paragraph into a chapter title.
    pub(crate) fn promote_to_title(&mut self) -> bool {
        match self {
            Element::Paragraph(lines) if lines.len() == 1 => {
                let title = lines.remove(0);
                *self = Element::ChapterTitle(title);
                true
            }
            _ => false,
        }
    }

    /// Turn a chapter title back into a one-line paragraph.
    pub(crate) fn demote_to_paragraph(&mut self) -> bool {
        match std::mem::replace(self, Element::Break) {
            Element::ChapterTitle(title) => {
                *self = Element::Paragraph(vec![title]);
                true
            }
            other => {
                *self = other;
                false
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub(crate) fn from_elements(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Segment text lines using the default break threshold.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Segmenter::default().segment(lines)
    }

    /// Segment a document and its companion notes, then merge the notes in.
    pub fn with_notes<D, N>(document: D, notes: N, config: &ChapterTextConfig) -> Result<Self>
    where
        D: BufRead,
        N: BufRead,
    {
        let segmenter = Segmenter::from_config(config);
        let main = segmenter.segment_reader(document)?;
        let notes = segmenter.segment_reader(notes)?;
        Ok(merge_notes(main, notes))
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub(crate) fn elements_mut(&mut self) -> &mut [Element] {
        &mut self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_break_carries_no_content() {
        assert!(Element::Break.content().is_empty());
        assert_eq!(Element::Break.kind(), ElementKind::Break);
    }

    #[test]
    fn test_title_content_is_single_line() {
        let title = Element::ChapterTitle(Paragraph::new("One"));
        assert_eq!(title.content(), &[Paragraph::new("One")]);
        assert_eq!(title.kind(), ElementKind::ChapterTitle);
    }

    #[test]
    fn test_promote_only_single_line_paragraphs() {
        let mut single = Element::Paragraph(vec![Paragraph::new("Title")]);
        assert!(single.promote_to_title());
        assert_eq!(single, Element::ChapterTitle(Paragraph::new("Title")));

        let mut double = Element::Paragraph(vec![Paragraph::new("a"), Paragraph::new("b")]);
        assert!(!double.promote_to_title());
        assert_eq!(double.kind(), ElementKind::Paragraph);

        let mut gap = Element::Break;
        assert!(!gap.promote_to_title());
    }

    #[test]
    fn test_demote_title() {
        let mut title = Element::ChapterTitle(Paragraph::new("Note"));
        assert!(title.demote_to_paragraph());
        assert_eq!(title, Element::Paragraph(vec![Paragraph::new("Note")]));

        let mut gap = Element::Break;
        assert!(!gap.demote_to_paragraph());
        assert_eq!(gap, Element::Break);
    }

    #[test]
    fn test_serialize_shape() {
        let doc = Document::from_elements(vec![
            Element::ChapterTitle(Paragraph::new("One")),
            Element::Break,
            Element::Paragraph(vec![Paragraph::new("text")]),
        ]);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"kind": "chapter_title", "content": "One"},
                {"kind": "break"},
                {"kind": "paragraph", "content": ["text"]},
            ])
        );
    }

    #[test]
    fn test_with_notes() {
        let main = "Intro\n\n\n\n\nSee [1] here.\n";
        let notes = "1\n\n\n\n\nA footnote.\n";
        let doc = Document::with_notes(
            Cursor::new(main),
            Cursor::new(notes),
            &ChapterTextConfig::default(),
        )
        .unwrap();

        assert_eq!(
            doc.elements()[2],
            Element::Paragraph(vec![Paragraph::new("See  (A footnote.) here.")])
        );
    }
}
