//! Chapter queries over a segmented document.

use super::{Document, Element};
use crate::paragraph::Paragraph;

impl Document {
    /// Titles of every chapter, in document order.
    pub fn chapter_titles(&self) -> Vec<String> {
        self.iter()
            .filter(|e| matches!(e, Element::ChapterTitle(_)))
            .flat_map(|e| e.content().iter().map(Paragraph::to_string))
            .collect()
    }

    /// Lines of every paragraph between the first chapter titled `title`
    /// and the next chapter title. Empty if no chapter has that title.
    pub fn chapter_paragraphs(&self, title: &str) -> Vec<&Paragraph> {
        let mut paragraphs = Vec::new();
        let mut accumulate = false;

        for element in self.iter() {
            match element {
                Element::Break => continue,
                Element::ChapterTitle(_) if accumulate => break,
                Element::ChapterTitle(heading) => accumulate = heading.as_str() == title,
                Element::Paragraph(lines) if accumulate => paragraphs.extend(lines),
                Element::Paragraph(_) => {}
            }
        }

        paragraphs
    }
}
