//! Forward-only marker search over a document.

use log::trace;

use crate::document::{Document, Element};

/// Scan position shared by successive marker lookups.
///
/// The position only moves forward, so a marker that appears before an
/// earlier match is never found. It stays on the matched element, which lets
/// several markers in one paragraph be replaced in turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerCursor {
    position: usize,
}

impl MarkerCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the element the last match was found in.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Replace the first `marker` in the first paragraph line, at or after
    /// the cursor, that contains it. Returns the matched element index, or
    /// `None` if the rest of the document has no such marker.
    pub fn replace_next(
        &mut self,
        doc: &mut Document,
        marker: &str,
        replacement: &str,
    ) -> Option<usize> {
        let elements = doc.elements_mut();
        let start = self.position;

        for (offset, element) in elements.iter_mut().skip(start).enumerate() {
            let Element::Paragraph(lines) = element else {
                continue;
            };
            if lines.iter_mut().any(|line| line.replace_first(marker, replacement)) {
                self.position = start + offset;
                trace!("Replaced {} at element {}", marker, self.position);
                return Some(self.position);
            }
        }

        None
    }
}
