//! Merge a companion notes document into the main text.
//!
//! Notes are laid out as a chapter per marker: the marker text as a title,
//! then the note lines. Each `[title]` placeholder in the main text is
//! replaced by ` (note)`, one note line per placeholder, searching forward
//! only.

mod cursor;

pub use cursor::MarkerCursor;

use log::{debug, info};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::document::{Document, Element};

/// Merge `notes` into `main`, returning the rewritten main document.
///
/// Stops silently at the first note whose marker cannot be found ahead of
/// the cursor; later notes are left unmerged.
pub fn merge_notes(mut main: Document, mut notes: Document) -> Document {
    normalize_note_titles(&mut notes);

    let titles = notes.chapter_titles();
    if titles.is_empty() {
        debug!("Notes document has no chapter titles, nothing to merge");
        return main;
    }

    let mut cursor = MarkerCursor::new();
    let mut merged = 0usize;

    for title in &titles {
        let marker = format!("[{}]", title);
        for note in notes.chapter_paragraphs(title) {
            let replacement = format!(" ({})", note);
            if cursor.replace_next(&mut main, &marker, &replacement).is_none() {
                debug!(
                    "No {} marker at or after element {}, stopping merge",
                    marker,
                    cursor.position()
                );
                info!("Merged {} note(s) before stopping", merged);
                return main;
            }
            merged += 1;
        }
    }

    info!("Merged {} note(s) from {} chapter(s)", merged, titles.len());
    main
}

/// Notes files put a gap after every line, so both the marker and its note
/// look like titles. Among consecutive title classifications, keep the
/// first and demote the second; paragraphs and breaks in between do not
/// reset the pairing.
fn normalize_note_titles(notes: &mut Document) {
    let mut previous_was_title = false;

    for element in notes.elements_mut() {
        if !matches!(element, Element::ChapterTitle(_)) {
            continue;
        }
        if previous_was_title {
            element.demote_to_paragraph();
            previous_was_title = false;
        } else {
            previous_was_title = true;
        }
    }
}

/// Companion notes path: `book.txt` -> `book<suffix>.txt`.
pub fn notes_filename(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_stem()
        .map(OsStr::to_os_string)
        .unwrap_or_default();
    name.push(suffix);
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    path.with_file_name(name)
}
