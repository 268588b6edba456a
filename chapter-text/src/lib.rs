//! Structure plain text books for the gen-chapters workspace
//!
//! Provides:
//! - Segmentation of a line stream into paragraphs, chapter titles and breaks
//! - Chapter queries over a segmented document
//! - Merging of a companion notes text into `[marker]` placeholders
//! - Translation patches for tag-delimited markup lines
//! - FFMETADATA1 chapter export

pub mod config;
pub mod document;
pub mod error;
mod input;
pub mod metadata;
pub mod notes;
pub mod paragraph;
pub mod patch;

pub use config::{ChapterTextConfig, DEFAULT_BREAK_THRESHOLD, DEFAULT_NOTES_SUFFIX};
pub use document::{Document, Element, ElementKind, Segmenter};
pub use error::{Result, TextError};
pub use metadata::{ffmetadata, write_ffmetadata};
pub use notes::{MarkerCursor, merge_notes, notes_filename};
pub use paragraph::Paragraph;
pub use patch::{Decoration, TranslationPatch};
