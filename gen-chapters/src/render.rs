//! Rendering of documents and patches to stdout or files.

use anyhow::{Context, Result};
use chapter_text::{Document, Element, TranslationPatch};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Marker printed for a break between content blocks.
const BREAK_MARKER: &str = "* * *";

/// Print a readable outline: titles as `## Title`, paragraphs line by line.
pub fn print_outline(doc: &Document) -> Result<()> {
    let stdout = io::stdout();
    write_outline(doc, &mut stdout.lock()).context("Failed to write outline")
}

fn write_outline<W: Write>(doc: &Document, out: &mut W) -> io::Result<()> {
    for element in doc {
        match element {
            Element::ChapterTitle(title) => writeln!(out, "## {}", title)?,
            Element::Paragraph(lines) => {
                for line in lines {
                    writeln!(out, "{}", line)?;
                }
            }
            Element::Break => writeln!(out, "{}", BREAK_MARKER)?,
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn print_json(doc: &Document) -> Result<()> {
    let json = serde_json::to_string_pretty(doc).context("Failed to serialize document")?;
    println!("{}", json);
    Ok(())
}

/// Write `value` as pretty JSON to `path`, or stdout when `None`.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize JSON")?;
    match path {
        Some(path) => std::fs::write(path, json + "\n")
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}

/// Apply `patch` to `path`, or stdout when `None`.
///
/// Counts are checked before `path` is opened, so a mismatch leaves an
/// existing file untouched (including the source file itself).
pub fn write_patch(patch: TranslationPatch, path: Option<&Path>) -> Result<()> {
    patch.check_counts()?;

    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            patch
                .apply(&mut BufWriter::new(file))
                .with_context(|| format!("Failed to write {}", path.display()))
        }
        None => {
            let stdout = io::stdout();
            patch
                .apply(&mut stdout.lock())
                .context("Failed to write patched lines")
        }
    }
}
