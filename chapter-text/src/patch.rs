//! Translation patches for tag-delimited markup lines.
//!
//! A patch is used in one pass: decorate the source lines, hand
//! [`TranslationPatch::source_content`] to a translator, feed the results
//! back with [`TranslationPatch::add_translated_content`], then
//! [`TranslationPatch::apply`] once. Everything outside the translatable span
//! of a line is written back byte for byte; every output line ends in `\n`.

use log::{debug, trace};
use std::collections::BTreeMap;
use std::io::{BufRead, Read, Write};
use std::ops::Range;

use crate::error::{Result, TextError};
use crate::input::for_each_line;

/// Byte offsets of the translatable span `[prefix, suffix)` in a line.
///
/// The span starts after the first `>` and ends at the last `<`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoration {
    prefix: usize,
    suffix: usize,
}

impl Decoration {
    /// Locate the span in `line`, or `None` if the line has no `>`, no `<`,
    /// or the last `<` comes before the first `>`.
    pub fn for_line(line: &str) -> Option<Self> {
        let prefix = line.find('>')? + 1;
        let suffix = line.rfind('<')?;
        (prefix <= suffix).then_some(Self { prefix, suffix })
    }

    pub fn span(&self) -> Range<usize> {
        self.prefix..self.suffix
    }

    /// The translatable text of `line`.
    pub fn content<'a>(&self, line: &'a str) -> &'a str {
        &line[self.span()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct TranslationPatch {
    source_lines: Vec<String>,
    decorations: BTreeMap<usize, Decoration>,
    translated_content: Vec<String>,
}

impl TranslationPatch {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            source_lines: lines.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Read every line of `reader`. Terminators are dropped and bytes that
    /// are not valid UTF-8 are replaced with U+FFFD.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = Vec::new();
        for_each_line(reader, |line| lines.push(line))?;
        Ok(Self::new(lines))
    }

    /// Find the translatable span of every source line. Lines without one
    /// are left out and pass through [`apply`](Self::apply) untouched.
    pub fn decorate(&mut self) {
        self.decorations = self
            .source_lines
            .iter()
            .enumerate()
            .filter_map(|(index, line)| match Decoration::for_line(line) {
                Some(decoration) => Some((index, decoration)),
                None => {
                    trace!("Line {} has no translatable span", index);
                    None
                }
            })
            .collect();

        debug!(
            "Decorated {} of {} line(s)",
            self.decorations.len(),
            self.source_lines.len()
        );
    }

    pub fn source_lines(&self) -> &[String] {
        &self.source_lines
    }

    pub fn decoration(&self, line_index: usize) -> Option<Decoration> {
        self.decorations.get(&line_index).copied()
    }

    /// Number of lines with a translatable span.
    pub fn decorated_count(&self) -> usize {
        self.decorations.len()
    }

    /// Translatable text of each decorated line, in line order.
    pub fn source_content(&self) -> Vec<&str> {
        self.decorations
            .iter()
            .map(|(&index, decoration)| decoration.content(&self.source_lines[index]))
            .collect()
    }

    /// Append translated text. May be called repeatedly; order accumulates.
    pub fn add_translated_content<I, S>(&mut self, content: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.translated_content
            .extend(content.into_iter().map(Into::into));
    }

    /// Append translated text from a JSON array of strings.
    pub fn add_translated_json<R: Read>(&mut self, reader: R) -> Result<()> {
        let content: Vec<String> = serde_json::from_reader(reader)?;
        self.add_translated_content(content);
        Ok(())
    }

    /// Fail unless exactly one translated item was supplied per decorated line.
    pub fn check_counts(&self) -> Result<()> {
        if self.translated_content.len() != self.decorations.len() {
            return Err(self.count_mismatch());
        }
        Ok(())
    }

    fn count_mismatch(&self) -> TextError {
        TextError::TranslatedContentMismatch {
            expected: self.decorations.len(),
            supplied: self.translated_content.len(),
        }
    }

    /// Write every source line with its span replaced by the next translated
    /// item. Fails before writing anything if the number of translated items
    /// differs from the number of decorated lines.
    pub fn apply<W: Write>(self, writer: &mut W) -> Result<()> {
        self.check_counts()?;

        debug!(
            "Applying {} translation(s) to {} line(s)",
            self.translated_content.len(),
            self.source_lines.len()
        );

        let mut translated = self.translated_content.iter();
        for (index, line) in self.source_lines.iter().enumerate() {
            match self.decorations.get(&index) {
                Some(decoration) => {
                    let content = translated.next().ok_or_else(|| self.count_mismatch())?;
                    writer.write_all(line[..decoration.prefix].as_bytes())?;
                    writer.write_all(content.as_bytes())?;
                    writer.write_all(line[decoration.suffix..].as_bytes())?;
                }
                None => writer.write_all(line.as_bytes())?,
            }
            writer.write_all(b"\n")?;
        }

        writer.flush()?;
        Ok(())
    }
}
