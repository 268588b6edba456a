//! A single line of text as it appears in a document.

use serde::Serialize;
use std::fmt;

/// One non-empty input line. Paragraph elements hold one or more of these.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Paragraph(String);

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split on `". "`. The separator is consumed, so only the last
    /// sentence keeps its closing period.
    pub fn sentences(&self) -> Vec<&str> {
        self.0.split(". ").collect()
    }

    /// Replace the first occurrence of `marker`. Returns false if absent.
    pub(crate) fn replace_first(&mut self, marker: &str, replacement: &str) -> bool {
        if !self.0.contains(marker) {
            return false;
        }
        self.0 = self.0.replacen(marker, replacement, 1);
        true
    }
}

impl fmt::Display for Paragraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Paragraph {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for Paragraph {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl AsRef<str> for Paragraph {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
