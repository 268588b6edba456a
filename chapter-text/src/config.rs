//! Configuration for segmentation and notes discovery.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TextError};

/// Empty lines in a row that a gap must exceed to count as a break.
pub const DEFAULT_BREAK_THRESHOLD: usize = 3;

/// Suffix inserted before the extension to find a companion notes file.
pub const DEFAULT_NOTES_SUFFIX: &str = "_notes";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterTextConfig {
    /// A run of empty lines longer than this becomes a Break
    #[serde(default = "default_break_threshold")]
    pub break_threshold: usize,

    /// Suffix used to derive the notes filename (book.txt -> book_notes.txt)
    #[serde(default = "default_notes_suffix")]
    pub notes_suffix: String,
}

fn default_break_threshold() -> usize {
    DEFAULT_BREAK_THRESHOLD
}

fn default_notes_suffix() -> String {
    DEFAULT_NOTES_SUFFIX.to_string()
}

impl Default for ChapterTextConfig {
    fn default() -> Self {
        Self {
            break_threshold: default_break_threshold(),
            notes_suffix: default_notes_suffix(),
        }
    }
}

impl ChapterTextConfig {
    /// Get the config file path: <config dir>/cli-programs/gen-chapters.toml
    pub fn config_path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| TextError::ConfigError("could not determine config directory".into()))?;
        Ok(dir.join("cli-programs").join("gen-chapters.toml"))
    }

    /// Load config from the default location, returning defaults if the file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: ChapterTextConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Reject values that would make notes discovery ambiguous.
    pub fn validate(&self) -> Result<()> {
        if self.notes_suffix.is_empty() {
            return Err(TextError::ConfigError(
                "notes_suffix must not be empty".into(),
            ));
        }
        Ok(())
    }
}
