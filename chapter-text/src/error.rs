use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextError {
    #[error(
        "Translated content count mismatch: {expected} decorated line(s) but {supplied} translation(s) supplied"
    )]
    TranslatedContentMismatch { expected: usize, supplied: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, TextError>;
