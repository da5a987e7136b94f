//! Error types for Vidlens.

use thiserror::Error;

/// Library-level error type for Vidlens operations.
#[derive(Error, Debug)]
pub enum VidlensError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No YouTube video ID found in: {0}")]
    VideoIdNotFound(String),

    #[error("Transcript unavailable: {0}")]
    Transcript(String),

    #[error("Content generation failed: {0}")]
    Generation(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("PDF export failed: {0}")]
    Export(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Result type alias for Vidlens operations.
pub type Result<T> = std::result::Result<T, VidlensError>;
