//! Error types for speakpad

use std::io;
use thiserror::Error;

/// Main error type for speakpad
#[derive(Error, Debug)]
pub enum SpeakpadError {
    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Speech synthesis error: {0}")]
    Speech(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for speakpad operations
pub type Result<T> = std::result::Result<T, SpeakpadError>;

impl From<String> for SpeakpadError {
    fn from(s: String) -> Self {
        SpeakpadError::Other(s)
    }
}

impl From<&str> for SpeakpadError {
    fn from(s: &str) -> Self {
        SpeakpadError::Other(s.to_string())
    }
}
