//! Error types for polysay

use std::io;
use thiserror::Error;

/// Main error type for polysay
#[derive(Error, Debug)]
pub enum PolysayError {
    #[error("Speech engine error: {0}")]
    Speech(String),

    #[error("Language identification error: {0}")]
    Identify(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("INI parse error: {0}")]
    IniParse(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for polysay operations
pub type Result<T> = std::result::Result<T, PolysayError>;

impl From<String> for PolysayError {
    fn from(s: String) -> Self {
        PolysayError::Other(s)
    }
}

impl From<&str> for PolysayError {
    fn from(s: &str) -> Self {
        PolysayError::Other(s.to_string())
    }
}
