//! Error types for notegen library.
//!
//! Parsing note content never fails; these errors only arise at the I/O and
//! wire boundaries around the engine.

use std::io;
use thiserror::Error;

/// Result type alias for notegen operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for notegen library.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The organize method identifier is not one of the known templates.
    #[error("Unknown organize method: {0}")]
    UnknownOrganizeMethod(String),

    /// File content is not valid UTF-8.
    #[error("Text encoding error: {0}")]
    Encoding(String),
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::Encoding(err.to_string())
    }
}
