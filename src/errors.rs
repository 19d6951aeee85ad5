//! Error types for newsbrief.

use thiserror::Error;

/// Main error type for newsbrief operations.
///
/// Store mutations never surface these; they are reserved for opening
/// storage, loading configuration, and parsing external input.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// SQLite error.
    #[error("SQLite error: {0}")]
    SQLite(#[from] rusqlite::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}
