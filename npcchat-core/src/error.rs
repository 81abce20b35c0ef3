//! Error types for the npcchat core library.

use thiserror::Error;

/// Top-level error type for core operations.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A timestamp string could not be read as ISO-8601.
    #[error("Invalid timestamp '{value}': expected ISO-8601")]
    InvalidTimestamp {
        /// The offending input.
        value: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, CoreError>;
