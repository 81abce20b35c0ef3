//! Error types for batch replay.

use std::path::PathBuf;

use thiserror::Error;

use npcchat_core::CoreError;
use npcchat_llm::LlmError;

/// Errors that abort a batch run.
#[derive(Error, Debug)]
pub enum SimError {
    /// The batch file could not be read.
    #[error("Failed to read batch {}: {source}", path.display())]
    ReadBatch {
        /// Batch file location.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The batch file is not a valid list of messages.
    #[error("Malformed batch {}: {source}", path.display())]
    ParseBatch {
        /// Batch file location.
        path: PathBuf,
        /// Underlying JSON failure.
        source: serde_json::Error,
    },

    /// Core failure: configuration, timestamps, sink I/O.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// LLM backend could not be set up.
    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, SimError>;
