//! Batch loading.
//!
//! A batch is a JSON array of `{player_id, text, timestamp}` objects in any
//! order. Loading is all-or-nothing: one bad entry fails the whole batch.

use std::path::{Path, PathBuf};

use tracing::info;

use npcchat_core::types::ChatMessage;

use crate::error::{Result, SimError};

/// Something that yields a full batch of messages.
pub trait BatchSource {
    /// Load every message, in source order.
    ///
    /// # Errors
    /// Returns an error if the batch is missing or malformed.
    fn load(&self) -> Result<Vec<ChatMessage>>;
}

/// Reads a batch from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Create a source reading `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The batch file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BatchSource for JsonFileSource {
    fn load(&self) -> Result<Vec<ChatMessage>> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| SimError::ReadBatch {
            path: self.path.clone(),
            source,
        })?;
        let messages: Vec<ChatMessage> =
            serde_json::from_str(&content).map_err(|source| SimError::ParseBatch {
                path: self.path.clone(),
                source,
            })?;

        info!(
            path = %self.path.display(),
            messages = messages.len(),
            "Batch loaded"
        );
        Ok(messages)
    }
}

/// An in-memory batch.
impl BatchSource for Vec<ChatMessage> {
    fn load(&self) -> Result<Vec<ChatMessage>> {
        Ok(self.clone())
    }
}

/// Sort messages by timestamp, oldest first. Stable: messages with equal
/// timestamps keep their source order.
pub fn sort_chronologically(messages: &mut [ChatMessage]) {
    messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
}
