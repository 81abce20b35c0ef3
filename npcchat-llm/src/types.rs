//! Core types for LLM responses.

use serde::{Deserialize, Serialize};

/// A response from the LLM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    /// The generated text, untrimmed.
    pub text: String,
    /// Latency in milliseconds.
    pub latency_ms: u64,
    /// Which model was used.
    pub model: String,
}
