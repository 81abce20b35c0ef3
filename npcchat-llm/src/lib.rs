//! # npcchat-llm — Reply Generation for npcchat
//!
//! Turns a player's message into an NPC reply through an external
//! text-generation service, and keeps trying until it gets one.
//!
//! Backends:
//!   - **Gemini** (`generateContent`, default)
//!   - **OpenAI-compatible API** (`/v1/chat/completions`)
//!   - **Ollama** (local, `/api/generate`)
//!
//! # Retry protocol
//!
//! ```text
//!            ┌──────────── WaitElapsed ────────────┐
//!            ▼                                     │
//!      ┌───────────┐   Failed(class)   ┌───────────────────┐
//!      │ Attempting│ ─────────────────▶│ BackoffWait(delay)│
//!      └───────────┘                   └───────────────────┘
//!            │ Succeeded
//!            ▼
//!      ┌───────────┐
//!      │  Success  │   rate limit: delay = 2^n s (n = 1, 2, 3, ...)
//!      └───────────┘   other error: delay = 2 s
//! ```
//!
//! The generator never gives up and never returns an error.

pub mod backend;
pub mod backoff;
pub mod classify;
pub mod client;
pub mod error;
pub mod generator;
pub mod prompt;
pub mod types;

pub use backend::TextBackend;
pub use backoff::{RetryEvent, RetryMachine, RetryPolicy, RetryState, Sleeper, TokioSleeper};
pub use classify::{ErrorClassifier, FailureClass, KeywordClassifier};
pub use client::{LlmClient, LlmProvider};
pub use error::LlmError;
pub use generator::ReplyGenerator;
pub use prompt::PromptTemplate;
pub use types::LlmResponse;
