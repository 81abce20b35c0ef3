//! # npcchat-sim — Batch Replay for npcchat
//!
//! Reads a batch of player chat, replays it in timestamp order through one
//! NPC, and writes what the NPC said back.
//!
//! ```text
//! players.json ──▶ loader ──▶ sort by timestamp
//!                                  │
//!                                  ▼ (one message at a time)
//!            ConversationBook ◀── orchestrator ──▶ ReplyGenerator ──▶ ai_prompts.txt
//!                                  │
//!                                  ▼
//!                         console + logs.txt
//! ```
//!
//! ## Modules
//!
//! - `loader` — batch sources and chronological sorting
//! - `record` — per-message run records and their text layout
//! - `orchestrator` — the replay loop
//! - `app` — configuration, logging and wiring for the `npcchat` binary

#![deny(clippy::unwrap_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod error;
pub mod loader;
pub mod orchestrator;
pub mod record;

pub use error::SimError;
pub use loader::{BatchSource, JsonFileSource};
pub use orchestrator::{Orchestrator, RunSummary};
pub use record::ReplyRecord;
