//! # npcchat Core Library
//!
//! Conversation state for a single NPC replaying a batch of player chat.
//!
//! Every player the NPC talks to gets a [`PlayerState`] holding:
//!
//! - **Conversation window** — the last few things the player said, oldest first
//! - **Mood** — how the NPC currently feels about that player
//!
//! The state for all players lives in a [`ConversationBook`] owned by whoever
//! drives the batch; nothing in this crate is global.
//!
//! ## Modules
//!
//! - `types` — player IDs, chat messages, timestamps
//! - `mood` — the keyword mood classifier
//! - `window` — the bounded FIFO conversation window
//! - `state` — per-player state book
//! - `sink` — append-only text sinks for transcripts and run logs
//! - `config` — `npcchat.toml` configuration

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod mood;
pub mod sink;
pub mod state;
pub mod types;
pub mod window;

pub use config::NpcChatConfig;
pub use error::CoreError;
pub use mood::Mood;
pub use state::{ConversationBook, PlayerState};
pub use types::*;
pub use window::ConversationWindow;
