//! Batch Orchestrator — replays a batch through the NPC.
//!
//! Messages are handled strictly one at a time in timestamp order: update
//! the player's window and mood, wait for the reply (however many retries
//! that takes), then write the record to the console and the run log.

use tracing::info;

use npcchat_core::sink::EntrySink;
use npcchat_core::state::ConversationBook;
use npcchat_core::types::ChatMessage;
use npcchat_llm::backend::TextBackend;
use npcchat_llm::backoff::Sleeper;
use npcchat_llm::classify::{ErrorClassifier, KeywordClassifier};
use npcchat_llm::generator::ReplyGenerator;

use crate::error::Result;
use crate::loader::{BatchSource, sort_chronologically};
use crate::record::ReplyRecord;

/// Totals for a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Messages replayed.
    pub messages: usize,
    /// Distinct players seen.
    pub players: usize,
}

/// Owns the per-player state and drives the reply generator.
pub struct Orchestrator<B, S, T, L, K, C = KeywordClassifier> {
    generator: ReplyGenerator<B, S, T, C>,
    book: ConversationBook,
    log: L,
    console: K,
}

impl<B, S, T, L, K, C> Orchestrator<B, S, T, L, K, C>
where
    B: TextBackend,
    S: Sleeper,
    T: EntrySink,
    L: EntrySink,
    K: EntrySink,
    C: ErrorClassifier,
{
    /// Create an orchestrator with empty per-player state.
    pub fn new(
        generator: ReplyGenerator<B, S, T, C>,
        window_capacity: usize,
        log: L,
        console: K,
    ) -> Self {
        Self {
            generator,
            book: ConversationBook::new(window_capacity),
            log,
            console,
        }
    }

    /// Per-player state accumulated so far.
    pub fn book(&self) -> &ConversationBook {
        &self.book
    }

    /// The reply generator.
    pub fn generator(&self) -> &ReplyGenerator<B, S, T, C> {
        &self.generator
    }

    /// Load, sort and replay the whole batch.
    ///
    /// # Errors
    /// Returns an error if the batch cannot be loaded or a record cannot be
    /// written. Generation failures never surface here.
    pub async fn run<Src: BatchSource + ?Sized>(&mut self, source: &Src) -> Result<RunSummary> {
        let mut messages = source.load()?;
        sort_chronologically(&mut messages);

        info!(messages = messages.len(), "Replaying batch");
        for message in &messages {
            self.process(message).await?;
        }

        let summary = RunSummary {
            messages: messages.len(),
            players: self.book.len(),
        };
        info!(
            messages = summary.messages,
            players = summary.players,
            "Batch replay finished"
        );
        Ok(summary)
    }

    /// Replay a single message.
    ///
    /// # Errors
    /// Returns an error if the record cannot be written to a sink.
    pub async fn process(&mut self, message: &ChatMessage) -> Result<ReplyRecord> {
        let state = self.book.observe(&message.player_id, &message.text);
        let window = state.window.clone();
        let mood = state.mood;

        let reply = self
            .generator
            .generate(&message.player_id, &message.text, &window, mood)
            .await;

        let record = ReplyRecord {
            player_id: message.player_id.clone(),
            timestamp: message.timestamp.as_str().to_string(),
            message: message.text.clone(),
            reply,
            window,
            mood,
        };

        self.console.append(&record.console_entry())?;
        self.log.append(&record.log_entry())?;
        Ok(record)
    }
}
