//! Per-player conversation state.
//!
//! [`ConversationBook`] is the explicit owner of every player's window and
//! mood for the length of one batch run. Players are added lazily the first
//! time they speak and are never reset mid-run.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::debug;

use crate::mood::{self, Mood};
use crate::types::PlayerId;
use crate::window::{ConversationWindow, DEFAULT_WINDOW_CAPACITY};

/// Everything the NPC tracks about one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    /// Recent messages from this player.
    pub window: ConversationWindow,
    /// The NPC's current mood toward this player.
    pub mood: Mood,
}

impl PlayerState {
    /// Fresh state: empty window, neutral mood.
    #[must_use]
    pub fn new(window_capacity: usize) -> Self {
        Self {
            window: ConversationWindow::new(window_capacity),
            mood: Mood::default(),
        }
    }

    /// Record a message: append it to the window, then reclassify the mood.
    pub fn observe(&mut self, text: &str) {
        self.window.append(text);
        self.mood = mood::classify(text, self.mood);
    }
}

/// Window and mood for every player seen so far.
#[derive(Debug, Clone)]
pub struct ConversationBook {
    window_capacity: usize,
    players: HashMap<PlayerId, PlayerState>,
}

impl ConversationBook {
    /// Create an empty book whose windows hold `window_capacity` messages.
    #[must_use]
    pub fn new(window_capacity: usize) -> Self {
        Self {
            window_capacity,
            players: HashMap::new(),
        }
    }

    /// Record that `player` said `text` and return their updated state.
    pub fn observe(&mut self, player: &PlayerId, text: &str) -> &PlayerState {
        let capacity = self.window_capacity;
        let state = match self.players.entry(player.clone()) {
            Entry::Occupied(slot) => slot.into_mut(),
            Entry::Vacant(slot) => {
                debug!(player = %player, window_capacity = capacity, "New player in conversation");
                slot.insert(PlayerState::new(capacity))
            }
        };
        state.observe(text);
        state
    }

    /// Current state for `player`, if they have spoken.
    #[must_use]
    pub fn get(&self, player: &PlayerId) -> Option<&PlayerState> {
        self.players.get(player)
    }

    /// Current mood toward `player`; neutral for players not yet seen.
    #[must_use]
    pub fn mood(&self, player: &PlayerId) -> Mood {
        self.players.get(player).map(|s| s.mood).unwrap_or_default()
    }

    /// Number of distinct players seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether no player has spoken yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

impl Default for ConversationBook {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_CAPACITY)
    }
}
