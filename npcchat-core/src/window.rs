//! Conversation Window — "What the player said recently"
//!
//! A fixed-capacity FIFO of message texts. New messages go on the back; once
//! the window is over capacity the oldest messages fall off the front.

use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;

/// Default number of messages remembered per player.
pub const DEFAULT_WINDOW_CAPACITY: usize = 3;

/// The most recent messages from one player, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationWindow {
    capacity: usize,
    messages: VecDeque<String>,
}

impl ConversationWindow {
    /// Create an empty window holding at most `capacity` messages.
    ///
    /// A capacity of zero is raised to one so the current message is always
    /// part of the window.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            messages: VecDeque::with_capacity(capacity + 1),
        }
    }

    /// Append a message, evicting the oldest ones beyond capacity.
    pub fn append(&mut self, text: impl Into<String>) {
        self.messages.push_back(text.into());
        while self.messages.len() > self.capacity {
            self.messages.pop_front();
        }
    }

    /// Iterate over the messages, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    /// Owned copy of the current contents, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.messages.iter().cloned().collect()
    }

    /// Number of messages currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the window holds no messages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Maximum number of messages held.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ConversationWindow {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_CAPACITY)
    }
}

/// Renders as a bracketed list of quoted messages: `["hi", "thanks!"]`.
impl fmt::Display for ConversationWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, msg) in self.messages.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{msg:?}")?;
        }
        f.write_str("]")
    }
}
