//! Per-message run records.

use serde::Serialize;

use npcchat_core::mood::Mood;
use npcchat_core::sink::{CONSOLE_DELIMITER_WIDTH, FILE_DELIMITER_WIDTH, delimiter};
use npcchat_core::types::PlayerId;
use npcchat_core::window::ConversationWindow;

/// What happened when one message was replayed.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyRecord {
    /// Who spoke.
    pub player_id: PlayerId,
    /// When, as written in the batch.
    pub timestamp: String,
    /// What the player said.
    pub message: String,
    /// What the NPC answered.
    pub reply: String,
    /// The player's window right after this message.
    pub window: ConversationWindow,
    /// The NPC's mood right after this message.
    pub mood: Mood,
}

impl ReplyRecord {
    fn body(&self) -> String {
        format!(
            "Player {} at {}\nMessage: {}\nNPC Reply: {}\nConversation state: {}\nNPC Mood: {}\n",
            self.player_id, self.timestamp, self.message, self.reply, self.window, self.mood
        )
    }

    /// Run-log layout: the record followed by a 60-wide delimiter line.
    #[must_use]
    pub fn log_entry(&self) -> String {
        format!("{}{}\n", self.body(), delimiter(FILE_DELIMITER_WIDTH))
    }

    /// Console layout: a 40-wide delimiter line, then the record.
    #[must_use]
    pub fn console_entry(&self) -> String {
        format!("{}\n{}", delimiter(CONSOLE_DELIMITER_WIDTH), self.body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ReplyRecord {
        let mut window = ConversationWindow::default();
        window.append("thanks!");
        window.append("you noob");
        ReplyRecord {
            player_id: PlayerId::new("p1"),
            timestamp: "2024-05-01T10:05:00".into(),
            message: "you noob".into(),
            reply: "Watch your tongue.".into(),
            window,
            mood: Mood::Angry,
        }
    }

    #[test]
    fn log_entry_layout() {
        let expected = format!(
            "Player p1 at 2024-05-01T10:05:00\n\
             Message: you noob\n\
             NPC Reply: Watch your tongue.\n\
             Conversation state: [\"thanks!\", \"you noob\"]\n\
             NPC Mood: angry\n\
             {}\n",
            "=".repeat(60)
        );
        assert_eq!(record().log_entry(), expected);
    }

    #[test]
    fn console_entry_leads_with_delimiter() {
        let entry = record().console_entry();
        assert!(entry.starts_with(&format!("{}\nPlayer p1 at", "=".repeat(40))));
        assert!(entry.ends_with("NPC Mood: angry\n"));
    }

    #[test]
    fn record_serializes_for_structured_output() {
        let json = serde_json::to_value(record()).expect("serialize");
        assert_eq!(json["player_id"], "p1");
        assert_eq!(json["mood"], "angry");
        assert_eq!(json["window"]["messages"][1], "you noob");
    }
}
