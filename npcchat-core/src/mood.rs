//! Mood — "How the NPC feels about this player"
//!
//! A tiny keyword state machine. Each new message either pushes the mood to
//! `Friendly` or `Angry`, or leaves it where it was. Friendly keywords are
//! checked first, so a message that is both grateful and insulting reads as
//! grateful.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Keywords that make the NPC friendly. Matched as lowercase substrings.
pub const FRIENDLY_KEYWORDS: &[&str] = &["help", "thanks", "thank you", "appreciate"];

/// Keywords that make the NPC angry. Matched as lowercase substrings.
pub const ANGRY_KEYWORDS: &[&str] = &["useless", "stupid", "hate", "noob"];

/// The NPC's mood toward one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// No strong feeling either way. Every player starts here.
    #[default]
    Neutral,
    /// Warm toward the player.
    Friendly,
    /// Irritated with the player.
    Angry,
}

impl Mood {
    /// All moods, in declaration order.
    #[must_use]
    pub fn all() -> &'static [Mood] {
        &[Self::Neutral, Self::Friendly, Self::Angry]
    }

    /// Lowercase name used in prompts and logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Friendly => "friendly",
            Self::Angry => "angry",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "neutral" => Ok(Self::Neutral),
            "friendly" => Ok(Self::Friendly),
            "angry" => Ok(Self::Angry),
            other => Err(format!("unknown mood: '{other}'")),
        }
    }
}

/// Compute the mood after the player says `text`.
///
/// Pure: the result depends only on `text` and `current`.
#[must_use]
pub fn classify(text: &str, current: Mood) -> Mood {
    let lowered = text.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(k));

    if mentions(FRIENDLY_KEYWORDS) {
        Mood::Friendly
    } else if mentions(ANGRY_KEYWORDS) {
        Mood::Angry
    } else {
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn friendly_keywords_make_friendly() {
        for text in ["Can you help me?", "THANKS a lot", "thank you kindly", "I appreciate it"] {
            assert_eq!(classify(text, Mood::Angry), Mood::Friendly, "{text}");
        }
    }

    #[test]
    fn angry_keywords_make_angry() {
        for text in ["this is useless", "Stupid quest", "I HATE this", "you noob"] {
            assert_eq!(classify(text, Mood::Neutral), Mood::Angry, "{text}");
        }
    }

    #[test]
    fn friendly_wins_over_angry() {
        assert_eq!(classify("thanks, noob", Mood::Neutral), Mood::Friendly);
        assert_eq!(classify("I hate asking for help", Mood::Angry), Mood::Friendly);
    }

    #[test]
    fn no_keywords_keeps_current() {
        for mood in Mood::all() {
            assert_eq!(classify("where is the inn?", *mood), *mood);
        }
    }

    #[test]
    fn substring_matching_is_loose() {
        // "helpful" contains "help"; "whatever" contains "hate".
        assert_eq!(classify("very helpful", Mood::Neutral), Mood::Friendly);
        assert_eq!(classify("whatever", Mood::Neutral), Mood::Angry);
    }

    #[test]
    fn mood_display_and_parse() {
        for mood in Mood::all() {
            let parsed: Mood = mood.to_string().parse().expect("should parse");
            assert_eq!(parsed, *mood);
        }
        assert!("grumpy".parse::<Mood>().is_err());
    }

    #[test]
    fn mood_serializes_lowercase() {
        let json = serde_json::to_string(&Mood::Friendly).expect("serialize");
        assert_eq!(json, r#""friendly""#);
    }
}
