//! Core type definitions for npcchat.
//!
//! All types are serializable so a batch can be read straight from JSON.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

// ---------------------------------------------------------------------------
// Identity Types
// ---------------------------------------------------------------------------

/// Opaque identifier for a player.
///
/// Batches in the wild carry player IDs as either JSON strings or JSON
/// numbers; both are normalised to their textual form so `"7"` and `7`
/// address the same player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawPlayerId", into = "String")]
pub struct PlayerId(String);

impl PlayerId {
    /// Create a player ID from anything string-like.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The textual form of this ID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<PlayerId> for String {
    fn from(id: PlayerId) -> Self {
        id.0
    }
}

/// Wire form of a player ID before normalisation.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPlayerId {
    Text(String),
    Number(serde_json::Number),
}

impl From<RawPlayerId> for PlayerId {
    fn from(raw: RawPlayerId) -> Self {
        match raw {
            RawPlayerId::Text(s) => Self(s),
            RawPlayerId::Number(n) => Self(n.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Naive layouts accepted in addition to RFC 3339. Read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// An ISO-8601 timestamp as it appeared in the batch, plus its parsed instant.
///
/// Equality and ordering look only at the instant, so two spellings of the
/// same moment compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChatTimestamp {
    raw: String,
    instant: DateTime<Utc>,
}

impl ChatTimestamp {
    /// Parse an ISO-8601 timestamp.
    ///
    /// Accepts RFC 3339 (`2024-05-01T10:00:00Z`, `...+02:00`), a numeric
    /// offset without colon, naive date-times (read as UTC) and bare dates
    /// (midnight UTC).
    ///
    /// # Errors
    /// Returns `CoreError::InvalidTimestamp` if no layout matches.
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();

        let instant = DateTime::parse_from_rfc3339(trimmed)
            .or_else(|_| DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f%z"))
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NAIVE_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
                    .map(|naive| naive.and_utc())
            })
            .or_else(|| {
                NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .map(|naive| naive.and_utc())
            })
            .ok_or_else(|| CoreError::InvalidTimestamp { value: raw.clone() })?;

        Ok(Self { raw, instant })
    }

    /// The timestamp exactly as it was written in the batch.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The parsed instant, normalised to UTC.
    #[must_use]
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }
}

impl PartialEq for ChatTimestamp {
    fn eq(&self, other: &Self) -> bool {
        self.instant == other.instant
    }
}

impl Eq for ChatTimestamp {}

impl PartialOrd for ChatTimestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ChatTimestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.instant.cmp(&other.instant)
    }
}

impl fmt::Display for ChatTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl TryFrom<String> for ChatTimestamp {
    type Error = CoreError;

    fn try_from(raw: String) -> Result<Self> {
        Self::parse(raw)
    }
}

impl From<ChatTimestamp> for String {
    fn from(ts: ChatTimestamp) -> Self {
        ts.raw
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// One line of player chat from the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who said it.
    pub player_id: PlayerId,
    /// What they said, verbatim.
    pub text: String,
    /// When they said it.
    pub timestamp: ChatTimestamp,
}

impl ChatMessage {
    /// Create a new chat message.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidTimestamp` if `timestamp` is not ISO-8601.
    pub fn new(
        player_id: impl Into<PlayerId>,
        text: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            player_id: player_id.into(),
            text: text.into(),
            timestamp: ChatTimestamp::parse(timestamp)?,
        })
    }
}
