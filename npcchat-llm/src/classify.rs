//! Error classification for the retry protocol.
//!
//! Providers do not agree on structured error codes, so the default policy
//! looks at the error's rendered message. The policy sits behind
//! [`ErrorClassifier`] so it can be tested and replaced on its own.

use crate::error::LlmError;

/// Message fragments that mark a rate-limit or quota failure.
pub const RATE_LIMIT_MARKERS: &[&str] = &["quota", "429", "exceeded"];

/// How the retry protocol treats a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureClass {
    /// Rate limit or quota exhaustion. Retried with exponential backoff.
    Transient,
    /// Anything else. Retried after a fixed delay.
    Unknown,
}

/// Maps a generation error to a [`FailureClass`].
pub trait ErrorClassifier {
    /// Classify one failed attempt.
    fn classify(&self, err: &LlmError) -> FailureClass;
}

/// Case-insensitive substring match on the error message.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    markers: Vec<String>,
}

impl KeywordClassifier {
    /// Classifier treating any message containing one of `markers` as
    /// transient. Markers are matched case-insensitively.
    #[must_use]
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            markers: markers
                .into_iter()
                .map(|m| m.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Classify a raw error message.
    #[must_use]
    pub fn classify_message(&self, message: &str) -> FailureClass {
        let lowered = message.to_lowercase();
        if self.markers.iter().any(|m| lowered.contains(m.as_str())) {
            FailureClass::Transient
        } else {
            FailureClass::Unknown
        }
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(RATE_LIMIT_MARKERS)
    }
}

impl ErrorClassifier for KeywordClassifier {
    fn classify(&self, err: &LlmError) -> FailureClass {
        self.classify_message(&err.to_string())
    }
}

impl<F> ErrorClassifier for F
where
    F: Fn(&LlmError) -> FailureClass,
{
    fn classify(&self, err: &LlmError) -> FailureClass {
        self(err)
    }
}
