//! Retry state machine and sleeping.
//!
//! The retry loop is an explicit machine with a pure [`RetryMachine::transition`]
//! so the protocol can be tested without waiting. Actual waiting goes
//! through a [`Sleeper`], which tests replace with one that only records
//! the requested delays.

use std::future::Future;
use std::time::Duration;

use npcchat_core::config::RetryConfig;

use crate::classify::FailureClass;

/// Retry timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Base of the exponential backoff for transient failures, in seconds.
    pub backoff_base_secs: u64,
    /// Fixed wait after an unknown failure.
    pub unknown_delay: Duration,
}

impl RetryPolicy {
    /// Delay before retrying after the `strike`-th transient failure.
    ///
    /// `base^strike` seconds, saturating at `u64::MAX` seconds.
    #[must_use]
    pub fn transient_delay(&self, strike: u32) -> Duration {
        Duration::from_secs(self.backoff_base_secs.saturating_pow(strike))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            backoff_base_secs: 2,
            unknown_delay: Duration::from_secs(2),
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            backoff_base_secs: config.backoff_base_secs,
            unknown_delay: Duration::from_secs(config.unknown_error_delay_secs),
        }
    }
}

/// Where the retry loop is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryState {
    /// About to call the backend.
    #[default]
    Attempting,
    /// Waiting before the next attempt.
    BackoffWait(Duration),
    /// A reply was obtained. Terminal.
    Success,
}

/// Input to the retry machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryEvent {
    /// The backend returned text.
    Succeeded,
    /// The backend failed.
    Failed(FailureClass),
    /// The backoff wait is over.
    WaitElapsed,
}

/// The retry loop's state plus its counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RetryMachine {
    state: RetryState,
    attempts: u32,
    transient_strikes: u32,
}

impl RetryMachine {
    /// A machine about to make its first attempt.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> RetryState {
        self.state
    }

    /// Backend calls made so far.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Transient failures seen so far. Unknown failures do not count and
    /// do not reset it.
    #[must_use]
    pub fn transient_strikes(&self) -> u32 {
        self.transient_strikes
    }

    /// Apply `event` and return the next machine.
    ///
    /// Events that do not apply to the current state leave it unchanged;
    /// `Success` absorbs everything.
    #[must_use]
    pub fn transition(self, policy: &RetryPolicy, event: RetryEvent) -> Self {
        match (self.state, event) {
            (RetryState::Attempting, RetryEvent::Succeeded) => Self {
                state: RetryState::Success,
                attempts: self.attempts.saturating_add(1),
                ..self
            },
            (RetryState::Attempting, RetryEvent::Failed(FailureClass::Transient)) => {
                let strikes = self.transient_strikes.saturating_add(1);
                Self {
                    state: RetryState::BackoffWait(policy.transient_delay(strikes)),
                    attempts: self.attempts.saturating_add(1),
                    transient_strikes: strikes,
                }
            }
            (RetryState::Attempting, RetryEvent::Failed(FailureClass::Unknown)) => Self {
                state: RetryState::BackoffWait(policy.unknown_delay),
                attempts: self.attempts.saturating_add(1),
                ..self
            },
            (RetryState::BackoffWait(_), RetryEvent::WaitElapsed) => Self {
                state: RetryState::Attempting,
                ..self
            },
            _ => self,
        }
    }
}

// ---------------------------------------------------------------------------
// Sleeping
// ---------------------------------------------------------------------------

/// Waits for a duration.
pub trait Sleeper {
    /// Wait for `duration`.
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}
