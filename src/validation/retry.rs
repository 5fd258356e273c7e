//! Retry state machine
//!
//! Each validation category runs its own machine with a fixed attempt
//! ceiling. Transitions always reach a terminal state within that ceiling, so
//! no category can exceed its budget no matter how often the check fails.

/// Lifecycle of one validation category for one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    NotAttempted,
    /// Attempt `n` (1-based) is in flight or just observed.
    Attempt(u8),
    /// The check passed; no further attempts.
    Accepted,
    /// The ceiling was exhausted without a pass; the slot is delivered anyway
    /// with its counters recorded.
    ExhaustedBestEffort,
}

/// Drives one category's attempts against a hard-coded ceiling.
#[derive(Debug, Clone)]
pub struct RetryMachine {
    state: RetryState,
    max_attempts: u8,
    attempts: u8,
}

impl RetryMachine {
    /// `max_attempts` is the total attempt count, i.e. retries + 1.
    pub fn new(max_attempts: u8) -> Self {
        debug_assert!(max_attempts >= 1);
        Self {
            state: RetryState::NotAttempted,
            max_attempts,
            attempts: 0,
        }
    }

    /// Start the next attempt, or `None` once a terminal state is reached.
    pub fn begin_attempt(&mut self) -> Option<u8> {
        match self.state {
            RetryState::Accepted | RetryState::ExhaustedBestEffort => None,
            RetryState::NotAttempted => {
                self.attempts = 1;
                self.state = RetryState::Attempt(1);
                Some(1)
            }
            RetryState::Attempt(n) if n < self.max_attempts => {
                self.attempts = n + 1;
                self.state = RetryState::Attempt(n + 1);
                Some(n + 1)
            }
            RetryState::Attempt(_) => None,
        }
    }

    /// Record the current attempt's outcome.
    pub fn observe(&mut self, passed: bool) {
        if let RetryState::Attempt(n) = self.state {
            if passed {
                self.state = RetryState::Accepted;
            } else if n >= self.max_attempts {
                self.state = RetryState::ExhaustedBestEffort;
            }
        }
    }

    pub fn state(&self) -> RetryState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self.state,
            RetryState::Accepted | RetryState::ExhaustedBestEffort
        )
    }

    /// Retries consumed so far (attempts beyond the first).
    pub fn retries(&self) -> u8 {
        self.attempts.saturating_sub(1)
    }
}
