//! Per-question response clock.
//!
//! Counts time only while running. The round pauses it while the player has
//! paused the game and while answer feedback is on screen.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseClock {
    accumulated: Duration,
    running_since: Option<Instant>,
}

impl ResponseClock {
    /// A stopped clock at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// A clock at zero, running from `now`
    pub fn started(now: Instant) -> Self {
        Self { accumulated: Duration::ZERO, running_since: Some(now) }
    }

    /// Reset to zero and run from `now`
    pub fn restart(&mut self, now: Instant) {
        *self = Self::started(now);
    }

    pub fn pause(&mut self, now: Instant) {
        if let Some(since) = self.running_since.take() {
            self.accumulated += now.saturating_duration_since(since);
        }
    }

    pub fn resume(&mut self, now: Instant) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.running_since {
            Some(since) => self.accumulated + now.saturating_duration_since(since),
            None => self.accumulated,
        }
    }

    /// Whole seconds elapsed, the unit shown on the question timer
    pub fn elapsed_secs(&self, now: Instant) -> u64 {
        self.elapsed(now).as_secs()
    }
}
