//! A cancellable delayed action driven by host-supplied time.
//!
//! The engine never sleeps or spawns. The host asks for [`CancellableDelay::deadline`], arranges
//! to call back at (or after) that instant, and passes the current time to
//! [`CancellableDelay::fire_if_due`].

use std::time::{Duration, Instant};

/// At most one pending delayed action. Scheduling replaces (cancels) the previous one.
#[derive(Debug, Default)]
pub struct CancellableDelay {
    deadline: Option<Instant>,
}

impl CancellableDelay {
    /// Create an idle delay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the action at `now + delay`, cancelling anything pending.
    ///
    /// A deadline past the representable range is never due.
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = now.checked_add(delay);
    }

    /// Cancel the pending action. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// When the pending action is due, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume the pending action if it is due at `now`. Returns `true` if it fired.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
