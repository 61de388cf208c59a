//! Quiet-period debouncing for the search box, as a plain state machine.
//!
//! Each keystroke calls [`Debouncer::schedule`], which replaces any pending
//! deadline — the previous schedule is cancelled exactly like a
//! `clearTimeout`/`setTimeout` pair. The owner pumps [`Debouncer::poll`]
//! from its event loop; it returns true at most once per schedule, after the
//! quiet period has elapsed with no further keystrokes. No timers and no
//! threads, so tests drive it with synthetic `Instant`s.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            deadline: None,
        }
    }

    /// Schedule (or reschedule) the action for `now + quiet`, cancelling any
    /// pending deadline.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet);
    }

    /// Drop any pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// True while a deadline is pending.
    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns true exactly once when the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
