//! Quiet-period debouncing of input events.
//!
//! Each `push` replaces the pending value and moves the deadline to
//! `now + quiet`, so a burst of inputs fires at most once per quiet period
//! with the last value. Time is passed in by the caller; the event loop in
//! `commands::session` drives it with `Instant::now()`.

use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Schedules `value`, discarding whatever was pending.
    pub fn push(&mut self, now: Instant, value: T) {
        if self.pending.is_some() {
            tracing::trace!("debounce: replacing pending invocation");
        }
        self.pending = Some((now + self.quiet, value));
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(at, _)| *at)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Takes the pending value once its quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let ready = matches!(&self.pending, Some((at, _)) if now >= *at);
        if ready {
            self.pending.take().map(|(_, v)| v)
        } else {
            None
        }
    }
}

/// Earliest deadline across several debouncers.
pub fn earliest(deadlines: impl IntoIterator<Item = Option<Instant>>) -> Option<Instant> {
    deadlines.into_iter().flatten().min()
}
