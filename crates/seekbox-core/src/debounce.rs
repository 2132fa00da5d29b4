//! Debounce scheduler — holds at most one deferred task until input goes quiet.
//!
//! The scheduler never spawns anything. It records a deadline and hands the
//! task back once that deadline has passed, either when the host polls it
//! ([`poll_expired`](DebounceScheduler::poll_expired)) or when an async host
//! awaits [`expired`](DebounceScheduler::expired). Scheduling again replaces
//! the pending task and pushes the deadline out, so only the most recent
//! request ever runs.
//!
//! Time is read from [`tokio::time::Instant`] so a paused tokio clock drives
//! it deterministically in tests.

use std::time::Duration;
use tokio::time::Instant;

struct Pending<T> {
    deadline: Instant,
    task: T,
}

/// Single-slot, replaceable, cancellable deferred task.
pub struct DebounceScheduler<T> {
    pending: Option<Pending<T>>,
    disposed: bool,
}

impl<T> Default for DebounceScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DebounceScheduler<T> {
    pub fn new() -> Self {
        Self {
            pending: None,
            disposed: false,
        }
    }

    /// Replace any pending task with `task`, due `delay` from now.
    ///
    /// Returns false (and drops `task`) once the scheduler has been disposed.
    pub fn schedule(&mut self, task: T, delay: Duration) -> bool {
        if self.disposed {
            tracing::warn!("debounce: schedule after dispose ignored");
            return false;
        }
        let deadline = Instant::now() + delay;
        let replaced = self.pending.replace(Pending { deadline, task }).is_some();
        tracing::trace!(delay_ms = delay.as_millis() as u64, replaced, "debounce: scheduled");
        true
    }

    /// Discard the pending task, if any. Returns true when one was discarded.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.pending.take().is_some();
        if cancelled {
            tracing::trace!("debounce: cancelled");
        }
        cancelled
    }

    /// Drop the pending task and refuse all further scheduling.
    pub fn dispose(&mut self) {
        self.cancel();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending task falls due. Hosts use this as their wait timeout.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Take the pending task if its deadline is at or before `now`.
    pub fn poll_expired(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if p.deadline <= now => self.pending.take().map(|p| p.task),
            _ => None,
        }
    }

    /// Wait for the pending task to fall due and take it.
    ///
    /// Resolves to `None` straight away when nothing is pending. Dropping the
    /// returned future before it resolves leaves the task pending.
    pub async fn expired(&mut self) -> Option<T> {
        let deadline = self.next_deadline()?;
        tokio::time::sleep_until(deadline).await;
        self.pending.take().map(|p| p.task)
    }
}

impl<F: FnOnce()> DebounceScheduler<F> {
    /// Run the pending callback if it is due. Returns true when it ran.
    pub fn fire_expired(&mut self, now: Instant) -> bool {
        match self.poll_expired(now) {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }
}

impl<T> Drop for DebounceScheduler<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
