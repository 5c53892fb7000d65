//! # Events emitted by the scheduler, its drivers and `execute`.
//!
//! [`EventKind`] groups events in four families:
//! - **Registration**: task scheduled / cancelled
//! - **Firing**: starting, succeeded, failed, retry scheduled, retries exhausted,
//!   skipped, completed
//! - **Driver / shutdown**: driver stopped, shutdown requested, stopped within deadline,
//!   grace exceeded
//! - **Subscriber**: overflow / panic inside the fan-out
//!
//! Every event carries a process-wide monotonic `seq` so consumers can restore order.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tickvisor::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::RetryScheduled)
//!     .with_task("sync")
//!     .with_attempt(2)
//!     .with_delay(Duration::from_millis(100))
//!     .with_reason("connection refused");
//!
//! assert_eq!(ev.task.as_deref(), Some("sync"));
//! assert_eq!(ev.delay_ms, Some(100));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of scheduler events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Registration ===
    /// Task registered and its driver launched.
    ///
    /// Sets: `task`, `reason` (task kind label).
    TaskScheduled,

    /// Task removed by [`Scheduler::cancel`](crate::Scheduler::cancel).
    ///
    /// Sets: `task`.
    TaskCancelled,

    // === Firing ===
    /// Job invocation is starting.
    ///
    /// Sets: `task`, `attempt` (1 for the firing itself, 2.. for retries).
    TaskStarting,

    /// Job returned `Ok(())`.
    ///
    /// Sets: `task`, `attempt`.
    TaskSucceeded,

    /// Job returned an error or panicked.
    ///
    /// Sets: `task`, `attempt`, `reason`.
    TaskFailed,

    /// A retry will run after `delay_ms`.
    ///
    /// Sets: `task`, `attempt` (failed attempt), `delay_ms`, `reason`.
    RetryScheduled,

    /// Retry budget is spent; the firing ends in `Failed`.
    ///
    /// Sets: `task`, `attempt`, `reason`.
    RetriesExhausted,

    /// Firing dropped: a previous firing is still in flight, or the task is finished
    /// or cancelled.
    ///
    /// Sets: `task`, `reason` (`"already_running"` or `"inactive"`).
    FiringSkipped,

    /// One-shot task finished successfully.
    ///
    /// Sets: `task`.
    TaskCompleted,

    // === Driver / shutdown ===
    /// Driver loop exited.
    ///
    /// Sets: `task`.
    DriverStopped,

    /// `shutdown` was called; root token cancelled.
    ShutdownRequested,

    /// Every driver stopped before the shutdown deadline.
    AllStoppedWithin,

    /// Shutdown deadline elapsed with drivers still alive.
    ///
    /// Sets: `reason` (names of tasks still executing).
    GraceExceeded,

    // === Subscriber ===
    /// Subscriber queue was full or closed; event dropped for that subscriber.
    ///
    /// Sets: `task` (subscriber name), `reason`.
    SubscriberOverflow,

    /// Subscriber panicked while handling an event.
    ///
    /// Sets: `task` (subscriber name), `reason` (panic message).
    SubscriberPanicked,
}

/// Scheduler event with optional metadata.
#[derive(Clone, Debug)]
pub struct Event {
    /// Process-wide monotonic sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Task (or subscriber) name.
    pub task: Option<Arc<str>>,
    /// Attempt number within a firing (starting from 1).
    pub attempt: Option<u32>,
    /// Retry delay in milliseconds.
    pub delay_ms: Option<u32>,
    /// Human-readable detail (error message, skip reason, ...).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates an event stamped with the current time and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            task: None,
            attempt: None,
            delay_ms: None,
            reason: None,
        }
    }

    #[inline]
    pub fn with_task(mut self, task: impl Into<Arc<str>>) -> Self {
        self.task = Some(task.into());
        self
    }

    #[inline]
    pub fn with_attempt(mut self, n: u32) -> Self {
        self.attempt = Some(n);
        self
    }

    /// Attaches a delay (stored as milliseconds, saturating).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        self.delay_ms = Some(d.as_millis().min(u128::from(u32::MAX)) as u32);
        self
    }

    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Subscriber dropped an event.
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_task(subscriber)
            .with_reason(reason)
    }

    /// Subscriber panicked.
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_task(subscriber)
            .with_reason(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seq_is_monotonic() {
        let a = Event::new(EventKind::TaskStarting);
        let b = Event::new(EventKind::TaskSucceeded);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn delay_saturates() {
        let ev = Event::new(EventKind::RetryScheduled).with_delay(Duration::from_secs(u64::MAX));
        assert_eq!(ev.delay_ms, Some(u32::MAX));
    }
}
