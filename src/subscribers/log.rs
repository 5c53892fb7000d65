//! # LogWriter: events as `tracing` records
//!
//! Failures and shutdown problems are logged at `warn`, lifecycle milestones at
//! `info`, per-firing chatter at `debug`. Install any `tracing` subscriber to see them.
//!
//! ## Example output (tracing-subscriber fmt)
//! ```text
//! INFO  tickvisor: task scheduled task="report" kind="recurring"
//! DEBUG tickvisor: firing started task="report" attempt=1
//! WARN  tickvisor: firing failed task="report" attempt=1 reason="execution failed: timeout"
//! WARN  tickvisor: retry scheduled task="report" attempt=1 delay_ms=100
//! INFO  tickvisor: shutdown requested
//! ```

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Subscriber rendering events through `tracing`.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let task = e.task.as_deref().unwrap_or("-");
        let reason = e.reason.as_deref().unwrap_or("");

        match e.kind {
            EventKind::TaskScheduled => {
                info!(target: "tickvisor", task, kind = reason, "task scheduled")
            }
            EventKind::TaskCancelled => info!(target: "tickvisor", task, "task cancelled"),
            EventKind::TaskStarting => {
                debug!(target: "tickvisor", task, attempt = ?e.attempt, "firing started")
            }
            EventKind::TaskSucceeded => {
                debug!(target: "tickvisor", task, attempt = ?e.attempt, "firing succeeded")
            }
            EventKind::TaskFailed => {
                warn!(target: "tickvisor", task, attempt = ?e.attempt, reason, "firing failed")
            }
            EventKind::RetryScheduled => warn!(
                target: "tickvisor",
                task,
                attempt = ?e.attempt,
                delay_ms = ?e.delay_ms,
                "retry scheduled"
            ),
            EventKind::RetriesExhausted => {
                warn!(target: "tickvisor", task, attempt = ?e.attempt, reason, "retries exhausted")
            }
            EventKind::FiringSkipped => {
                debug!(target: "tickvisor", task, reason, "firing skipped")
            }
            EventKind::TaskCompleted => info!(target: "tickvisor", task, "task completed"),
            EventKind::DriverStopped => debug!(target: "tickvisor", task, "driver stopped"),
            EventKind::ShutdownRequested => info!(target: "tickvisor", "shutdown requested"),
            EventKind::AllStoppedWithin => {
                info!(target: "tickvisor", "all drivers stopped within deadline")
            }
            EventKind::GraceExceeded => {
                warn!(target: "tickvisor", stuck = reason, "shutdown deadline exceeded")
            }
            EventKind::SubscriberOverflow => {
                warn!(target: "tickvisor", subscriber = task, reason, "subscriber dropped event")
            }
            EventKind::SubscriberPanicked => {
                warn!(target: "tickvisor", subscriber = task, info = reason, "subscriber panicked")
            }
        }
    }

    fn name(&self) -> &'static str {
        "log-writer"
    }
}
