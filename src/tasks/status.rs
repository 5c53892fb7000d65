//! # Task lifecycle status.
//!
//! ```text
//!            timer fires           Ok (recurring)
//! Pending ───────────────► Running ───────────────► Pending
//!                            │  │   Ok (one-shot)
//!                            │  └─────────────────► Completed
//!                            │ Err / panic
//!                            ▼
//!                          Failed ── budget left ──► Running (retry)
//!                                 └─ exhausted ───► stays Failed
//!
//! any non-terminal ── cancel / shutdown ──► Cancelled
//! ```

use std::fmt;

use crate::tasks::TaskKind;

/// Lifecycle status of a task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    /// Waiting for the next firing.
    Pending,
    /// Job in flight (including retries of the same firing).
    Running,
    /// One-shot task finished successfully.
    Completed,
    /// Cancelled explicitly or by shutdown.
    Cancelled,
    /// Last firing failed and was not (or no longer) retried.
    Failed,
}

impl TaskStatus {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Running => "running",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
            TaskStatus::Failed => "failed",
        }
    }

    /// Whether a task of `kind` in this status will never fire again.
    ///
    /// `Failed` is terminal only for one-shot tasks; recurring ones keep firing.
    pub fn is_terminal(&self, kind: TaskKind) -> bool {
        match self {
            TaskStatus::Completed | TaskStatus::Cancelled => true,
            TaskStatus::Failed => !kind.is_recurring(),
            TaskStatus::Pending | TaskStatus::Running => false,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_is_terminal_only_for_one_shot() {
        assert!(TaskStatus::Failed.is_terminal(TaskKind::OneShot));
        assert!(!TaskStatus::Failed.is_terminal(TaskKind::Recurring));
        assert!(!TaskStatus::Failed.is_terminal(TaskKind::CronLike));
        assert!(TaskStatus::Cancelled.is_terminal(TaskKind::Recurring));
        assert!(!TaskStatus::Running.is_terminal(TaskKind::OneShot));
    }
}
