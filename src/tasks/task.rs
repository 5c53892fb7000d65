//! # Runtime task entity.
//!
//! A [`Task`] is a data record: immutable identity and policy, plus a small mutable
//! state behind its own lock. It owns no execution context; its driver and
//! `execute` move it through the status machine with the methods below.
//!
//! ## Rules
//! - The state lock is never held across a job invocation or a retry backoff.
//! - The state lock is never taken while the registry lock is held.
//! - `executing` is the overlap guard: set by [`Task::begin`], cleared only when the
//!   firing (including its retries) is over.
//! - `Cancelled` is sticky: a firing that finishes after cancellation does not move
//!   the task back to `Pending`/`Failed`.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::error::JobError;
use crate::policies::RetryPolicy;
use crate::tasks::{Cadence, JobRef, TaskKind, TaskSpec, TaskStatus};

/// Result of asking a task to start a firing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Admission {
    /// Overlap guard acquired; the caller must finish the firing.
    Admitted,
    /// A previous firing is still in flight.
    AlreadyRunning,
    /// Task is cancelled or finished.
    Inactive,
}

/// What to do after a failed invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AfterFailure {
    /// Retry within the same firing; overlap guard still held.
    Retry,
    /// Budget spent; firing is over and the overlap guard released.
    GiveUp,
    /// Task was cancelled meanwhile; guard released, status `Cancelled`.
    Cancelled,
}

#[derive(Debug)]
struct TaskState {
    status: TaskStatus,
    executing: bool,
    retry_count: u32,
    runs: u64,
    last_run_at: Option<DateTime<Utc>>,
    next_run_at: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

/// Point-in-time view of a registered task.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskInfo {
    pub name: String,
    pub kind: TaskKind,
    /// Interval (recurring, cron-like) or delay (one-shot).
    pub period: Duration,
    /// Original expression of a cron-like task.
    pub expr: Option<String>,
    pub priority: i32,
    pub status: TaskStatus,
    pub max_retries: u32,
    /// Retries consumed over the task lifetime.
    pub retry_count: u32,
    /// Job invocations, retries included.
    pub runs: u64,
    /// Advisory: end of the last invocation.
    pub last_run_at: Option<DateTime<Utc>>,
    /// Advisory: expected next firing.
    pub next_run_at: Option<DateTime<Utc>>,
    /// Message of the most recent failure.
    pub last_error: Option<String>,
}

/// One registered unit of work.
pub(crate) struct Task {
    name: Arc<str>,
    kind: TaskKind,
    period: Duration,
    expr: Option<String>,
    job: JobRef,
    priority: i32,
    retry: RetryPolicy,
    token: CancellationToken,
    state: Mutex<TaskState>,
}

impl Task {
    /// Creates a `Pending` task. `period` is the resolved interval or delay.
    pub(crate) fn new(spec: TaskSpec, period: Duration, token: CancellationToken) -> Self {
        let kind = spec.kind();
        let expr = match spec.cadence {
            Cadence::Cron(expr) => Some(expr),
            _ => None,
        };
        Self {
            name: Arc::from(spec.name),
            kind,
            period,
            expr,
            job: spec.job,
            priority: spec.priority,
            retry: RetryPolicy::new(spec.max_retries),
            token,
            state: Mutex::new(TaskState {
                status: TaskStatus::Pending,
                executing: false,
                retry_count: 0,
                runs: 0,
                last_run_at: None,
                next_run_at: after(Utc::now(), period),
                last_error: None,
            }),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn shared_name(&self) -> Arc<str> {
        Arc::clone(&self.name)
    }

    pub(crate) fn kind(&self) -> TaskKind {
        self.kind
    }

    pub(crate) fn period(&self) -> Duration {
        self.period
    }

    pub(crate) fn job(&self) -> &JobRef {
        &self.job
    }

    pub(crate) fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Tries to start a firing: acquires the overlap guard and moves to `Running`.
    pub(crate) async fn begin(&self) -> Admission {
        let mut st = self.state.lock().await;
        if st.executing {
            return Admission::AlreadyRunning;
        }
        if self.token.is_cancelled() || st.status.is_terminal(self.kind) {
            return Admission::Inactive;
        }
        st.executing = true;
        st.status = TaskStatus::Running;
        st.runs += 1;
        Admission::Admitted
    }

    /// Starts a retry of the current firing.
    ///
    /// Returns `false` (and releases the guard) if the task was cancelled meanwhile.
    pub(crate) async fn resume(&self) -> bool {
        let mut st = self.state.lock().await;
        if self.token.is_cancelled() || st.status == TaskStatus::Cancelled {
            st.executing = false;
            st.status = TaskStatus::Cancelled;
            st.next_run_at = None;
            return false;
        }
        st.status = TaskStatus::Running;
        st.runs += 1;
        true
    }

    /// Records a successful invocation and ends the firing.
    pub(crate) async fn succeed(&self) -> TaskStatus {
        let now = Utc::now();
        let mut st = self.state.lock().await;
        st.executing = false;
        st.last_run_at = Some(now);
        st.status = match st.status {
            TaskStatus::Cancelled => TaskStatus::Cancelled,
            _ if self.token.is_cancelled() => TaskStatus::Cancelled,
            _ if self.kind.is_recurring() => TaskStatus::Pending,
            _ => TaskStatus::Completed,
        };
        st.next_run_at = self.next_after(st.status, now);
        st.status
    }

    /// Records a failed invocation and applies the retry budget.
    ///
    /// The lifetime retry counter is incremented on every failure; a retry is granted
    /// while it stays within `max_retries` and the task is not cancelled.
    pub(crate) async fn fail(&self, err: &JobError) -> AfterFailure {
        let now = Utc::now();
        let mut st = self.state.lock().await;
        st.last_run_at = Some(now);
        st.last_error = Some(err.to_string());

        if st.status == TaskStatus::Cancelled || self.token.is_cancelled() {
            st.executing = false;
            st.status = TaskStatus::Cancelled;
            st.next_run_at = None;
            return AfterFailure::Cancelled;
        }

        st.status = TaskStatus::Failed;
        st.retry_count = st.retry_count.saturating_add(1);
        if self.retry.allows(st.retry_count) {
            return AfterFailure::Retry;
        }

        st.executing = false;
        st.next_run_at = self.next_after(st.status, now);
        AfterFailure::GiveUp
    }

    /// Ends a firing abandoned during its retry backoff because of cancellation.
    pub(crate) async fn abandon(&self) {
        let mut st = self.state.lock().await;
        st.executing = false;
        st.status = TaskStatus::Cancelled;
        st.next_run_at = None;
    }

    /// Moves a non-terminal task to `Cancelled`.
    pub(crate) async fn mark_cancelled(&self) {
        let mut st = self.state.lock().await;
        if !st.status.is_terminal(self.kind) {
            st.status = TaskStatus::Cancelled;
            st.next_run_at = None;
        }
    }

    pub(crate) async fn status(&self) -> TaskStatus {
        self.state.lock().await.status
    }

    pub(crate) async fn is_executing(&self) -> bool {
        self.state.lock().await.executing
    }

    pub(crate) async fn info(&self) -> TaskInfo {
        let st = self.state.lock().await;
        TaskInfo {
            name: self.name.to_string(),
            kind: self.kind,
            period: self.period,
            expr: self.expr.clone(),
            priority: self.priority,
            status: st.status,
            max_retries: self.retry.max_retries,
            retry_count: st.retry_count,
            runs: st.runs,
            last_run_at: st.last_run_at,
            next_run_at: st.next_run_at,
            last_error: st.last_error.clone(),
        }
    }

    fn next_after(&self, status: TaskStatus, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if status.is_terminal(self.kind) {
            None
        } else {
            after(now, self.period)
        }
    }
}

/// `from + period`, or `None` when it does not fit in a timestamp.
fn after(from: DateTime<Utc>, period: Duration) -> Option<DateTime<Utc>> {
    chrono::Duration::from_std(period)
        .ok()
        .and_then(|d| from.checked_add_signed(d))
}
