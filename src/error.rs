//! Error types used by the scheduler and by scheduled jobs.
//!
//! - [`ConfigError`] — a `schedule*` call was rejected; nothing was registered.
//! - [`NotFoundError`] — a lookup by task name found no registered task.
//! - [`ShutdownError`] — drivers did not stop within the shutdown deadline.
//! - [`JobError`] — a single job invocation failed (returned error or panic).
//!
//! Every enum exposes `as_label` for stable snake_case labels in logs/metrics.

use std::time::Duration;
use thiserror::Error;

/// # Errors returned synchronously when registering a task.
///
/// A task is never partially registered: on any of these errors the registry is left
/// untouched and no driver is started.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Task name is empty (or whitespace only).
    #[error("task name cannot be empty")]
    EmptyName,

    /// Interval resolved to zero.
    #[error("task {task:?}: interval must be positive")]
    NonPositiveInterval {
        /// Name of the rejected task.
        task: String,
    },

    /// Spec was built without a job.
    #[error("task {task:?}: job cannot be missing")]
    MissingJob {
        /// Name of the rejected task.
        task: String,
    },

    /// Spec was built without `every`, `cron` or `once`.
    #[error("task {task:?}: no cadence configured")]
    MissingCadence {
        /// Name of the rejected task.
        task: String,
    },

    /// A task with the same name is already registered.
    #[error("task {task:?} already exists")]
    Duplicate {
        /// Name of the rejected task.
        task: String,
    },

    /// The schedule parser rejected the expression.
    #[error("invalid schedule expression {expr:?}: {reason}")]
    InvalidExpression {
        /// Expression as supplied by the caller.
        expr: String,
        /// Parser error message.
        reason: String,
    },

    /// Shutdown has begun; new tasks are not accepted.
    #[error("scheduler is shutting down")]
    ShuttingDown,
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use tickvisor::ConfigError;
    ///
    /// let err = ConfigError::Duplicate { task: "sync".into() };
    /// assert_eq!(err.as_label(), "config_duplicate");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::EmptyName => "config_empty_name",
            ConfigError::NonPositiveInterval { .. } => "config_non_positive_interval",
            ConfigError::MissingJob { .. } => "config_missing_job",
            ConfigError::MissingCadence { .. } => "config_missing_cadence",
            ConfigError::Duplicate { .. } => "config_duplicate",
            ConfigError::InvalidExpression { .. } => "config_invalid_expression",
            ConfigError::ShuttingDown => "config_shutting_down",
        }
    }
}

/// No task with the given name is registered.
///
/// Returned for names that were never scheduled and for names removed by
/// [`Scheduler::cancel`](crate::Scheduler::cancel).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("task {task:?} not found")]
pub struct NotFoundError {
    /// The name that was looked up.
    pub task: String,
}

impl NotFoundError {
    pub(crate) fn new(task: &str) -> Self {
        Self {
            task: task.to_string(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        "task_not_found"
    }
}

/// # Errors produced by [`Scheduler::shutdown`](crate::Scheduler::shutdown).
///
/// After a timeout the scheduler should be considered degraded: drivers blocked in
/// their job keep running, and the instance is not reusable.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShutdownError {
    /// Some drivers were still alive when the deadline elapsed.
    #[error("shutdown timeout {timeout:?} exceeded; still executing: {stuck:?}")]
    Timeout {
        /// Deadline passed to `shutdown`.
        timeout: Duration,
        /// Tasks whose job was still in flight, sorted by name.
        stuck: Vec<String>,
    },
}

impl ShutdownError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ShutdownError::Timeout { .. } => "shutdown_timeout",
        }
    }
}

/// # Errors produced by a single job invocation.
///
/// Both variants are recovered inside the scheduler: they drive the retry policy and
/// end up in [`TaskInfo::last_error`](crate::TaskInfo::last_error), never in the caller.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JobError {
    /// Job returned an error.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Job panicked; the panic was caught.
    #[error("job panicked: {info}")]
    Panicked {
        /// Panic payload, if it was a string.
        info: String,
    },
}

impl JobError {
    /// Shorthand for [`JobError::Fail`].
    ///
    /// ```
    /// use tickvisor::JobError;
    ///
    /// let err = JobError::fail("connection refused");
    /// assert_eq!(err.to_string(), "execution failed: connection refused");
    /// ```
    pub fn fail(error: impl Into<String>) -> Self {
        JobError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            JobError::Fail { .. } => "job_failed",
            JobError::Panicked { .. } => "job_panicked",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(ConfigError::EmptyName.as_label(), "config_empty_name");
        assert_eq!(ConfigError::ShuttingDown.as_label(), "config_shutting_down");
        assert_eq!(NotFoundError::new("x").as_label(), "task_not_found");
        assert_eq!(
            JobError::Panicked { info: "boom".into() }.as_label(),
            "job_panicked"
        );
        let err = ShutdownError::Timeout {
            timeout: Duration::from_millis(100),
            stuck: vec!["a".into()],
        };
        assert_eq!(err.as_label(), "shutdown_timeout");
    }

    #[test]
    fn messages_name_the_task() {
        let err = NotFoundError::new("cleanup");
        assert_eq!(err.to_string(), "task \"cleanup\" not found");

        let err = ConfigError::InvalidExpression {
            expr: "soon".into(),
            reason: "unknown unit".into(),
        };
        assert!(err.to_string().contains("soon"));
    }
}
