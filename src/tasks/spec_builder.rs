use std::time::Duration;

use crate::error::ConfigError;
use crate::tasks::{Cadence, JobRef, TaskSpec};

/// Fluent builder for [`TaskSpec`].
///
/// Validation happens in [`build`](Self::build); nothing touches a scheduler until
/// the spec is passed to [`Scheduler::add`](crate::Scheduler::add).
#[derive(Clone)]
pub struct TaskSpecBuilder {
    name: String,
    cadence: Option<Cadence>,
    job: Option<JobRef>,
    priority: i32,
    max_retries: u32,
}

impl TaskSpecBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cadence: None,
            job: None,
            priority: 0,
            max_retries: 0,
        }
    }

    /// Recurring task firing every `interval`.
    pub fn every(mut self, interval: Duration) -> Self {
        self.cadence = Some(Cadence::Every(interval));
        self
    }

    /// Cron-like task; `expr` is resolved by the scheduler's parser.
    pub fn cron(mut self, expr: impl Into<String>) -> Self {
        self.cadence = Some(Cadence::Cron(expr.into()));
        self
    }

    /// One-shot task firing once after `delay`.
    pub fn once(mut self, delay: Duration) -> Self {
        self.cadence = Some(Cadence::Once(delay));
        self
    }

    pub fn job(mut self, job: JobRef) -> Self {
        self.job = Some(job);
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Validates and builds the spec.
    ///
    /// ### Errors
    /// - [`ConfigError::EmptyName`] for an empty or whitespace-only name
    /// - [`ConfigError::MissingCadence`] if no cadence was set
    /// - [`ConfigError::NonPositiveInterval`] for `every(Duration::ZERO)`
    /// - [`ConfigError::MissingJob`] if no job was set
    pub fn build(self) -> Result<TaskSpec, ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        let cadence = self.cadence.ok_or_else(|| ConfigError::MissingCadence {
            task: self.name.clone(),
        })?;
        if cadence == Cadence::Every(Duration::ZERO) {
            return Err(ConfigError::NonPositiveInterval { task: self.name });
        }
        let job = self.job.ok_or_else(|| ConfigError::MissingJob {
            task: self.name.clone(),
        })?;

        Ok(TaskSpec {
            name: self.name,
            cadence,
            job,
            priority: self.priority,
            max_retries: self.max_retries,
        })
    }
}
