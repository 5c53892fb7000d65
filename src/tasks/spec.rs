//! # Task specification.
//!
//! [`TaskSpec`] is a validated registration request: name, cadence, job and metadata.
//! It can only be obtained from [`TaskSpec::builder`], so a spec in hand always has a
//! non-empty name, a cadence and a job.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tickvisor::{JobError, JobFn, TaskKind, TaskSpec};
//!
//! let spec = TaskSpec::builder("reindex")
//!     .every(Duration::from_secs(30))
//!     .max_retries(3)
//!     .priority(10)
//!     .job(JobFn::arc(|| async { Ok::<_, JobError>(()) }))
//!     .build()
//!     .expect("valid spec");
//!
//! assert_eq!(spec.kind(), TaskKind::Recurring);
//! assert_eq!(spec.max_retries(), 3);
//! ```

use crate::tasks::{Cadence, JobRef, TaskKind, TaskSpecBuilder};

/// Validated request to register one task.
#[derive(Clone)]
pub struct TaskSpec {
    pub(super) name: String,
    pub(super) cadence: Cadence,
    pub(super) job: JobRef,
    pub(super) priority: i32,
    pub(super) max_retries: u32,
}

impl TaskSpec {
    /// Starts building a spec for a task called `name`.
    pub fn builder(name: impl Into<String>) -> TaskSpecBuilder {
        TaskSpecBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cadence(&self) -> &Cadence {
        &self.cadence
    }

    pub fn kind(&self) -> TaskKind {
        self.cadence.kind()
    }

    pub fn job(&self) -> &JobRef {
        &self.job
    }

    /// Inert metadata; does not influence firing order.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }
}

impl std::fmt::Debug for TaskSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskSpec")
            .field("name", &self.name)
            .field("cadence", &self.cadence)
            .field("priority", &self.priority)
            .field("max_retries", &self.max_retries)
            .finish_non_exhaustive()
    }
}
