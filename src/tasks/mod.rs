//! # Tasks: what is scheduled and how its state evolves.
//!
//! - [`Job`] / [`JobFn`] / [`JobRef`] - the unit of work (zero-argument, fallible, async)
//! - [`Cadence`] / [`TaskKind`] - when the job fires
//! - [`TaskSpec`] / [`TaskSpecBuilder`] - validated registration request
//! - [`TaskStatus`] / [`TaskInfo`] - lifecycle state and its public snapshot
//!
//! The runtime entity (`Task`) is crate-private: callers only see it through
//! [`Scheduler`](crate::Scheduler) lookups.

mod cadence;
mod job;
mod spec;
mod spec_builder;
mod status;
mod task;

pub use cadence::{Cadence, TaskKind};
pub use job::{Job, JobFn, JobRef};
pub use spec::TaskSpec;
pub use spec_builder::TaskSpecBuilder;
pub use status::TaskStatus;
pub use task::TaskInfo;

pub(crate) use task::{Admission, AfterFailure, Task};
