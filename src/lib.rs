//! # tickvisor
//!
//! **Tickvisor** is an in-process scheduler for async jobs on tokio: recurring
//! (fixed interval), cron-like (interval derived from an expression) and one-shot
//! (single delayed run) tasks, with per-task retries, overlap protection,
//! cancellation and bounded graceful shutdown.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     schedule / schedule_cron / schedule_once / add(TaskSpec)
//!                              │
//!                              ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Scheduler                                                        │
//! │  - Registry (name → Task, RwLock)                                 │
//! │  - root CancellationToken (parent of every task token)            │
//! │  - TaskTracker (live drivers, bounded shutdown)                   │
//! │  - ScheduleParser (expression → interval)                         │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   driver     │   │   driver     │   │   driver     │
//!     │ (ticker loop)│   │ (ticker loop)│   │ (one delay)  │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//!         execute()          execute()          execute()
//!     (overlap guard, panic capture, bounded retry loop)
//!            │ publish           │                  │
//!            ▼                   ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                     Bus (broadcast channel)                       │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                       listener ──► SubscriberSet
//!                                  ┌─────────┼─────────┐
//!                                  ▼         ▼         ▼
//!                              LogWriter   sub2  ...  subN
//! ```
//!
//! ### Task lifecycle
//! ```text
//! Pending ──timer──► Running ──Ok──► Pending (recurring) / Completed (one-shot)
//!                       │
//!                       └─Err/panic─► Failed ──budget left──► Running (after backoff)
//!                                            └─exhausted────► Failed
//! any non-terminal ──cancel / shutdown──► Cancelled
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                       |
//! |-------------------|--------------------------------------------------------------|------------------------------------------|
//! | **Scheduling**    | Register, cancel, inspect, trigger and shut down tasks.      | [`Scheduler`], [`SchedulerBuilder`]      |
//! | **Tasks**         | Jobs as closures or trait objects, validated specs.          | [`Job`], [`JobFn`], [`TaskSpec`]         |
//! | **Parsers**       | Turn expressions into intervals.                             | [`ScheduleParser`], [`CronParser`]       |
//! | **Policies**      | Retry budget and delay between retries.                      | [`RetryPolicy`], [`BackoffPolicy`]       |
//! | **Subscriber API**| Observe lifecycle events (logging, metrics, ...).            | [`Subscribe`], [`LogWriter`]             |
//! | **Errors**        | Typed errors for registration, lookup, shutdown and jobs.    | [`ConfigError`], [`ShutdownError`]       |
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tickvisor::{JobError, JobFn, LogWriter, Scheduler, SchedulerConfig, Subscribe};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
//!     let scheduler = Scheduler::builder(SchedulerConfig::default())
//!         .with_subscribers(subs)
//!         .build();
//!
//!     scheduler
//!         .schedule_with_retry(
//!             "heartbeat",
//!             Duration::from_millis(20),
//!             3,
//!             JobFn::arc(|| async {
//!                 println!("tick");
//!                 Ok::<_, JobError>(())
//!             }),
//!         )
//!         .await?;
//!
//!     tokio::time::sleep(Duration::from_millis(70)).await;
//!     scheduler.cancel("heartbeat").await?;
//!     scheduler.shutdown(Duration::from_secs(1)).await?;
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod parsers;
mod policies;
mod subscribers;
mod tasks;

// ---- Public re-exports ----

pub use crate::core::{Firing, Scheduler, SchedulerBuilder, SchedulerConfig};
pub use error::{ConfigError, JobError, NotFoundError, ShutdownError};
pub use events::{Event, EventKind};
pub use parsers::{parse_duration, CronParser, DurationParser, ParseError, ScheduleParser};
pub use policies::{BackoffPolicy, JitterPolicy, RetryPolicy};
pub use subscribers::{LogWriter, Subscribe};
pub use tasks::{
    Cadence, Job, JobFn, JobRef, TaskInfo, TaskKind, TaskSpec, TaskSpecBuilder, TaskStatus,
};
