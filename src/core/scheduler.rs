//! # Scheduler: registry owner, driver launcher, shutdown coordinator.
//!
//! ```text
//! schedule*/add(spec) ──► resolve period ──► Registry::insert ──► tracker.spawn(driver)
//! cancel(name)        ──► Registry::remove (cancels task token) ──► TaskCancelled
//! trigger(name)       ──► execute() in the caller's task
//! shutdown(timeout)   ──► Registry::close ──► root.cancel() ──► tracker.close()
//!                          └─► timeout(tracker.wait())
//!                                ├─ Ok  ──► AllStoppedWithin, Ok(())
//!                                └─ Err ──► GraceExceeded, Err(Timeout{ stuck })
//! ```
//!
//! Every task token is a child of the root token: cancelling the root stops every
//! driver, cancelling one task stops nothing else. Jobs are never aborted; a job in
//! flight during shutdown runs to completion.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tickvisor::{JobError, JobFn, Scheduler, TaskStatus};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let scheduler = Scheduler::new();
//!
//! scheduler
//!     .schedule_once("warmup", Duration::from_millis(10), JobFn::arc(|| async {
//!         Ok::<_, JobError>(())
//!     }))
//!     .await?;
//!
//! tokio::time::sleep(Duration::from_millis(50)).await;
//! assert_eq!(scheduler.task_status("warmup").await?, TaskStatus::Completed);
//!
//! scheduler.shutdown(Duration::from_secs(1)).await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::core::{
    builder::SchedulerBuilder,
    config::SchedulerConfig,
    driver,
    executor::{self, Firing},
    registry::Registry,
};
use crate::error::{ConfigError, NotFoundError, ShutdownError};
use crate::events::{Bus, Event, EventKind};
use crate::parsers::ScheduleParser;
use crate::tasks::{Cadence, JobRef, Task, TaskInfo, TaskSpec, TaskStatus};

/// Concurrent scheduler of recurring, cron-like and one-shot tasks.
///
/// Share it between callers with an `Arc`; every method takes `&self`.
pub struct Scheduler {
    cfg: SchedulerConfig,
    bus: Bus,
    parser: Arc<dyn ScheduleParser>,
    registry: Registry,
    root: CancellationToken,
    drivers: TaskTracker,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    /// Scheduler with the default config, no subscribers and the duration parser.
    pub fn new() -> Self {
        SchedulerBuilder::new(SchedulerConfig::default()).build()
    }

    /// Starts a [`SchedulerBuilder`].
    pub fn builder(cfg: SchedulerConfig) -> SchedulerBuilder {
        SchedulerBuilder::new(cfg)
    }

    pub(crate) fn new_internal(
        cfg: SchedulerConfig,
        bus: Bus,
        parser: Arc<dyn ScheduleParser>,
    ) -> Self {
        Self {
            cfg,
            bus,
            parser,
            registry: Registry::new(),
            root: CancellationToken::new(),
            drivers: TaskTracker::new(),
        }
    }

    /// Runs `job` every `interval`, first one interval from now.
    pub async fn schedule(
        &self,
        name: impl Into<String>,
        interval: Duration,
        job: JobRef,
    ) -> Result<(), ConfigError> {
        self.add(TaskSpec::builder(name).every(interval).job(job).build()?)
            .await
    }

    /// Runs `job` on the interval the configured parser derives from `expr`.
    pub async fn schedule_cron(
        &self,
        name: impl Into<String>,
        expr: impl Into<String>,
        job: JobRef,
    ) -> Result<(), ConfigError> {
        self.add(TaskSpec::builder(name).cron(expr).job(job).build()?)
            .await
    }

    /// Runs `job` once, `delay` from now. A zero delay fires immediately.
    pub async fn schedule_once(
        &self,
        name: impl Into<String>,
        delay: Duration,
        job: JobRef,
    ) -> Result<(), ConfigError> {
        self.add(TaskSpec::builder(name).once(delay).job(job).build()?)
            .await
    }

    /// Like [`schedule`](Self::schedule), with a lifetime budget of `max_retries`.
    pub async fn schedule_with_retry(
        &self,
        name: impl Into<String>,
        interval: Duration,
        max_retries: u32,
        job: JobRef,
    ) -> Result<(), ConfigError> {
        let spec = TaskSpec::builder(name)
            .every(interval)
            .max_retries(max_retries)
            .job(job)
            .build()?;
        self.add(spec).await
    }

    /// Like [`schedule`](Self::schedule), tagging the task with `priority`.
    ///
    /// Priority is informational; it does not affect firing order.
    pub async fn schedule_with_priority(
        &self,
        name: impl Into<String>,
        interval: Duration,
        priority: i32,
        job: JobRef,
    ) -> Result<(), ConfigError> {
        let spec = TaskSpec::builder(name)
            .every(interval)
            .priority(priority)
            .job(job)
            .build()?;
        self.add(spec).await
    }

    /// Registers a validated spec and launches its driver.
    ///
    /// On error nothing is registered and no driver starts.
    pub async fn add(&self, spec: TaskSpec) -> Result<(), ConfigError> {
        let period = self.resolve_period(&spec)?;
        let task = Arc::new(Task::new(spec, period, self.root.child_token()));

        let bus = self.bus.clone();
        let backoff = self.cfg.retry_backoff;
        let drivers = &self.drivers;
        self.registry
            .insert(task, |task| {
                bus.publish(
                    Event::new(EventKind::TaskScheduled)
                        .with_task(task.shared_name())
                        .with_reason(task.kind().as_label()),
                );
                drivers.spawn(driver::run(task, bus.clone(), backoff));
            })
            .await
    }

    /// Removes the task and cancels its driver. Does not wait for a job in flight.
    pub async fn cancel(&self, name: &str) -> Result<(), NotFoundError> {
        let task = self
            .registry
            .remove(name)
            .await
            .ok_or_else(|| NotFoundError::new(name))?;
        task.mark_cancelled().await;
        self.bus
            .publish(Event::new(EventKind::TaskCancelled).with_task(task.shared_name()));
        Ok(())
    }

    pub async fn task_status(&self, name: &str) -> Result<TaskStatus, NotFoundError> {
        Ok(self.lookup(name).await?.status().await)
    }

    /// Snapshot of a task's metadata and state.
    pub async fn task_info(&self, name: &str) -> Result<TaskInfo, NotFoundError> {
        Ok(self.lookup(name).await?.info().await)
    }

    /// Sorted names of registered tasks.
    pub async fn list_tasks(&self) -> Vec<String> {
        self.registry.names().await
    }

    pub async fn len(&self) -> usize {
        self.registry.len().await
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Fires the task now, in the caller's task, and waits for the firing to finish.
    ///
    /// Returns [`Firing::Skipped`] if a firing is already in flight or the task is
    /// finished. The regular schedule is not shifted.
    pub async fn trigger(&self, name: &str) -> Result<Firing, NotFoundError> {
        let task = self.lookup(name).await?;
        Ok(executor::execute(&task, &self.bus, &self.cfg.retry_backoff).await)
    }

    /// Number of drivers that have not exited yet.
    pub fn live_drivers(&self) -> usize {
        self.drivers.len()
    }

    /// Stops every driver and waits up to `timeout` for them to exit.
    ///
    /// New registrations fail with [`ConfigError::ShuttingDown`] from the first call
    /// on. Registered tasks stay inspectable with status `Cancelled` (or their
    /// terminal status). Calling again after a successful shutdown returns `Ok(())`.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), ShutdownError> {
        let first = self.registry.close().await;
        if first {
            self.bus.publish(Event::new(EventKind::ShutdownRequested));
            self.root.cancel();
            self.drivers.close();
        } else if self.drivers.is_empty() {
            return Ok(());
        }

        match tokio::time::timeout(timeout, self.drivers.wait()).await {
            Ok(()) => {
                self.bus.publish(Event::new(EventKind::AllStoppedWithin));
                Ok(())
            }
            Err(_) => {
                let stuck = self.registry.executing().await;
                self.bus
                    .publish(Event::new(EventKind::GraceExceeded).with_reason(stuck.join(",")));
                Err(ShutdownError::Timeout { timeout, stuck })
            }
        }
    }

    async fn lookup(&self, name: &str) -> Result<Arc<Task>, NotFoundError> {
        self.registry
            .get(name)
            .await
            .ok_or_else(|| NotFoundError::new(name))
    }

    fn resolve_period(&self, spec: &TaskSpec) -> Result<Duration, ConfigError> {
        let period = match spec.cadence() {
            Cadence::Every(interval) => *interval,
            Cadence::Once(delay) => return Ok(*delay),
            Cadence::Cron(expr) => {
                self.parser
                    .parse(expr)
                    .map_err(|e| ConfigError::InvalidExpression {
                        expr: expr.clone(),
                        reason: e.to_string(),
                    })?
            }
        };
        if period.is_zero() {
            return Err(ConfigError::NonPositiveInterval {
                task: spec.name().to_string(),
            });
        }
        Ok(period)
    }
}
