//! # One firing of a task: overlap guard, invocation, retries.
//!
//! ```text
//! execute(task)
//!   ├─ begin() ── AlreadyRunning / Inactive ──► FiringSkipped, return Skipped
//!   └─ Admitted
//!        loop {
//!          ├─► TaskStarting{attempt}
//!          ├─► job.run() (panics caught)
//!          ├─ Ok  ──► succeed() ──► TaskSucceeded [+ TaskCompleted], return Succeeded
//!          └─ Err ──► TaskFailed ──► fail()
//!                       ├─ Retry     ──► RetryScheduled ──► sleep(backoff) | cancelled
//!                       │                  └─ resume(), attempt += 1, continue
//!                       ├─ GiveUp    ──► RetriesExhausted, return Failed
//!                       └─ Cancelled ──► return Abandoned
//!        }
//! ```
//!
//! The overlap guard stays held across the whole loop, backoff included. No task lock
//! is held while the job runs or while waiting for a retry.

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use tokio::{select, time};

use crate::error::JobError;
use crate::events::{Bus, Event, EventKind};
use crate::policies::BackoffPolicy;
use crate::subscribers::panic_message;
use crate::tasks::{Admission, AfterFailure, JobRef, Task, TaskStatus};

/// Outcome of one firing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Firing {
    /// Not run: a previous firing is in flight, or the task is finished or cancelled.
    Skipped,
    /// Job succeeded, possibly after retries.
    Succeeded,
    /// Job failed and no retry is left.
    Failed,
    /// Cancelled between attempts; remaining retries were dropped.
    Abandoned,
}

/// Runs one firing of `task` to completion.
pub(crate) async fn execute(task: &Task, bus: &Bus, backoff: &BackoffPolicy) -> Firing {
    match task.begin().await {
        Admission::Admitted => {}
        Admission::AlreadyRunning => return skipped(task, bus, "already_running"),
        Admission::Inactive => return skipped(task, bus, "inactive"),
    }

    let name = task.shared_name();
    let mut attempt: u32 = 1;
    loop {
        bus.publish(
            Event::new(EventKind::TaskStarting)
                .with_task(name.clone())
                .with_attempt(attempt),
        );

        let err = match invoke(task.job()).await {
            Ok(()) => {
                bus.publish(
                    Event::new(EventKind::TaskSucceeded)
                        .with_task(name.clone())
                        .with_attempt(attempt),
                );
                if task.succeed().await == TaskStatus::Completed {
                    bus.publish(Event::new(EventKind::TaskCompleted).with_task(name));
                }
                return Firing::Succeeded;
            }
            Err(err) => err,
        };

        let reason = err.to_string();
        bus.publish(
            Event::new(EventKind::TaskFailed)
                .with_task(name.clone())
                .with_attempt(attempt)
                .with_reason(reason.as_str()),
        );

        match task.fail(&err).await {
            AfterFailure::Retry => {}
            AfterFailure::GiveUp => {
                bus.publish(
                    Event::new(EventKind::RetriesExhausted)
                        .with_task(name)
                        .with_attempt(attempt)
                        .with_reason(reason),
                );
                return Firing::Failed;
            }
            AfterFailure::Cancelled => return Firing::Abandoned,
        }

        let delay = backoff.next(attempt - 1);
        bus.publish(
            Event::new(EventKind::RetryScheduled)
                .with_task(name.clone())
                .with_attempt(attempt)
                .with_delay(delay)
                .with_reason(reason),
        );

        let cancelled = select! {
            biased;
            _ = task.token().cancelled() => true,
            _ = time::sleep(delay) => false,
        };
        if cancelled {
            task.abandon().await;
            return Firing::Abandoned;
        }
        if !task.resume().await {
            return Firing::Abandoned;
        }
        attempt += 1;
    }
}

/// Invokes the job once; a panic becomes [`JobError::Panicked`].
async fn invoke(job: &JobRef) -> Result<(), JobError> {
    match AssertUnwindSafe(job.run()).catch_unwind().await {
        Ok(res) => res,
        Err(payload) => Err(JobError::Panicked {
            info: panic_message(payload.as_ref()),
        }),
    }
}

fn skipped(task: &Task, bus: &Bus, reason: &'static str) -> Firing {
    bus.publish(
        Event::new(EventKind::FiringSkipped)
            .with_task(task.shared_name())
            .with_reason(reason),
    );
    Firing::Skipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    use crate::tasks::{JobFn, TaskSpec};

    /// Job failing its first `failures` invocations.
    fn flaky(calls: Arc<AtomicU32>, failures: u32) -> JobRef {
        JobFn::arc(move || {
            let calls = calls.clone();
            async move {
                let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                if n <= failures {
                    Err(JobError::fail(format!("attempt {n}")))
                } else {
                    Ok(())
                }
            }
        })
    }

    fn task(job: JobRef, max_retries: u32, once: bool) -> Task {
        let builder = TaskSpec::builder("t").job(job).max_retries(max_retries);
        let builder = if once {
            builder.once(Duration::ZERO)
        } else {
            builder.every(Duration::from_secs(1))
        };
        let spec = builder.build().expect("valid spec");
        Task::new(spec, Duration::from_secs(1), CancellationToken::new())
    }

    fn drain(rx: &mut tokio::sync::broadcast::Receiver<Event>) -> Vec<EventKind> {
        let mut kinds = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            kinds.push(ev.kind);
        }
        kinds
    }

    #[tokio::test(start_paused = true)]
    async fn retries_until_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let t = task(flaky(calls.clone(), 2), 3, false);
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();

        let firing = execute(&t, &bus, &BackoffPolicy::default()).await;

        assert_eq!(firing, Firing::Succeeded);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(t.status().await, TaskStatus::Pending);
        assert_eq!(
            drain(&mut rx),
            vec![
                EventKind::TaskStarting,
                EventKind::TaskFailed,
                EventKind::RetryScheduled,
                EventKind::TaskStarting,
                EventKind::TaskFailed,
                EventKind::RetryScheduled,
                EventKind::TaskStarting,
                EventKind::TaskSucceeded,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_budget_leaves_failed() {
        let calls = Arc::new(AtomicU32::new(0));
        let t = task(flaky(calls.clone(), u32::MAX), 2, true);
        let bus = Bus::new(64);

        assert_eq!(execute(&t, &bus, &BackoffPolicy::default()).await, Firing::Failed);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(t.status().await, TaskStatus::Failed);
        assert!(!t.is_executing().await);
        assert_eq!(execute(&t, &bus, &BackoffPolicy::default()).await, Firing::Skipped);
    }

    #[tokio::test(start_paused = true)]
    async fn panic_is_a_failure() {
        let job: JobRef = JobFn::arc(|| async {
            if true {
                panic!("kaboom");
            }
            Ok::<_, JobError>(())
        });
        let t = task(job, 0, true);
        let bus = Bus::new(8);

        assert_eq!(execute(&t, &bus, &BackoffPolicy::default()).await, Firing::Failed);
        let info = t.info().await;
        assert_eq!(info.status, TaskStatus::Failed);
        assert_eq!(info.last_error.as_deref(), Some("job panicked: kaboom"));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_during_backoff_abandons() {
        let calls = Arc::new(AtomicU32::new(0));
        let t = Arc::new(task(flaky(calls.clone(), u32::MAX), 5, false));
        let bus = Bus::new(64);
        let backoff = BackoffPolicy::constant(Duration::from_secs(10));

        let runner = {
            let t = Arc::clone(&t);
            let bus = bus.clone();
            tokio::spawn(async move { execute(&t, &bus, &backoff).await })
        };
        time::sleep(Duration::from_secs(1)).await;
        t.token().cancel();

        assert_eq!(runner.await.expect("join"), Firing::Abandoned);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(t.status().await, TaskStatus::Cancelled);
        assert!(!t.is_executing().await);
    }
}
