//! # Per-task driver loop.
//!
//! One driver runs per registered task for the task's whole lifetime.
//!
//! ```text
//! Recurring / CronLike:            OneShot:
//! loop {                           select! {
//!   select! {                        cancelled ─► mark Cancelled
//!     cancelled ─► mark Cancelled    sleep(delay) ─► execute
//!                  break           }
//!     tick ─► execute (awaited)
//!   }
//! }
//! ```
//!
//! Cancellation is polled first, so a driver that has observed cancellation never
//! starts another firing. Ticks missed while a firing is in flight are skipped.

use std::sync::Arc;
use std::time::Duration;

use tokio::select;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::core::executor::execute;
use crate::events::{Bus, Event, EventKind};
use crate::policies::BackoffPolicy;
use crate::tasks::Task;

/// Drives `task` until it is cancelled or, for a one-shot task, has fired.
pub(crate) async fn run(task: Arc<Task>, bus: Bus, backoff: BackoffPolicy) {
    if task.kind().is_recurring() {
        recurring(&task, &bus, &backoff).await;
    } else {
        once(&task, &bus, &backoff).await;
    }
    bus.publish(Event::new(EventKind::DriverStopped).with_task(task.shared_name()));
}

/// Longest ticker period; larger intervals never fire in practice.
const MAX_PERIOD: Duration = Duration::from_secs(86_400 * 365 * 30);

async fn recurring(task: &Task, bus: &Bus, backoff: &BackoffPolicy) {
    let period = task.period().min(MAX_PERIOD);
    let start = Instant::now()
        .checked_add(period)
        .unwrap_or_else(|| Instant::now() + Duration::from_secs(86_400));
    let mut ticker = time::interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        select! {
            biased;
            _ = task.token().cancelled() => {
                task.mark_cancelled().await;
                return;
            }
            _ = ticker.tick() => {
                execute(task, bus, backoff).await;
            }
        }
    }
}

async fn once(task: &Task, bus: &Bus, backoff: &BackoffPolicy) {
    select! {
        biased;
        _ = task.token().cancelled() => task.mark_cancelled().await,
        _ = time::sleep(task.period()) => {
            execute(task, bus, backoff).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio_util::sync::CancellationToken;

    use crate::error::JobError;
    use crate::tasks::{JobFn, JobRef, TaskSpec, TaskStatus};

    fn counting(calls: Arc<AtomicU32>) -> JobRef {
        JobFn::arc(move || {
            let calls = calls.clone();
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, JobError>(())
            }
        })
    }

    #[tokio::test(start_paused = true)]
    async fn recurring_fires_each_period_until_cancelled() {
        let calls = Arc::new(AtomicU32::new(0));
        let spec = TaskSpec::builder("tick")
            .every(Duration::from_millis(100))
            .job(counting(calls.clone()))
            .build()
            .expect("valid spec");
        let task = Arc::new(Task::new(
            spec,
            Duration::from_millis(100),
            CancellationToken::new(),
        ));
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();

        let handle = tokio::spawn(run(Arc::clone(&task), bus, BackoffPolicy::default()));
        time::sleep(Duration::from_millis(350)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        task.token().cancel();
        handle.await.expect("join");
        assert_eq!(task.status().await, TaskStatus::Cancelled);

        let mut last = None;
        while let Ok(ev) = rx.try_recv() {
            last = Some(ev.kind);
        }
        assert_eq!(last, Some(EventKind::DriverStopped));
    }

    #[tokio::test(start_paused = true)]
    async fn one_shot_fires_once_and_exits() {
        let calls = Arc::new(AtomicU32::new(0));
        let spec = TaskSpec::builder("once")
            .once(Duration::from_millis(50))
            .job(counting(calls.clone()))
            .build()
            .expect("valid spec");
        let task = Arc::new(Task::new(
            spec,
            Duration::from_millis(50),
            CancellationToken::new(),
        ));

        run(Arc::clone(&task), Bus::new(8), BackoffPolicy::default()).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(task.status().await, TaskStatus::Completed);
    }
}
