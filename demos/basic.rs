//! # Example: recurring, one-shot and cron-like tasks
//!
//! Run with:
//! ```text
//! RUST_LOG=tickvisor=debug cargo run --example basic
//! ```

use std::sync::atomic::{AtomicU32, Ordering};
use std::{sync::Arc, time::Duration};

use tickvisor::{
    CronParser, JobError, JobFn, LogWriter, Scheduler, SchedulerConfig, Subscribe, TaskSpec,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tickvisor=info")),
        )
        .init();

    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let scheduler = Scheduler::builder(SchedulerConfig::default())
        .with_subscribers(subs)
        .with_parser(Arc::new(CronParser))
        .build();

    let ticks = Arc::new(AtomicU32::new(0));
    scheduler
        .schedule(
            "heartbeat",
            Duration::from_millis(300),
            JobFn::arc({
                let ticks = ticks.clone();
                move || {
                    let ticks = ticks.clone();
                    async move {
                        let n = ticks.fetch_add(1, Ordering::Relaxed) + 1;
                        println!("[heartbeat] tick #{n}");
                        Ok::<_, JobError>(())
                    }
                }
            }),
        )
        .await?;

    scheduler
        .schedule_once(
            "warmup",
            Duration::from_millis(500),
            JobFn::arc(|| async {
                println!("[warmup] caches primed");
                Ok::<_, JobError>(())
            }),
        )
        .await?;

    scheduler
        .schedule_cron(
            "every-second",
            "* * * * * *",
            JobFn::arc(|| async {
                println!("[every-second] cron fired");
                Ok::<_, JobError>(())
            }),
        )
        .await?;

    let spec = TaskSpec::builder("report")
        .every(Duration::from_secs(1))
        .priority(10)
        .job(JobFn::arc(|| async {
            println!("[report] generated");
            Ok::<_, JobError>(())
        }))
        .build()?;
    scheduler.add(spec).await?;

    tokio::time::sleep(Duration::from_millis(2500)).await;

    for name in scheduler.list_tasks().await {
        let info = scheduler.task_info(&name).await?;
        println!(
            "{name}: kind={} status={} runs={} priority={}",
            info.kind.as_label(),
            info.status,
            info.runs,
            info.priority
        );
    }

    scheduler.shutdown(Duration::from_secs(2)).await?;
    println!("heartbeat ticked {} times", ticks.load(Ordering::Relaxed));
    Ok(())
}
