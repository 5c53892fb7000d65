//! # Example: retries, manual trigger, cancel and bounded shutdown
//!
//! - `flaky` fails twice, then succeeds inside the same firing (3 attempts).
//! - `slow` is triggered manually while already running and gets skipped.
//! - `stuck` outlives the shutdown deadline and is reported.
//!
//! Run with:
//! ```text
//! RUST_LOG=tickvisor=debug cargo run --example retry_and_cancel
//! ```

use std::sync::atomic::{AtomicU32, Ordering};
use std::{sync::Arc, time::Duration};

use tickvisor::{
    BackoffPolicy, JobError, JobFn, LogWriter, Scheduler, SchedulerConfig, ShutdownError,
    Subscribe,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tickvisor=debug")),
        )
        .init();

    let cfg = SchedulerConfig {
        retry_backoff: BackoffPolicy::constant(Duration::from_millis(200)),
        ..SchedulerConfig::default()
    };
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let scheduler = Arc::new(Scheduler::builder(cfg).with_subscribers(subs).build());

    let attempts = Arc::new(AtomicU32::new(0));
    scheduler
        .schedule_with_retry(
            "flaky",
            Duration::from_secs(2),
            3,
            JobFn::arc({
                let attempts = attempts.clone();
                move || {
                    let attempts = attempts.clone();
                    async move {
                        let n = attempts.fetch_add(1, Ordering::Relaxed) + 1;
                        if n < 3 {
                            println!("[flaky] attempt {n} failed");
                            return Err(JobError::fail(format!("upstream unavailable ({n})")));
                        }
                        println!("[flaky] attempt {n} ok");
                        Ok(())
                    }
                }
            }),
        )
        .await?;

    scheduler
        .schedule(
            "slow",
            Duration::from_secs(10),
            JobFn::arc(|| async {
                println!("[slow] working...");
                tokio::time::sleep(Duration::from_millis(800)).await;
                Ok::<_, JobError>(())
            }),
        )
        .await?;

    let first = {
        let scheduler = scheduler.clone();
        tokio::spawn(async move { scheduler.trigger("slow").await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    println!("second trigger: {:?}", scheduler.trigger("slow").await?);
    println!("first trigger: {:?}", first.await??);

    tokio::time::sleep(Duration::from_millis(2500)).await;
    let info = scheduler.task_info("flaky").await?;
    println!(
        "[flaky] status={} retries used={}/{} last_error={:?}",
        info.status, info.retry_count, info.max_retries, info.last_error
    );

    scheduler.cancel("flaky").await?;
    if let Err(e) = scheduler.task_status("flaky").await {
        println!("after cancel: {e}");
    }

    scheduler
        .schedule_once(
            "stuck",
            Duration::ZERO,
            JobFn::arc(|| async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok::<_, JobError>(())
            }),
        )
        .await?;
    tokio::time::sleep(Duration::from_millis(50)).await;

    match scheduler.shutdown(Duration::from_millis(500)).await {
        Ok(()) => println!("shutdown clean"),
        Err(ShutdownError::Timeout { stuck, .. }) => println!("shutdown timed out, stuck: {stuck:?}"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
