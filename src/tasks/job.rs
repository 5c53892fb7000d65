//! # Job abstraction and its closure-backed implementation.
//!
//! A [`Job`] is the opaque body of a task: no arguments, async, fallible. Returning
//! `Err` or panicking both count as a failed invocation; the scheduler catches both.
//!
//! [`JobFn`] wraps a closure that creates a fresh future per invocation, so nothing is
//! shared between firings unless the closure captures an `Arc` on purpose.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use tickvisor::{JobError, JobFn, JobRef};
//!
//! let hits = Arc::new(AtomicU32::new(0));
//! let job: JobRef = JobFn::arc({
//!     let hits = hits.clone();
//!     move || {
//!         let hits = hits.clone();
//!         async move {
//!             hits.fetch_add(1, Ordering::Relaxed);
//!             Ok::<_, JobError>(())
//!         }
//!     }
//! });
//! # let _ = job;
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::JobError;

/// # Unit of work executed on every firing.
///
/// ```
/// use async_trait::async_trait;
/// use tickvisor::{Job, JobError};
///
/// struct Vacuum;
///
/// #[async_trait]
/// impl Job for Vacuum {
///     async fn run(&self) -> Result<(), JobError> {
///         // compact storage...
///         Ok(())
///     }
/// }
/// ```
#[async_trait]
pub trait Job: Send + Sync + 'static {
    /// Runs the job once.
    async fn run(&self) -> Result<(), JobError>;
}

/// Shared handle to a job.
pub type JobRef = Arc<dyn Job>;

/// Closure-backed [`Job`].
pub struct JobFn<F> {
    f: F,
}

impl<F, Fut> JobFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), JobError>> + Send + 'static,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Creates the job and returns it as a shared handle.
    pub fn arc(f: F) -> Arc<Self> {
        Arc::new(Self::new(f))
    }
}

#[async_trait]
impl<F, Fut> Job for JobFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), JobError>> + Send + 'static,
{
    async fn run(&self) -> Result<(), JobError> {
        (self.f)().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn closure_runs_fresh_future_each_time() {
        let calls = Arc::new(std::sync::atomic::AtomicU32::new(0));
        let job: JobRef = JobFn::arc({
            let calls = calls.clone();
            move || {
                let calls = calls.clone();
                async move {
                    let n = calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                    if n == 0 {
                        Err(JobError::fail("first call fails"))
                    } else {
                        Ok(())
                    }
                }
            }
        });

        assert!(job.run().await.is_err());
        assert!(job.run().await.is_ok());
    }
}
