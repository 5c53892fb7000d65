//! Retry policies.
//!
//! These knobs control **whether** a failed firing is retried and **how long** the
//! driver waits before the next attempt.
//!
//! ## Contents
//! - [`RetryPolicy`]   retry budget of a task (`max_retries`)
//! - [`BackoffPolicy`] delay before each retry (first / factor / max + jitter)
//! - [`JitterPolicy`]  randomization of that delay
//!
//! ## Quick wiring
//! ```text
//! TaskSpec { max_retries }  ──► Task { retry: RetryPolicy }
//! SchedulerConfig { retry_backoff } ──► core::executor::execute uses:
//!      - retry.allows(retry_count) to decide retry / give up
//!      - retry_backoff.next(n) to wait before retry n of the firing
//! ```
//!
//! ## Defaults
//! - `RetryPolicy::default()` → no retries.
//! - `BackoffPolicy::default()` → constant 100ms (factor=1.0), max=30s, no jitter.

mod backoff;
mod jitter;
mod retry;

pub use backoff::BackoffPolicy;
pub use jitter::JitterPolicy;
pub use retry::RetryPolicy;
