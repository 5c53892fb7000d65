//! # Scheduler configuration.
//!
//! [`SchedulerConfig`] is a plain struct with public fields; start from
//! `SchedulerConfig::default()` and override what you need.
//!
//! ```rust
//! use std::time::Duration;
//! use tickvisor::{BackoffPolicy, SchedulerConfig};
//!
//! let cfg = SchedulerConfig {
//!     retry_backoff: BackoffPolicy::constant(Duration::from_millis(250)),
//!     ..SchedulerConfig::default()
//! };
//! assert_eq!(cfg.bus_capacity, 1024);
//! ```

use crate::policies::BackoffPolicy;

/// Runtime settings shared by every task of a scheduler.
#[derive(Clone, Debug)]
pub struct SchedulerConfig {
    /// Delay between a failed invocation and its retry within the same firing.
    ///
    /// Indexed by the retry number inside the firing (0 for the first retry).
    pub retry_backoff: BackoffPolicy,

    /// Capacity of the event bus ring buffer.
    ///
    /// Receivers lagging more than this many events skip the oldest ones.
    /// Values below 1 are clamped.
    pub bus_capacity: usize,
}

impl SchedulerConfig {
    /// Bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }
}

impl Default for SchedulerConfig {
    /// - `retry_backoff`: constant 100ms, no jitter
    /// - `bus_capacity`: 1024
    fn default() -> Self {
        Self {
            retry_backoff: BackoffPolicy::default(),
            bus_capacity: 1024,
        }
    }
}
