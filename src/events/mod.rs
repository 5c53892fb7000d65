//! Scheduler events: data model and broadcast bus.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Scheduler` (schedule/cancel/shutdown), drivers, `execute`,
//!   `SubscriberSet` workers (overflow/panic).
//! - **Consumers**: the scheduler's listener, which fans events out to subscribers.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
