//! # Event subscribers.
//!
//! Subscribers observe the scheduler through [`Event`](crate::Event)s published on
//! the internal bus. Each one gets its own bounded queue and worker, so a slow or
//! panicking subscriber never delays drivers or other subscribers.
//!
//! ```text
//! driver / execute ── publish ──► Bus ──► listener ──► SubscriberSet
//!                                                         ├──► LogWriter
//!                                                         └──► custom ...
//! ```
//!
//! ## Implementing a subscriber
//! ```no_run
//! use async_trait::async_trait;
//! use tickvisor::{Event, EventKind, Subscribe};
//!
//! struct FailureCounter;
//!
//! #[async_trait]
//! impl Subscribe for FailureCounter {
//!     async fn on_event(&self, ev: &Event) {
//!         if ev.kind == EventKind::TaskFailed {
//!             // bump a metric
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "failure-counter" }
//! }
//! ```

mod log;
mod set;
mod subscriber;

pub use log::LogWriter;
pub use set::SubscriberSet;
pub use subscriber::Subscribe;

pub(crate) use set::panic_message;
