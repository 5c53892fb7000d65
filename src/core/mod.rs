//! Runtime core: registration, drivers, firings and shutdown.
//!
//! The public API of this module is [`Scheduler`], its [`SchedulerBuilder`] and
//! [`SchedulerConfig`].
//!
//! Internal modules:
//! - [`registry`]: name → task map with atomic insert/remove;
//! - [`driver`]: one timer loop per task;
//! - [`executor`]: one firing with overlap guard, panic capture and retries;
//! - [`scheduler`]: public facade and bounded shutdown.

mod builder;
mod config;
mod driver;
mod executor;
mod registry;
mod scheduler;

pub use builder::SchedulerBuilder;
pub use config::SchedulerConfig;
pub use executor::Firing;
pub use scheduler::Scheduler;
