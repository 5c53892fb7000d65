use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;

use crate::core::{config::SchedulerConfig, scheduler::Scheduler};
use crate::events::Bus;
use crate::parsers::{DurationParser, ScheduleParser};
use crate::subscribers::{Subscribe, SubscriberSet};

/// Builder for a [`Scheduler`] with subscribers or a custom schedule parser.
///
/// ```rust
/// use std::sync::Arc;
/// use tickvisor::{CronParser, LogWriter, SchedulerBuilder, SchedulerConfig, Subscribe};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
/// let scheduler = SchedulerBuilder::new(SchedulerConfig::default())
///     .with_subscribers(subs)
///     .with_parser(Arc::new(CronParser))
///     .build();
/// # let _ = scheduler;
/// # }
/// ```
pub struct SchedulerBuilder {
    cfg: SchedulerConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
    parser: Arc<dyn ScheduleParser>,
}

impl SchedulerBuilder {
    /// Creates a builder with no subscribers and the [`DurationParser`].
    pub fn new(cfg: SchedulerConfig) -> Self {
        Self {
            cfg,
            subscribers: Vec::new(),
            parser: Arc::new(DurationParser),
        }
    }

    /// Sets event subscribers.
    ///
    /// Each subscriber gets a dedicated worker with a bounded queue.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Sets the parser used by [`Scheduler::schedule_cron`].
    pub fn with_parser(mut self, parser: Arc<dyn ScheduleParser>) -> Self {
        self.parser = parser;
        self
    }

    /// Builds the scheduler.
    ///
    /// With subscribers configured this spawns their workers and the bus listener, so
    /// it must then be called inside a tokio runtime.
    pub fn build(self) -> Scheduler {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        if !self.subscribers.is_empty() {
            let set = SubscriberSet::new(self.subscribers, bus.clone());
            subscriber_listener(&bus, set);
        }
        Scheduler::new_internal(self.cfg, bus, self.parser)
    }
}

/// Forwards bus events to the subscriber set until the bus closes.
fn subscriber_listener(bus: &Bus, set: SubscriberSet) {
    let mut rx = bus.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(ev) => set.emit(&ev),
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            }
        }
    });
}
