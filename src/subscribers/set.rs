//! # Fan-out of events to subscribers.
//!
//! ```text
//! emit(&Event) ─┬─► [queue 1] ─► worker 1 ─► sub1.on_event()
//!               └─► [queue N] ─► worker N ─► subN.on_event()
//! ```
//!
//! `emit` uses `try_send` and returns immediately. There is no ordering across
//! subscribers, only per-subscriber FIFO.

use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::mpsc;

use crate::events::{Bus, Event, EventKind};
use crate::subscribers::Subscribe;

struct Channel {
    name: &'static str,
    sender: mpsc::Sender<Arc<Event>>,
}

/// Per-subscriber queues and their workers.
///
/// Workers run until the set is dropped (senders closed).
pub struct SubscriberSet {
    channels: Vec<Channel>,
    bus: Bus,
}

impl SubscriberSet {
    /// Spawns one worker per subscriber. Must be called inside a tokio runtime.
    #[must_use]
    pub fn new(subs: Vec<Arc<dyn Subscribe>>, bus: Bus) -> Self {
        let mut channels = Vec::with_capacity(subs.len());

        for sub in subs {
            let (tx, mut rx) = mpsc::channel::<Arc<Event>>(sub.queue_capacity().max(1));
            let name = sub.name();
            let worker_bus = bus.clone();

            tokio::spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let handled = std::panic::AssertUnwindSafe(sub.on_event(ev.as_ref()))
                        .catch_unwind()
                        .await;
                    if let Err(payload) = handled {
                        worker_bus.publish(Event::subscriber_panicked(
                            sub.name(),
                            panic_message(payload.as_ref()),
                        ));
                    }
                }
            });
            channels.push(Channel { name, sender: tx });
        }

        Self { channels, bus }
    }

    /// Queues `event` for every subscriber without waiting.
    ///
    /// Overflow notices are not re-published when they themselves overflow.
    pub fn emit(&self, event: &Event) {
        let event = Arc::new(event.clone());
        let is_overflow = event.kind == EventKind::SubscriberOverflow;

        for channel in &self.channels {
            let reason = match channel.sender.try_send(Arc::clone(&event)) {
                Ok(()) => continue,
                Err(mpsc::error::TrySendError::Full(_)) => "full",
                Err(mpsc::error::TrySendError::Closed(_)) => "closed",
            };
            if !is_overflow {
                self.bus
                    .publish(Event::subscriber_overflow(channel.name, reason));
            }
        }
    }
}

/// Extracts a printable message from a panic payload.
pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<EventKind>>,
    }

    #[async_trait]
    impl Subscribe for Recorder {
        async fn on_event(&self, ev: &Event) {
            self.seen.lock().await.push(ev.kind);
        }

        fn name(&self) -> &'static str {
            "recorder"
        }
    }

    struct Panicker;

    #[async_trait]
    impl Subscribe for Panicker {
        async fn on_event(&self, _ev: &Event) {
            panic!("subscriber boom");
        }

        fn name(&self) -> &'static str {
            "panicker"
        }
    }

    #[tokio::test]
    async fn delivers_in_order() {
        let bus = Bus::new(16);
        let rec = Arc::new(Recorder::default());
        let subs: Vec<Arc<dyn Subscribe>> = vec![rec.clone()];
        let set = SubscriberSet::new(subs, bus);

        set.emit(&Event::new(EventKind::TaskStarting));
        set.emit(&Event::new(EventKind::TaskSucceeded));
        tokio::time::sleep(Duration::from_millis(20)).await;

        let seen = rec.seen.lock().await.clone();
        assert_eq!(seen, vec![EventKind::TaskStarting, EventKind::TaskSucceeded]);
    }

    #[tokio::test]
    async fn panic_is_reported_on_bus() {
        let bus = Bus::new(16);
        let mut rx = bus.subscribe();
        let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(Panicker)];
        let set = SubscriberSet::new(subs, bus);

        set.emit(&Event::new(EventKind::TaskStarting));

        let ev = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("no timeout")
            .expect("event");
        assert_eq!(ev.kind, EventKind::SubscriberPanicked);
        assert_eq!(ev.task.as_deref(), Some("panicker"));
        assert_eq!(ev.reason.as_deref(), Some("subscriber boom"));
    }
}
