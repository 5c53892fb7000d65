//! # Broadcast bus for scheduler events.
//!
//! ```text
//!   Scheduler ──┐
//!   driver 1  ──┼──► Bus ──► listener ──► SubscriberSet
//!   driver N  ──┘  (broadcast)
//! ```
//!
//! ## Rules
//! - `publish()` never blocks and never fails; events without receivers are dropped.
//! - One ring buffer of `capacity` events is shared by all receivers; a receiver that
//!   falls behind gets `RecvError::Lagged(n)` and skips `n` events.

use tokio::sync::broadcast;

use super::event::Event;

/// Cloneable handle to the event channel.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a bus holding up to `capacity` in-flight events (min 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel::<Event>(capacity.max(1));
        Self { tx }
    }

    /// Publishes an event to every current receiver.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a receiver observing events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[tokio::test]
    async fn receiver_sees_events_after_subscribe() {
        let bus = Bus::new(8);
        bus.publish(Event::new(EventKind::ShutdownRequested));

        let mut rx = bus.subscribe();
        bus.publish(Event::new(EventKind::TaskScheduled).with_task("a"));

        let ev = rx.recv().await.expect("event");
        assert_eq!(ev.kind, EventKind::TaskScheduled);
        assert_eq!(ev.task.as_deref(), Some("a"));
    }

    #[test]
    fn publish_without_receivers_is_silent() {
        let bus = Bus::new(0);
        bus.publish(Event::new(EventKind::AllStoppedWithin));
    }
}
