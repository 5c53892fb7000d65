//! # Subscriber trait.
//!
//! ## Rules
//! - Events are delivered FIFO per subscriber, from a dedicated worker task.
//! - When the queue is full the event is dropped for this subscriber only and
//!   `EventKind::SubscriberOverflow` is published.
//! - Panics are caught and published as `EventKind::SubscriberPanicked`.

use async_trait::async_trait;

use crate::events::Event;

/// Observer of scheduler events.
///
/// Implementations should avoid blocking the executor; use async I/O.
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handles one event.
    async fn on_event(&self, event: &Event);

    /// Name used in overflow/panic events. Override the verbose default.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Capacity of this subscriber's queue (clamped to at least 1).
    fn queue_capacity(&self) -> usize {
        1024
    }
}
