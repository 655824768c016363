//! Event bus - pub/sub channel between the monitor and its consumers
//!
//! The bus wraps a tokio broadcast channel: the monitor emits, any number
//! of consumers (UI adapters, loggers, tests) subscribe. Emission is
//! fire-and-forget; a bus with no subscribers simply drops events.

use tokio::sync::broadcast;
use tracing::debug;

use super::types::SyncEvent;

/// Default channel capacity (events)
///
/// Progress sources tick at most a few times per second, so this is hours
/// of buffer for a slow consumer.
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Broadcast bus for sync notifications
pub struct EventBus {
    tx: broadcast::Sender<SyncEvent>,
}

impl EventBus {
    /// Create a new event bus with the given capacity
    pub fn new(capacity: usize) -> Self {
        debug!(capacity, "EventBus::new: creating event bus");
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Create a new event bus with default capacity
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }

    /// Emit an event to all subscribers
    pub fn emit(&self, event: SyncEvent) {
        debug!(event_type = event.event_type(), "EventBus::emit");
        // Ignore send errors (no subscribers is OK)
        let _ = self.tx.send(event);
    }

    /// Subscribe to receive events emitted after this call
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.tx.subscribe()
    }

    /// Create an emitter handle for the monitor actor
    pub fn emitter(&self) -> EventEmitter {
        EventEmitter { tx: self.tx.clone() }
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

/// Handle for emitting events without owning the bus
///
/// Cheap to clone; provides one convenience method per notification so call
/// sites read like the contract they implement.
#[derive(Clone)]
pub struct EventEmitter {
    tx: broadcast::Sender<SyncEvent>,
}

impl EventEmitter {
    /// Emit a raw event
    pub fn emit(&self, event: SyncEvent) {
        debug!(event_type = event.event_type(), "EventEmitter::emit");
        let _ = self.tx.send(event);
    }

    /// Notify that the progress fraction advanced
    pub fn progress_changed(&self, fraction: f64) {
        self.emit(SyncEvent::ProgressChanged { fraction });
    }

    /// Notify that the progress message changed
    pub fn message_changed(&self, message: &str) {
        self.emit(SyncEvent::MessageChanged {
            message: message.to_string(),
        });
    }

    /// Notify that synchronization completed cleanly
    pub fn sync_completed(&self) {
        self.emit(SyncEvent::SyncCompleted);
    }

    /// Notify that synchronization finished in a degraded state
    pub fn sync_completed_with_error(&self) {
        self.emit(SyncEvent::SyncCompletedWithError);
    }

    /// Report a classified connectivity fault
    pub fn error_raised(&self, category: crate::classify::ErrorCategory, description: &str) {
        self.emit(SyncEvent::ErrorRaised {
            category,
            description: description.to_string(),
        });
    }

    /// Notify that the wallet reset finished
    pub fn wallet_reset(&self) {
        self.emit(SyncEvent::WalletReset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_emit_reaches_subscriber() {
        let bus = EventBus::with_default_capacity();
        let mut rx = bus.subscribe();

        bus.emit(SyncEvent::ProgressChanged { fraction: 0.25 });

        let event = rx.recv().await.unwrap();
        assert_eq!(event, SyncEvent::ProgressChanged { fraction: 0.25 });
    }

    #[tokio::test]
    async fn test_emit_without_subscribers_is_dropped() {
        let bus = EventBus::new(8);
        // Must not panic or error.
        bus.emit(SyncEvent::SyncCompleted);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_emitter_convenience_methods() {
        let bus = EventBus::with_default_capacity();
        let mut rx = bus.subscribe();
        let emitter = bus.emitter();

        emitter.message_changed("Downloading blocks");
        emitter.sync_completed();

        assert_eq!(
            rx.recv().await.unwrap(),
            SyncEvent::MessageChanged {
                message: "Downloading blocks".to_string()
            }
        );
        assert_eq!(rx.recv().await.unwrap(), SyncEvent::SyncCompleted);
    }

    #[tokio::test]
    async fn test_all_subscribers_receive_each_event() {
        let bus = EventBus::with_default_capacity();
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.emit(SyncEvent::WalletReset);

        assert_eq!(rx1.recv().await.unwrap(), SyncEvent::WalletReset);
        assert_eq!(rx2.recv().await.unwrap(), SyncEvent::WalletReset);
    }
}
