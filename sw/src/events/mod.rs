//! Event system: outbound notification types and the broadcast bus.
//!
//! The monitor publishes every observable change here - progress, message,
//! completion, classified errors, reset. Consumers subscribe to the bus;
//! nothing is delivered by callback and nothing is polled.

mod bus;
mod types;

pub use bus::{DEFAULT_EVENT_CAPACITY, EventBus, EventEmitter};
pub use types::SyncEvent;
