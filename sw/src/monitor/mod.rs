//! Monitor actor: composes the progress pipeline over the event sources.
//!
//! One spawned task owns every piece of mutable state (counters, gauge,
//! estimate, mode flag) and processes source events strictly one at a
//! time, so no handler ever observes another handler mid-update. The
//! handle exposes subscription plus the reset/shutdown controls.

mod manager;
mod messages;

pub use manager::{SourceSenders, SourceStreams, SyncMonitor, source_channels};
pub use messages::{ConnectivityFault, MonitorCommand, MonitorError, ProgressUpdate};
