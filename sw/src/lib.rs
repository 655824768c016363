//! SyncWatch - progress, ETA and error tracking for wallet synchronization
//!
//! SyncWatch watches a two-phase background synchronization - a block
//! download reported by the local node, then a UTXO scan reported by the
//! wallet - and turns raw done/total counters into a monotonically
//! increasing progress fraction, a smoothed time-remaining estimate and a
//! classified error signal. It performs no I/O of its own: sources are
//! injected as channels and every observable change goes out on a
//! broadcast bus.
//!
//! # Modules
//!
//! - [`progress`] - phase selection, ETA estimation, monotonic gauge
//! - [`classify`] - connectivity fault taxonomy and classification
//! - [`monitor`] - the actor wiring sources to notifications
//! - [`events`] - outbound event types and the broadcast bus
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod classify;
pub mod cli;
pub mod config;
pub mod events;
pub mod monitor;
pub mod progress;

// Re-export commonly used types
pub use classify::{Classification, ConnectivityError, ErrorCategory, classify};
pub use config::{ChannelConfig, Config, LogConfig, NodeConfig, TextConfig};
pub use events::{DEFAULT_EVENT_CAPACITY, EventBus, EventEmitter, SyncEvent};
pub use monitor::{
    ConnectivityFault, MonitorCommand, MonitorError, ProgressUpdate, SourceSenders, SourceStreams, SyncMonitor,
    source_channels,
};
pub use progress::{
    Advance, EstimateState, MAX_ESTIMATE_SECS, Phase, PhaseCounters, PhaseSelection, ProgressGauge, eta_text,
    select_phase,
};
