//! Progress pipeline: phase selection, ETA estimation, monotonic gauge.
//!
//! Raw (done, total) counters flow through three steps:
//!
//! 1. [`select_phase`] decides which phase is on display and its raw
//!    fraction.
//! 2. [`EstimateState::advance`] turns an accepted fraction change plus the
//!    elapsed wall time into a smoothed time-remaining projection.
//! 3. [`ProgressGauge`] ratchets the displayed fraction forward and
//!    de-duplicates message updates.
//!
//! All three are synchronous and free of side effects; the monitor actor
//! composes them and publishes the resulting notifications.

mod estimate;
mod phase;
mod ratchet;

pub use estimate::{Advance, EstimateState, MAX_ESTIMATE_SECS, eta_text};
pub use phase::{Phase, PhaseCounters, PhaseSelection, select_phase};
pub use ratchet::ProgressGauge;
