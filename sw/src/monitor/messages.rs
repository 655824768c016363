//! Monitor messages
//!
//! Payloads delivered by the external sources and the control commands
//! accepted through the handle.

use thiserror::Error;

use crate::classify::ConnectivityError;

/// One (done, total) sample from a progress source
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub done: u64,
    pub total: u64,
}

impl ProgressUpdate {
    pub fn new(done: u64, total: u64) -> Self {
        Self { done, total }
    }
}

/// A fault delivered by the connectivity source
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectivityFault {
    pub kind: ConnectivityError,
    /// Human description from the source, passed through unmodified
    pub description: String,
}

impl ConnectivityFault {
    pub fn new(kind: ConnectivityError, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }
}

/// Control commands sent through the monitor handle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonitorCommand {
    /// Detach from the current sources and wait for the reset signal
    Reset,
    /// Stop the actor without touching the sources
    Shutdown,
}

/// Errors from monitor handle operations
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("monitor channel closed")]
    ChannelClosed,
}
