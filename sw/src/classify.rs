//! Connectivity fault taxonomy and mode-aware classification.
//!
//! Faults arrive from the connectivity source as codes from a closed set.
//! How a code is handled depends on whether the wallet is being created or
//! merely reopened: creation reports everything to the user, while normal
//! mode lets most faults fall through to a degraded completion so the
//! wallet still opens instead of hanging on the loading screen.

use serde::{Deserialize, Serialize};

/// Error codes delivered by the connectivity source. Closed set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectivityError {
    /// The peer speaks an incompatible protocol version.
    ProtocolIncompatible,
    /// The local listen address is already taken.
    AddrInUse,
    ConnectionRefused,
    HostResolveFailed,
    ConnectionTimedOut,
    HostUnreachable,
    /// The local clock disagrees with the network.
    TimeOutOfSync,
    /// The embedded node failed to start.
    NodeStartFailed,
}

/// Severity bucket attached to a reported fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// The peer cannot be talked to at all; the attempt needs a different
    /// peer set to continue.
    FatalPeerIncompatible,
    /// Transient connection trouble, shown to the user without ending the
    /// attempt.
    ConnectionError,
    /// No explicit mapping for this code; surfaced rather than dropped.
    Unclassified,
}

impl ErrorCategory {
    /// Short human-readable label for the category.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorCategory::FatalPeerIncompatible => "Incompatible peer",
            ErrorCategory::ConnectionError => "Connection error",
            ErrorCategory::Unclassified => "Unexpected error",
        }
    }
}

/// What the monitor should do with a classified fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    /// Report the fault under the given category and keep the attempt going.
    Report(ErrorCategory),
    /// Recompute progress from the current counters and finish the attempt
    /// in an erroneous-but-ready state.
    DegradedCompletion,
}

/// Map a fault code to an outcome under the current mode flag.
///
/// During wallet creation every code classifies: codes without an explicit
/// rule surface as [`ErrorCategory::Unclassified`] instead of terminating
/// the process. In normal mode only the address-in-use case is worth
/// reporting; everything else falls through to a degraded completion.
pub fn classify(creating: bool, kind: ConnectivityError) -> Classification {
    if creating {
        let category = match kind {
            ConnectivityError::ProtocolIncompatible => ErrorCategory::FatalPeerIncompatible,
            ConnectivityError::AddrInUse
            | ConnectivityError::ConnectionRefused
            | ConnectivityError::HostResolveFailed => ErrorCategory::ConnectionError,
            _ => ErrorCategory::Unclassified,
        };
        return Classification::Report(category);
    }

    match kind {
        ConnectivityError::AddrInUse => Classification::Report(ErrorCategory::ConnectionError),
        _ => Classification::DegradedCompletion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [ConnectivityError; 8] = [
        ConnectivityError::ProtocolIncompatible,
        ConnectivityError::AddrInUse,
        ConnectivityError::ConnectionRefused,
        ConnectivityError::HostResolveFailed,
        ConnectivityError::ConnectionTimedOut,
        ConnectivityError::HostUnreachable,
        ConnectivityError::TimeOutOfSync,
        ConnectivityError::NodeStartFailed,
    ];

    #[test]
    fn test_creating_protocol_incompatible_is_fatal() {
        assert_eq!(
            classify(true, ConnectivityError::ProtocolIncompatible),
            Classification::Report(ErrorCategory::FatalPeerIncompatible)
        );
    }

    #[test]
    fn test_creating_connection_refused_is_connection_error() {
        assert_eq!(
            classify(true, ConnectivityError::ConnectionRefused),
            Classification::Report(ErrorCategory::ConnectionError)
        );
    }

    #[test]
    fn test_creating_unmapped_codes_surface_as_unclassified() {
        for kind in [
            ConnectivityError::ConnectionTimedOut,
            ConnectivityError::HostUnreachable,
            ConnectivityError::TimeOutOfSync,
            ConnectivityError::NodeStartFailed,
        ] {
            assert_eq!(
                classify(true, kind),
                Classification::Report(ErrorCategory::Unclassified),
                "kind {:?} must surface, not abort",
                kind
            );
        }
    }

    #[test]
    fn test_normal_addr_in_use_is_reported() {
        assert_eq!(
            classify(false, ConnectivityError::AddrInUse),
            Classification::Report(ErrorCategory::ConnectionError)
        );
    }

    #[test]
    fn test_normal_mode_falls_through_to_degraded_completion() {
        assert_eq!(
            classify(false, ConnectivityError::ProtocolIncompatible),
            Classification::DegradedCompletion
        );
    }

    #[test]
    fn test_every_kind_classifies_in_both_modes() {
        for kind in ALL_KINDS {
            for creating in [true, false] {
                // The match is exhaustive; this pins that no code path can
                // reach an abort for any member of the closed set.
                let _ = classify(creating, kind);
            }
        }
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(ErrorCategory::FatalPeerIncompatible.label(), "Incompatible peer");
        assert_eq!(ErrorCategory::ConnectionError.label(), "Connection error");
        assert_eq!(ErrorCategory::Unclassified.label(), "Unexpected error");
    }
}
