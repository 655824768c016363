//! Phase selection for the two-stage synchronization pipeline.
//!
//! Synchronization runs as a block download (reported by the node) followed
//! by a UTXO scan (reported by the wallet). Both sources update their
//! counters independently and in any order; selection looks only at the
//! latest counters of each.

use serde::{Deserialize, Serialize};

/// Raw done/total counters reported by one progress source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseCounters {
    pub done: u64,
    pub total: u64,
}

impl PhaseCounters {
    /// Create counters from one (done, total) sample.
    pub fn new(done: u64, total: u64) -> Self {
        Self { done, total }
    }

    /// done/total clamped to [0, 1]. A zero total reads as no progress.
    pub fn fraction(&self) -> f64 {
        if self.total > 0 {
            (self.done as f64 / self.total as f64).min(1.0)
        } else {
            0.0
        }
    }

    /// Whether the phase has nothing left to report.
    pub fn is_complete(&self) -> bool {
        self.done >= self.total
    }
}

/// The synchronization stage currently shown to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Block-level download from the local node.
    Downloading,
    /// Unit-level reconciliation of unspent outputs.
    Scanning,
}

/// Result of picking the active phase from the latest counters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseSelection {
    pub phase: Phase,
    /// Fraction for the active phase, clamped to [0, 1].
    pub raw_fraction: f64,
    /// Set once the scan counters report done >= total.
    pub is_terminal: bool,
}

/// Pick the phase to display and its raw fraction.
///
/// The download phase stays active while a local node is configured and its
/// counters are absent or unfinished; otherwise the scan phase is shown.
/// Completion is a property of the scan phase only - the caller latches the
/// terminal flag into its completed-once notification.
pub fn select_phase(has_local_node: bool, node: &PhaseCounters, scan: &PhaseCounters) -> PhaseSelection {
    if has_local_node && (node.total == 0 || node.done < node.total) {
        PhaseSelection {
            phase: Phase::Downloading,
            raw_fraction: node.fraction(),
            is_terminal: false,
        }
    } else {
        PhaseSelection {
            phase: Phase::Scanning,
            raw_fraction: scan.fraction(),
            is_terminal: scan.is_complete(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downloading_while_node_unfinished() {
        let selection = select_phase(true, &PhaseCounters::new(5, 10), &PhaseCounters::new(0, 0));
        assert_eq!(selection.phase, Phase::Downloading);
        assert_eq!(selection.raw_fraction, 0.5);
        assert!(!selection.is_terminal);
    }

    #[test]
    fn test_downloading_before_node_reports_totals() {
        // No node counters yet: download phase with zero fraction.
        let selection = select_phase(true, &PhaseCounters::default(), &PhaseCounters::new(3, 10));
        assert_eq!(selection.phase, Phase::Downloading);
        assert_eq!(selection.raw_fraction, 0.0);
        assert!(!selection.is_terminal);
    }

    #[test]
    fn test_switches_to_scanning_when_node_done() {
        let selection = select_phase(true, &PhaseCounters::new(10, 10), &PhaseCounters::new(3, 10));
        assert_eq!(selection.phase, Phase::Scanning);
        assert_eq!(selection.raw_fraction, 0.3);
        assert!(!selection.is_terminal);
    }

    #[test]
    fn test_scanning_without_local_node() {
        let selection = select_phase(false, &PhaseCounters::new(1, 10), &PhaseCounters::new(4, 10));
        assert_eq!(selection.phase, Phase::Scanning);
        assert_eq!(selection.raw_fraction, 0.4);
    }

    #[test]
    fn test_terminal_when_scan_complete() {
        let selection = select_phase(true, &PhaseCounters::new(10, 10), &PhaseCounters::new(10, 10));
        assert_eq!(selection.phase, Phase::Scanning);
        assert_eq!(selection.raw_fraction, 1.0);
        assert!(selection.is_terminal);
    }

    #[test]
    fn test_fraction_clamped_to_one() {
        // A source may overshoot its own total; the fraction never does.
        let counters = PhaseCounters::new(15, 10);
        assert_eq!(counters.fraction(), 1.0);
    }

    #[test]
    fn test_zero_total_reads_as_no_progress() {
        assert_eq!(PhaseCounters::new(0, 0).fraction(), 0.0);
        assert!(PhaseCounters::new(0, 0).is_complete());
    }
}
