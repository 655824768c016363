//! SyncMonitor - actor that owns the progress pipeline state
//!
//! The actor consumes the four source streams one event at a time, runs
//! each sample through phase selection, estimation and the ratchet gauge,
//! and publishes the resulting notifications on the event bus. All state
//! lives inside the actor; the handle only carries channels.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use crate::classify::{Classification, classify};
use crate::config::{Config, TextConfig};
use crate::events::{EventBus, EventEmitter, SyncEvent};
use crate::progress::{
    Advance, EstimateState, Phase, PhaseCounters, PhaseSelection, ProgressGauge, eta_text, select_phase,
};

use super::messages::{ConnectivityFault, MonitorCommand, MonitorError, ProgressUpdate};

/// Receivers for the externally owned notification sources
///
/// Injected at spawn so the monitor can be driven by fakes in tests; the
/// actor never reaches for process-global state.
pub struct SourceStreams {
    pub node: mpsc::Receiver<ProgressUpdate>,
    pub scan: mpsc::Receiver<ProgressUpdate>,
    pub connectivity: mpsc::Receiver<ConnectivityFault>,
    pub mode: mpsc::Receiver<bool>,
    pub reset_completed: mpsc::Receiver<()>,
}

/// Senders handed to the external sources
pub struct SourceSenders {
    pub node: mpsc::Sender<ProgressUpdate>,
    pub scan: mpsc::Sender<ProgressUpdate>,
    pub connectivity: mpsc::Sender<ConnectivityFault>,
    pub mode: mpsc::Sender<bool>,
    pub reset_completed: mpsc::Sender<()>,
}

/// Create the source channel pairs with the given per-channel capacity
pub fn source_channels(capacity: usize) -> (SourceSenders, SourceStreams) {
    let (node_tx, node_rx) = mpsc::channel(capacity);
    let (scan_tx, scan_rx) = mpsc::channel(capacity);
    let (connectivity_tx, connectivity_rx) = mpsc::channel(capacity);
    let (mode_tx, mode_rx) = mpsc::channel(capacity);
    let (reset_tx, reset_rx) = mpsc::channel(capacity);
    (
        SourceSenders {
            node: node_tx,
            scan: scan_tx,
            connectivity: connectivity_tx,
            mode: mode_tx,
            reset_completed: reset_tx,
        },
        SourceStreams {
            node: node_rx,
            scan: scan_rx,
            connectivity: connectivity_rx,
            mode: mode_rx,
            reset_completed: reset_rx,
        },
    )
}

/// Handle to a spawned monitor
#[derive(Clone)]
pub struct SyncMonitor {
    tx: mpsc::Sender<MonitorCommand>,
    bus: Arc<EventBus>,
}

impl SyncMonitor {
    /// Spawn the monitor actor over the given sources
    pub fn spawn(config: Config, sources: SourceStreams) -> Self {
        let bus = Arc::new(EventBus::new(config.channels.event_capacity));
        let (tx, rx) = mpsc::channel(config.channels.command_capacity);

        let actor = Actor {
            emitter: bus.emitter(),
            run_local_node: config.node.run_local_node,
            creating: false,
            node: PhaseCounters::default(),
            scan: PhaseCounters::default(),
            gauge: ProgressGauge::new(),
            estimate: EstimateState::new(Utc::now()),
            eta: None,
            completed: false,
            text: config.text,
        };

        tokio::spawn(actor_loop(actor, sources, rx));

        info!(run_local_node = config.node.run_local_node, "SyncMonitor spawned");
        Self { tx, bus }
    }

    /// Subscribe to the monitor's notifications
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.bus.subscribe()
    }

    /// Detach from the sources and wait for the external reset signal
    ///
    /// Source events already in flight are dropped, never processed. The
    /// actor stays quiescent until the reset-completed signal arrives, then
    /// publishes the wallet-reset notification and stops; a fresh monitor
    /// is expected to be spawned for the next attempt.
    pub async fn reset(&self) -> Result<(), MonitorError> {
        debug!("reset: called");
        self.tx
            .send(MonitorCommand::Reset)
            .await
            .map_err(|_| MonitorError::ChannelClosed)
    }

    /// Stop the actor
    pub async fn shutdown(&self) -> Result<(), MonitorError> {
        debug!("shutdown: called");
        self.tx
            .send(MonitorCommand::Shutdown)
            .await
            .map_err(|_| MonitorError::ChannelClosed)
    }
}

/// State owned exclusively by the actor task
struct Actor {
    emitter: EventEmitter,
    run_local_node: bool,
    creating: bool,
    node: PhaseCounters,
    scan: PhaseCounters,
    gauge: ProgressGauge,
    estimate: EstimateState,
    /// Rendered estimate fragment, reused while the fraction stalls
    eta: Option<String>,
    completed: bool,
    text: TextConfig,
}

impl Actor {
    /// Re-run the pipeline over the current counters and publish changes
    fn refresh_progress(&mut self, now: DateTime<Utc>) {
        let selection = select_phase(self.run_local_node, &self.node, &self.scan);

        if let Advance::Accepted { estimate_secs } =
            self.estimate.advance(self.gauge.fraction(), selection.raw_fraction, now)
        {
            let rendered = eta_text(estimate_secs, &self.text.minutes_unit, &self.text.seconds_unit);
            self.eta = Some(self.text.render_estimate(&rendered));
        }

        let message = self.compose_message(&selection);
        if self.gauge.set_message(message) {
            self.emitter.message_changed(self.gauge.message());
        }
        if self.gauge.set_fraction(selection.raw_fraction) {
            self.emitter.progress_changed(self.gauge.fraction());
        }

        if selection.is_terminal && !self.completed {
            self.completed = true;
            info!(fraction = self.gauge.fraction(), "sync completed");
            self.emitter.sync_completed();
        }
    }

    /// Phase label, then percentage and estimate once there is progress
    fn compose_message(&self, selection: &PhaseSelection) -> String {
        let mut message = match selection.phase {
            Phase::Downloading => self.text.downloading_label.clone(),
            Phase::Scanning if !selection.is_terminal => self.text.render_scanning(self.scan.done, self.scan.total),
            Phase::Scanning => String::new(),
        };

        if selection.raw_fraction > 0.0 {
            message.push_str(&format!(" {:.2}%", selection.raw_fraction * 100.0));
            if let Some(eta) = &self.eta {
                message.push(' ');
                message.push_str(eta);
            }
        }
        message
    }

    fn handle_fault(&mut self, fault: ConnectivityFault, now: DateTime<Utc>) {
        match classify(self.creating, fault.kind) {
            Classification::Report(category) => {
                warn!(kind = ?fault.kind, category = ?category, "connectivity fault reported");
                self.emitter.error_raised(category, &fault.description);
            }
            Classification::DegradedCompletion => {
                // The wallet still opens; the caller decides what "ready
                // with errors" looks like.
                warn!(kind = ?fault.kind, description = %fault.description, "unhandled fault, finishing in degraded state");
                self.refresh_progress(now);
                self.emitter.sync_completed_with_error();
            }
        }
    }
}

/// The actor loop that owns the state and drains the sources
///
/// Events are handled one at a time in arrival order per source; there is
/// no ordering guarantee between sources. After a reset request the source
/// branches are disabled, so stale events are dropped rather than applied.
async fn actor_loop(mut actor: Actor, mut sources: SourceStreams, mut rx: mpsc::Receiver<MonitorCommand>) {
    debug!("monitor actor started");
    let mut detached = false;

    loop {
        tokio::select! {
            cmd = rx.recv() => {
                match cmd {
                    Some(MonitorCommand::Reset) => {
                        info!("reset requested, detaching sources");
                        detached = true;
                    }
                    Some(MonitorCommand::Shutdown) | None => {
                        debug!("monitor shutting down");
                        break;
                    }
                }
            }
            Some(update) = sources.node.recv(), if !detached => {
                debug!(done = update.done, total = update.total, "node progress");
                actor.node = PhaseCounters::new(update.done, update.total);
                actor.refresh_progress(Utc::now());
            }
            Some(update) = sources.scan.recv(), if !detached => {
                debug!(done = update.done, total = update.total, "scan progress");
                actor.scan = PhaseCounters::new(update.done, update.total);
                actor.refresh_progress(Utc::now());
            }
            Some(fault) = sources.connectivity.recv(), if !detached => {
                actor.handle_fault(fault, Utc::now());
            }
            Some(creating) = sources.mode.recv(), if !detached => {
                debug!(creating, "mode changed");
                actor.creating = creating;
            }
            Some(()) = sources.reset_completed.recv(), if detached => {
                info!("reset completed");
                actor.emitter.wallet_reset();
                break;
            }
        }
    }

    debug!("monitor actor stopped");
}
