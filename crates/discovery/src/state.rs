//! Discovery state machine.
//!
//! Broadcasts a Match_Descr_req for On/Off lights, waits for the responses
//! and starts over, forever:
//!
//! ```text
//!            Timeout / request accepted
//!   ┌──────┐ ───────────────────────────▶ ┌────────────────────┐
//!   │ Idle │                              │ WaitingForResponse │
//!   └──────┘ ◀─────────────────────────── └────────────────────┘
//!      ▲  │   Timeout | SendFailed | matching success response
//!      └──┘
//!   Timeout / not joined or rejected
//! ```
//!
//! Every path back to `Idle` arms the idle hold timer, so failures heal
//! through the next cycle.

use crate::{DiscoveryConfig, PendingRequest, RequestQueue, TransactionSequencer};
use meshscout_core::{
    Action, ApsDataConfirm, ApsDataRequest, Event, MatchReport, NetworkBoundary, StateMachine,
    SubmitError, TimerId,
};
use meshscout_messages::{encode_request, MatchDescriptorResponse};
use meshscout_types::{ApsAddress, ClusterId, TransactionSeq};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, trace, warn};

/// Phase of the discovery cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscoveryPhase {
    /// Holding before the next request.
    Idle,
    /// A request was accepted; collecting responses.
    WaitingForResponse,
}

impl fmt::Display for DiscoveryPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryPhase::Idle => write!(f, "Idle"),
            DiscoveryPhase::WaitingForResponse => write!(f, "WaitingForResponse"),
        }
    }
}

/// Transition triggers of the discovery cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryEvent {
    /// The armed timer expired.
    Timeout,
    /// Our request was confirmed as delivered.
    SendDone,
    /// Our request was confirmed as failed.
    SendFailed,
}

/// Match descriptor discovery state machine.
///
/// Owns the current transaction, the queue of unconfirmed requests and the
/// injected network boundary. Single-threaded: the runner feeds events one
/// at a time.
pub struct DiscoveryState<B> {
    /// Timer durations.
    config: DiscoveryConfig,

    /// Outbound half of the APS layer.
    boundary: B,

    /// Current phase.
    phase: DiscoveryPhase,

    /// Sequence number of the outstanding transaction.
    sequencer: TransactionSequencer,

    /// Submitted requests awaiting confirmation.
    queue: RequestQueue,

    /// Current logical time.
    now: Duration,
}

impl<B: NetworkBoundary> DiscoveryState<B> {
    /// Create a new state machine in `Idle`.
    ///
    /// `seed` initialises the transaction sequence generator.
    pub fn new(config: DiscoveryConfig, boundary: B, seed: u64) -> Self {
        Self {
            config,
            boundary,
            phase: DiscoveryPhase::Idle,
            sequencer: TransactionSequencer::from_seed(seed),
            queue: RequestQueue::new(),
            now: Duration::ZERO,
        }
    }

    /// Kick off the cycle: arm the start-up timer.
    pub fn start(&mut self) -> Vec<Action> {
        debug!(delay = ?self.config.startup_delay, "Starting match descriptor discovery");
        vec![Action::SetTimer {
            id: TimerId::Startup,
            duration: self.config.startup_delay,
        }]
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════════════

    /// Get the current phase.
    pub fn phase(&self) -> DiscoveryPhase {
        self.phase
    }

    /// Sequence number of the current (or last) transaction.
    pub fn current_seq(&self) -> Option<TransactionSeq> {
        self.sequencer.current()
    }

    /// Number of submitted requests not yet confirmed.
    pub fn pending_requests(&self) -> usize {
        self.queue.len()
    }

    /// Get the network boundary.
    pub fn boundary(&self) -> &B {
        &self.boundary
    }

    /// Get the network boundary mutably.
    pub fn boundary_mut(&mut self) -> &mut B {
        &mut self.boundary
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // Transitions
    // ═══════════════════════════════════════════════════════════════════════════

    /// Apply one transition trigger.
    pub fn on_event(&mut self, event: DiscoveryEvent) -> Vec<Action> {
        match (self.phase, event) {
            (DiscoveryPhase::Idle, DiscoveryEvent::Timeout) => self.begin_cycle(),

            (DiscoveryPhase::Idle, _) => {
                trace!(?event, "Ignoring event in idle");
                vec![]
            }

            (DiscoveryPhase::WaitingForResponse, DiscoveryEvent::SendDone) => {
                // Keep waiting; the response window is not extended.
                info!(seq = ?self.current_seq(), "Match descriptor request delivered");
                vec![]
            }

            (DiscoveryPhase::WaitingForResponse, DiscoveryEvent::SendFailed) => {
                info!(seq = ?self.current_seq(), "Match descriptor request failed");
                self.set_phase(DiscoveryPhase::Idle);
                vec![self.arm_idle_timer()]
            }

            (DiscoveryPhase::WaitingForResponse, DiscoveryEvent::Timeout) => {
                info!(
                    seq = ?self.current_seq(),
                    "Stop waiting for match descriptor responses"
                );
                self.set_phase(DiscoveryPhase::Idle);
                vec![self.arm_idle_timer()]
            }
        }
    }

    /// Start a new discovery cycle from `Idle`.
    fn begin_cycle(&mut self) -> Vec<Action> {
        // Entries of an abandoned cycle can no longer be confirmed usefully.
        self.queue.clear();

        match self.send_match_descriptor_request() {
            Ok(seq) => {
                info!(seq = seq.0, "Sent match descriptor request");
                self.set_phase(DiscoveryPhase::WaitingForResponse);
                vec![Action::SetTimer {
                    id: TimerId::ResponseWindow,
                    duration: self.config.wait_response_timeout,
                }]
            }
            Err(SubmitError::NotJoined) => {
                debug!("Not joined to a network, retrying later");
                vec![self.arm_idle_timer()]
            }
            Err(e) => {
                warn!(error = %e, "Match descriptor request not accepted, retrying later");
                vec![self.arm_idle_timer()]
            }
        }
    }

    /// Build and submit a Match_Descr_req for On/Off lights.
    ///
    /// A fresh transaction sequence is only drawn when the device is joined.
    fn send_match_descriptor_request(&mut self) -> Result<TransactionSeq, SubmitError> {
        debug_assert_eq!(self.phase, DiscoveryPhase::Idle);

        if !self.boundary.is_joined() {
            return Err(SubmitError::NotJoined);
        }

        let seq = self.sequencer.next();
        let request =
            ApsDataRequest::zdp_broadcast(ClusterId::MATCH_DESCRIPTOR_REQUEST, encode_request(seq));
        let id = self.boundary.submit(&request)?;

        trace!(seq = seq.0, delivery_id = %id, "Match descriptor request queued");
        self.queue.push(PendingRequest { id, request });
        Ok(seq)
    }

    /// Correlate a delivery confirmation with our queue.
    fn on_delivery_confirmed(&mut self, confirm: ApsDataConfirm) -> Vec<Action> {
        let Some(pending) = self.queue.take_matching(confirm.id) else {
            trace!(delivery_id = %confirm.id, "Ignoring confirmation for foreign request");
            return vec![];
        };

        if confirm.status.is_success() {
            self.on_event(DiscoveryEvent::SendDone)
        } else {
            info!(
                delivery_id = %pending.id,
                status = %confirm.status,
                "APS-DATA.confirm failed"
            );
            self.on_event(DiscoveryEvent::SendFailed)
        }
    }

    /// Handle a decoded Match_Descr_rsp.
    fn on_match_response(
        &mut self,
        source: ApsAddress,
        response: MatchDescriptorResponse,
    ) -> Vec<Action> {
        if !self.sequencer.matches(response.seq) {
            trace!(
                seq = response.seq.0,
                current = ?self.current_seq(),
                "Ignoring match descriptor response for another transaction"
            );
            return vec![];
        }

        info!(
            seq = response.seq.0,
            source = %source,
            "Received match descriptor response"
        );

        if !response.is_success() {
            debug!(status = %response.status, "Match descriptor response reports failure");
            return vec![];
        }

        for endpoint in &response.endpoints {
            info!(endpoint = %endpoint, "Match descriptor endpoint");
        }

        let mut actions = vec![Action::EmitMatch(MatchReport {
            seq: response.seq,
            source,
            nwk_addr_of_interest: response.nwk_addr_of_interest,
            endpoints: response.endpoints,
            received_at: self.now,
        })];

        // Late answers after the wait ended are reported but change nothing.
        if self.phase == DiscoveryPhase::WaitingForResponse {
            self.set_phase(DiscoveryPhase::Idle);
            actions.push(self.arm_idle_timer());
        }

        actions
    }

    fn arm_idle_timer(&self) -> Action {
        Action::SetTimer {
            id: TimerId::IdleHold,
            duration: self.config.idle_timeout,
        }
    }

    fn set_phase(&mut self, phase: DiscoveryPhase) {
        if self.phase != phase {
            debug!(from = %self.phase, to = %phase, "Discovery phase change");
            self.phase = phase;
        }
    }
}

impl<B: NetworkBoundary> StateMachine for DiscoveryState<B> {
    fn handle(&mut self, event: Event) -> Vec<Action> {
        match event {
            Event::Timeout { timer } => {
                trace!(%timer, phase = %self.phase, "Timer fired");
                self.on_event(DiscoveryEvent::Timeout)
            }
            Event::DeliveryConfirmed { confirm } => self.on_delivery_confirmed(confirm),
            Event::MatchDescriptorResponse { source, response } => {
                self.on_match_response(source, response)
            }
        }
    }

    fn set_time(&mut self, now: Duration) {
        self.now = now;
    }

    fn now(&self) -> Duration {
        self.now
    }
}
