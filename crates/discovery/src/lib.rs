//! Match descriptor discovery state machine.
//!
//! This crate provides a synchronous request/response correlation engine
//! that periodically broadcasts a ZDP Match_Descr_req and collects the
//! answers.
//!
//! # Architecture
//!
//! The state machine processes events synchronously:
//!
//! - `Event::Timeout` in `Idle` → Broadcast a new request, wait for responses
//! - `Event::Timeout` in `WaitingForResponse` → Stop waiting, back to idle
//! - `Event::DeliveryConfirmed` → Correlate with the request queue, then
//!   `SendDone` (keep waiting) or `SendFailed` (back to idle)
//! - `Event::MatchDescriptorResponse` → Correlate by transaction sequence,
//!   report the match, end the wait
//!
//! Submission goes through the injected [`NetworkBoundary`]; everything
//! else the runner performs via returned `Action`s.
//!
//! [`NetworkBoundary`]: meshscout_core::NetworkBoundary

mod config;
mod queue;
mod sequencer;
mod state;

pub use config::{DiscoveryConfig, IDLE_TIMEOUT_MS, STARTUP_DELAY_MS, WAIT_RESPONSE_TIMEOUT_MS};
pub use queue::{PendingRequest, RequestQueue};
pub use sequencer::TransactionSequencer;
pub use state::{DiscoveryEvent, DiscoveryPhase, DiscoveryState};
