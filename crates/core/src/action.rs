//! Action types returned by the discovery state machine.

use crate::TimerId;
use meshscout_types::{ApsAddress, Endpoint, NwkAddress, TransactionSeq};
use std::time::Duration;

/// Actions the runner must perform after an event was handled.
///
/// Actions are **commands** - the state machine decides, the runner executes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Arm the timer slot. Replaces whatever timer was armed.
    SetTimer { id: TimerId, duration: Duration },

    /// A device reported matching endpoints for the current transaction.
    EmitMatch(MatchReport),
}

impl Action {
    /// Get a human-readable name for this action type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Action::SetTimer { .. } => "SetTimer",
            Action::EmitMatch(_) => "EmitMatch",
        }
    }
}

/// A successful Match_Descr_rsp, correlated with our request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchReport {
    /// Transaction the response belongs to.
    pub seq: TransactionSeq,
    /// Device that answered.
    pub source: ApsAddress,
    /// Node the matched endpoints live on, if the response carried it.
    pub nwk_addr_of_interest: Option<NwkAddress>,
    /// Endpoints offering the requested cluster.
    pub endpoints: Vec<Endpoint>,
    /// Logical time the response was handled.
    pub received_at: Duration,
}
