//! Input and event types for the discovery state machine.

use crate::{ApsDataConfirm, ApsDataIndication, TimerId};
use meshscout_messages::MatchDescriptorResponse;
use meshscout_types::ApsAddress;

/// Priority levels for input ordering within the same timestamp.
///
/// Lower values = higher priority (processed first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum EventPriority {
    /// Timer expiry: scheduled by the node itself.
    Timer = 0,

    /// Network callbacks: confirmations and indications.
    Network = 1,
}

/// Everything the host can deliver to the plugin.
///
/// This is the raw, unfiltered stream: indications for every profile and
/// confirmations for every request on the shared APS channel.
#[derive(Debug, Clone)]
pub enum HostInput {
    /// The armed timer expired.
    TimerFired(TimerId),

    /// `APSDE-DATA.confirm` for some request.
    DeliveryConfirm(ApsDataConfirm),

    /// `APSDE-DATA.indication` for some inbound frame.
    Indication(ApsDataIndication),
}

impl HostInput {
    /// Get the priority of this input for ordering.
    pub fn priority(&self) -> EventPriority {
        match self {
            HostInput::TimerFired(_) => EventPriority::Timer,
            HostInput::DeliveryConfirm(_) | HostInput::Indication(_) => EventPriority::Network,
        }
    }

    /// Get a human-readable name for this input type.
    pub fn type_name(&self) -> &'static str {
        match self {
            HostInput::TimerFired(_) => "TimerFired",
            HostInput::DeliveryConfirm(_) => "DeliveryConfirm",
            HostInput::Indication(_) => "Indication",
        }
    }
}

/// Events processed by the discovery state machine.
///
/// Events are **passive data** - they describe something that happened.
/// Indications have already been filtered and decoded by the plugin.
#[derive(Debug, Clone)]
pub enum Event {
    /// The armed timer expired.
    Timeout { timer: TimerId },

    /// A delivery confirmation arrived. It may belong to another consumer
    /// of the APS channel; the state machine correlates it.
    DeliveryConfirmed { confirm: ApsDataConfirm },

    /// A decoded Match_Descr_rsp arrived. Not yet correlated.
    MatchDescriptorResponse {
        source: ApsAddress,
        response: MatchDescriptorResponse,
    },
}

impl Event {
    /// Get a human-readable name for this event type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Event::Timeout { .. } => "Timeout",
            Event::DeliveryConfirmed { .. } => "DeliveryConfirmed",
            Event::MatchDescriptorResponse { .. } => "MatchDescriptorResponse",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshscout_types::{ApsStatus, DeliveryId};

    #[test]
    fn test_timer_inputs_before_network_inputs() {
        let timer = HostInput::TimerFired(TimerId::IdleHold);
        let confirm = HostInput::DeliveryConfirm(ApsDataConfirm {
            id: DeliveryId(1),
            status: ApsStatus::SUCCESS,
        });
        assert!(timer.priority() < confirm.priority());
        assert_eq!(confirm.type_name(), "DeliveryConfirm");
    }
}
