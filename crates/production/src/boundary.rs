//! Channel-backed network boundary for the async runner.

use meshscout_core::{ApsDataRequest, NetworkBoundary, SubmitError};
use meshscout_types::DeliveryId;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::trace;

/// A frame handed to the network driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundFrame {
    /// Id the driver must echo in the confirmation.
    pub id: DeliveryId,
    /// The request to transmit.
    pub request: ApsDataRequest,
}

/// Join state shared between the driver and the boundary.
#[derive(Debug, Clone, Default)]
pub struct JoinState(Arc<AtomicBool>);

impl JoinState {
    /// Update the join state.
    pub fn set(&self, joined: bool) {
        self.0.store(joined, Ordering::Release);
    }

    /// Current join state.
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// [`NetworkBoundary`] that queues frames on a bounded channel.
///
/// The driver on the other end transmits each [`OutboundFrame`] and later
/// reports the outcome through [`HostHandle::deliver_confirm`](crate::HostHandle::deliver_confirm).
/// A full channel is reported as [`SubmitError::Busy`]; a driver that went
/// away is treated as leaving the network.
#[derive(Debug)]
pub struct ChannelBoundary {
    joined: JoinState,
    tx: mpsc::Sender<OutboundFrame>,
    next_id: u8,
}

impl ChannelBoundary {
    /// Create a boundary with room for `capacity` untransmitted frames.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<OutboundFrame>, JoinState) {
        let (tx, rx) = mpsc::channel(capacity);
        let joined = JoinState::default();
        let boundary = Self {
            joined: joined.clone(),
            tx,
            next_id: 0,
        };
        (boundary, rx, joined)
    }
}

impl NetworkBoundary for ChannelBoundary {
    fn is_joined(&self) -> bool {
        self.joined.get() && !self.tx.is_closed()
    }

    fn submit(&mut self, request: &ApsDataRequest) -> Result<DeliveryId, SubmitError> {
        if !self.is_joined() {
            return Err(SubmitError::NotJoined);
        }

        let id = DeliveryId(self.next_id);
        let frame = OutboundFrame {
            id,
            request: request.clone(),
        };
        match self.tx.try_send(frame) {
            Ok(()) => {
                self.next_id = self.next_id.wrapping_add(1);
                trace!(%id, "Queued frame for driver");
                Ok(id)
            }
            Err(mpsc::error::TrySendError::Full(_)) => Err(SubmitError::Busy),
            Err(mpsc::error::TrySendError::Closed(_)) => Err(SubmitError::NotJoined),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshscout_types::ClusterId;

    fn request() -> ApsDataRequest {
        ApsDataRequest::zdp_broadcast(ClusterId::MATCH_DESCRIPTOR_REQUEST, vec![1])
    }

    #[test]
    fn test_not_joined_until_driver_says_so() {
        let (mut boundary, mut rx, joined) = ChannelBoundary::new(4);
        assert_eq!(boundary.submit(&request()), Err(SubmitError::NotJoined));
        assert!(rx.try_recv().is_err());

        joined.set(true);
        assert_eq!(boundary.submit(&request()), Ok(DeliveryId(0)));
        assert_eq!(boundary.submit(&request()), Ok(DeliveryId(1)));
        let frame = rx.try_recv().unwrap();
        assert_eq!(frame.id, DeliveryId(0));
        assert_eq!(frame.request, request());
    }

    #[test]
    fn test_full_channel_is_busy() {
        let (mut boundary, _rx, joined) = ChannelBoundary::new(1);
        joined.set(true);
        assert!(boundary.submit(&request()).is_ok());
        assert_eq!(boundary.submit(&request()), Err(SubmitError::Busy));
    }

    #[test]
    fn test_dropped_driver_counts_as_not_joined() {
        let (mut boundary, rx, joined) = ChannelBoundary::new(1);
        joined.set(true);
        drop(rx);
        assert!(!boundary.is_joined());
        assert_eq!(boundary.submit(&request()), Err(SubmitError::NotJoined));
    }
}
