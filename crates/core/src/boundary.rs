//! Outbound boundary to the network layer.

use crate::ApsDataRequest;
use meshscout_types::{ApsStatus, DeliveryId};
use thiserror::Error;

/// Error returned when the network layer refuses a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Not joined to a network")]
    NotJoined,

    #[error("Request queue of the network layer is full")]
    Busy,

    #[error("Request rejected with status {0}")]
    Rejected(ApsStatus),
}

/// The part of the APS layer the discovery state machine calls into.
///
/// Injected at construction so tests and the simulation can substitute
/// their own network. Both calls must return immediately; delivery is
/// reported later through an [`ApsDataConfirm`](crate::ApsDataConfirm).
pub trait NetworkBoundary {
    /// Whether the device is currently joined to a network.
    fn is_joined(&self) -> bool;

    /// Queue a frame for transmission.
    ///
    /// On success returns the id that the later confirmation will carry.
    fn submit(&mut self, request: &ApsDataRequest) -> Result<DeliveryId, SubmitError>;
}

impl<B: NetworkBoundary + ?Sized> NetworkBoundary for Box<B> {
    fn is_joined(&self) -> bool {
        (**self).is_joined()
    }

    fn submit(&mut self, request: &ApsDataRequest) -> Result<DeliveryId, SubmitError> {
        (**self).submit(request)
    }
}
