//! Test doubles for the network boundary.

use crate::{ApsDataRequest, NetworkBoundary, SubmitError};
use meshscout_types::DeliveryId;

/// Scriptable [`NetworkBoundary`] that records every accepted request.
#[derive(Debug, Default)]
pub struct MockBoundary {
    /// Reported join state.
    pub joined: bool,
    /// When set, every submission fails with this error.
    pub reject_with: Option<SubmitError>,
    /// Accepted submissions, in order.
    pub submitted: Vec<(DeliveryId, ApsDataRequest)>,
    next_id: u8,
}

impl MockBoundary {
    /// A boundary that is joined and accepts everything.
    pub fn joined() -> Self {
        Self {
            joined: true,
            ..Default::default()
        }
    }

    /// A boundary that is not joined.
    pub fn not_joined() -> Self {
        Self::default()
    }

    /// The most recently accepted submission.
    pub fn last_submitted(&self) -> Option<&(DeliveryId, ApsDataRequest)> {
        self.submitted.last()
    }
}

impl NetworkBoundary for MockBoundary {
    fn is_joined(&self) -> bool {
        self.joined
    }

    fn submit(&mut self, request: &ApsDataRequest) -> Result<DeliveryId, SubmitError> {
        if !self.joined {
            return Err(SubmitError::NotJoined);
        }
        if let Some(err) = self.reject_with {
            return Err(err);
        }
        let id = DeliveryId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.submitted.push((id, request.clone()));
        Ok(id)
    }
}
