//! In-flight request tracking for confirmation correlation.

use meshscout_core::ApsDataRequest;
use meshscout_types::DeliveryId;

/// A submitted request waiting for its `APSDE-DATA.confirm`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    /// Id assigned by the network layer on submission.
    pub id: DeliveryId,
    /// The request as submitted.
    pub request: ApsDataRequest,
}

/// Ordered collection of requests awaiting confirmation.
///
/// Entries leave exactly once: through a matching confirmation or through
/// [`clear`](Self::clear) when a new cycle starts. The discovery cycle keeps
/// at most one entry in practice, but nothing here relies on that.
#[derive(Debug, Default)]
pub struct RequestQueue {
    entries: Vec<PendingRequest>,
}

impl RequestQueue {
    /// Create a new empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every pending entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Append a submitted request.
    pub fn push(&mut self, request: PendingRequest) {
        self.entries.push(request);
    }

    /// Remove and return the first entry with the given delivery id.
    pub fn take_matching(&mut self, id: DeliveryId) -> Option<PendingRequest> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(index))
    }

    /// Number of pending entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshscout_types::ClusterId;

    fn make_pending(id: u8) -> PendingRequest {
        PendingRequest {
            id: DeliveryId(id),
            request: ApsDataRequest::zdp_broadcast(ClusterId::MATCH_DESCRIPTOR_REQUEST, vec![id]),
        }
    }

    #[test]
    fn test_take_matching_removes_once() {
        let mut queue = RequestQueue::new();
        queue.push(make_pending(3));

        let taken = queue.take_matching(DeliveryId(3)).unwrap();
        assert_eq!(taken.id, DeliveryId(3));
        assert!(queue.is_empty());
        assert!(queue.take_matching(DeliveryId(3)).is_none());
    }

    #[test]
    fn test_take_matching_unknown_id() {
        let mut queue = RequestQueue::new();
        queue.push(make_pending(1));
        assert!(queue.take_matching(DeliveryId(2)).is_none());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_correlation_is_by_id_not_position() {
        let mut queue = RequestQueue::new();
        queue.push(make_pending(1));
        queue.push(make_pending(2));
        queue.push(make_pending(3));

        assert_eq!(queue.take_matching(DeliveryId(2)).unwrap().request.asdu, vec![2]);
        assert_eq!(queue.len(), 2);
        assert!(queue.take_matching(DeliveryId(1)).is_some());
        assert!(queue.take_matching(DeliveryId(3)).is_some());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut queue = RequestQueue::new();
        queue.push(make_pending(1));
        queue.push(make_pending(2));
        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.take_matching(DeliveryId(1)).is_none());
    }
}
