//! Event queue with deterministic ordering.

use meshscout_core::{EventPriority, HostInput};
use std::cmp::Ordering;
use std::time::Duration;

/// Key for ordering inputs in the queue.
///
/// Inputs are ordered by:
/// 1. Time (earlier first)
/// 2. Priority (timer before network)
/// 3. Sequence number (FIFO for same time/priority)
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EventKey {
    /// When this input should be processed.
    pub time: Duration,
    /// Priority for ordering at same time.
    pub priority: EventPriority,
    /// Sequence number for deterministic FIFO ordering.
    pub sequence: u64,
}

impl EventKey {
    /// Create a new event key for a [`HostInput`].
    pub fn new(time: Duration, input: &HostInput, sequence: u64) -> Self {
        Self {
            time,
            priority: input.priority(),
            sequence,
        }
    }
}

impl Ord for EventKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.time
            .cmp(&other.time)
            .then_with(|| self.priority.cmp(&other.priority))
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

impl PartialOrd for EventKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_key_ordering() {
        let earlier = EventKey {
            time: Duration::from_secs(1),
            priority: EventPriority::Network,
            sequence: 2,
        };
        let later = EventKey {
            time: Duration::from_secs(2),
            priority: EventPriority::Timer,
            sequence: 1,
        };
        assert!(earlier < later);
    }

    #[test]
    fn test_priority_ordering_at_same_time() {
        let timer = EventKey {
            time: Duration::from_secs(1),
            priority: EventPriority::Timer,
            sequence: 2, // Higher sequence, but should still be first
        };
        let network = EventKey {
            time: Duration::from_secs(1),
            priority: EventPriority::Network,
            sequence: 1,
        };
        assert!(timer < network, "Timer inputs should process before network");
    }

    #[test]
    fn test_fifo_at_same_time_and_priority() {
        let first = EventKey {
            time: Duration::from_secs(1),
            priority: EventPriority::Network,
            sequence: 1,
        };
        let second = EventKey {
            sequence: 2,
            ..first
        };
        assert!(first < second);
    }
}
