//! ZDP transaction sequence tracking.

use meshscout_types::TransactionSeq;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generates and remembers the sequence number of the outstanding request.
///
/// Only one transaction is owned at a time. Calling [`next`](Self::next)
/// abandons the previous one: late responses carrying the old number no
/// longer match. Numbers are drawn from a seeded PRNG and may repeat.
#[derive(Debug, Clone)]
pub struct TransactionSequencer {
    rng: ChaCha8Rng,
    current: Option<TransactionSeq>,
}

impl TransactionSequencer {
    /// Create a sequencer with a deterministic seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            current: None,
        }
    }

    /// Draw a fresh sequence number and make it current.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> TransactionSeq {
        let seq = TransactionSeq(self.rng.gen());
        self.current = Some(seq);
        seq
    }

    /// Check whether `candidate` belongs to the current transaction.
    ///
    /// Always false before the first call to [`next`](Self::next).
    pub fn matches(&self, candidate: TransactionSeq) -> bool {
        self.current == Some(candidate)
    }

    /// The current sequence number, if a transaction was ever started.
    pub fn current(&self) -> Option<TransactionSeq> {
        self.current
    }
}
