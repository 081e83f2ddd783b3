//! Codec errors.

use thiserror::Error;

/// Errors that can occur while decoding a ZDP payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The mandatory transaction sequence / status prefix is missing.
    #[error("Payload truncated: need at least {needed} bytes, got {actual}")]
    Truncated { needed: usize, actual: usize },
}
