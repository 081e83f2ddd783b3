//! Core types for meshscout.
//!
//! Addressing, identifiers and status codes shared by the codec, the
//! discovery state machine and the runners.

mod address;
mod identifiers;
mod status;

pub use address::ApsAddress;
pub use identifiers::{
    ClusterId, DeliveryId, Endpoint, ExtAddress, NwkAddress, ProfileId, TransactionSeq,
};
pub use status::{ApsStatus, ZdpStatus};
