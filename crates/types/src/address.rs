//! APS destination addressing.

use crate::{ExtAddress, NwkAddress};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Destination or source address of an APS frame.
///
/// The variant doubles as the APS address mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApsAddress {
    /// 16-bit group address.
    Group(u16),
    /// 16-bit network address (unicast or broadcast).
    Nwk(NwkAddress),
    /// 64-bit IEEE address.
    Ext(ExtAddress),
}

impl ApsAddress {
    /// The network address, if this is network addressed.
    pub fn nwk(&self) -> Option<NwkAddress> {
        match self {
            ApsAddress::Nwk(addr) => Some(*addr),
            _ => None,
        }
    }

    /// Check if this address is a network-layer broadcast.
    pub fn is_broadcast(&self) -> bool {
        matches!(self, ApsAddress::Nwk(addr) if addr.is_broadcast())
    }
}

impl fmt::Display for ApsAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApsAddress::Group(group) => write!(f, "group 0x{:04X}", group),
            ApsAddress::Nwk(addr) => write!(f, "nwk {}", addr),
            ApsAddress::Ext(addr) => write!(f, "ext {}", addr),
        }
    }
}

impl From<NwkAddress> for ApsAddress {
    fn from(addr: NwkAddress) -> Self {
        ApsAddress::Nwk(addr)
    }
}

impl From<ExtAddress> for ApsAddress {
    fn from(addr: ExtAddress) -> Self {
        ApsAddress::Ext(addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_detection() {
        assert!(ApsAddress::Nwk(NwkAddress::BROADCAST_RX_ON_WHEN_IDLE).is_broadcast());
        assert!(!ApsAddress::Nwk(NwkAddress(0x4F21)).is_broadcast());
        assert!(!ApsAddress::Group(0xFFFF).is_broadcast());
        assert_eq!(ApsAddress::Ext(ExtAddress(1)).nwk(), None);
    }

    #[test]
    fn test_display() {
        let addr: ApsAddress = NwkAddress(0x4F21).into();
        assert_eq!(addr.to_string(), "nwk 0x4F21");
    }
}
