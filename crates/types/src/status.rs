//! Status codes reported by the APS and ZDP layers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of an `APSDE-DATA.confirm` primitive.
///
/// Only success matters to consumers here; every other value is carried
/// through verbatim so it can be logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApsStatus(pub u8);

impl ApsStatus {
    /// Frame delivered (or accepted for broadcast).
    pub const SUCCESS: Self = ApsStatus(0x00);

    /// No acknowledgement received from the destination.
    pub const NO_ACK: Self = ApsStatus(0xA7);

    /// The NWK layer could not route the frame.
    pub const NO_ROUTE: Self = ApsStatus(0xD0);

    /// Check if this status reports success.
    pub fn is_success(&self) -> bool {
        *self == Self::SUCCESS
    }
}

impl fmt::Display for ApsStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

/// Status byte of a ZDP response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZdpStatus(pub u8);

impl ZdpStatus {
    pub const SUCCESS: Self = ZdpStatus(0x00);
    pub const DEVICE_NOT_FOUND: Self = ZdpStatus(0x81);

    /// Check if this status reports success.
    pub fn is_success(&self) -> bool {
        *self == Self::SUCCESS
    }
}

impl fmt::Display for ZdpStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_checks() {
        assert!(ApsStatus::SUCCESS.is_success());
        assert!(!ApsStatus::NO_ACK.is_success());
        assert!(ZdpStatus::SUCCESS.is_success());
        assert!(!ZdpStatus(0x01).is_success());
        assert_eq!(ApsStatus::NO_ROUTE.to_string(), "0xD0");
    }
}
