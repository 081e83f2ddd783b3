//! Domain-specific identifier types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 16-bit network (short) address of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NwkAddress(pub u16);

impl NwkAddress {
    /// Coordinator address.
    pub const COORDINATOR: Self = NwkAddress(0x0000);

    /// Broadcast to all devices in the network.
    pub const BROADCAST_ALL: Self = NwkAddress(0xFFFF);

    /// Broadcast to all devices with `macRxOnWhenIdle = TRUE`.
    pub const BROADCAST_RX_ON_WHEN_IDLE: Self = NwkAddress(0xFFFD);

    /// Broadcast to all routers and the coordinator.
    pub const BROADCAST_ROUTERS: Self = NwkAddress(0xFFFC);

    /// Whether this address is one of the reserved broadcast addresses.
    pub fn is_broadcast(&self) -> bool {
        self.0 >= 0xFFF8
    }
}

impl fmt::Display for NwkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

/// 64-bit IEEE (extended) address of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtAddress(pub u64);

impl fmt::Display for ExtAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:016X}", self.0)
    }
}

/// Application endpoint on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Endpoint(pub u8);

impl Endpoint {
    /// The ZigBee Device Object endpoint.
    pub const ZDO: Self = Endpoint(0x00);
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02X}", self.0)
    }
}

/// Application profile identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(pub u16);

impl ProfileId {
    /// ZigBee Device Profile.
    pub const ZDP: Self = ProfileId(0x0000);

    /// ZigBee Home Automation.
    pub const HOME_AUTOMATION: Self = ProfileId(0x0104);

    /// ZigBee Light Link.
    pub const ZLL: Self = ProfileId(0xC05E);
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

/// Cluster identifier.
///
/// Within the ZDP profile the cluster identifies the command (message type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterId(pub u16);

impl ClusterId {
    /// On/Off cluster (ZCL general).
    pub const ON_OFF: Self = ClusterId(0x0006);

    /// ZDP Match_Descr_req.
    pub const MATCH_DESCRIPTOR_REQUEST: Self = ClusterId(0x0006);

    /// ZDP Match_Descr_rsp.
    pub const MATCH_DESCRIPTOR_RESPONSE: Self = ClusterId(0x8006);
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

/// ZDP transaction sequence number.
///
/// Correlates a ZDP request with its responses. Best effort only: the
/// 8-bit space wraps and values are not checked for uniqueness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionSeq(pub u8);

impl fmt::Display for TransactionSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier assigned by the network layer to a submitted APS request.
///
/// The matching `APSDE-DATA.confirm` carries the same id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeliveryId(pub u8);

impl fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "aps-{}", self.0)
    }
}
