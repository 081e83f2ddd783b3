//! APSDE-DATA primitives exchanged with the network layer.

use meshscout_types::{
    ApsAddress, ApsStatus, ClusterId, DeliveryId, Endpoint, NwkAddress, ProfileId,
};

/// An `APSDE-DATA.request`: one outbound frame handed to the network layer.
///
/// Never mutated after construction; the delivery id is assigned by the
/// network layer on submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApsDataRequest {
    /// Destination address (the variant is the address mode).
    pub dst_address: ApsAddress,
    /// Destination endpoint.
    pub dst_endpoint: Endpoint,
    /// Source endpoint.
    pub src_endpoint: Endpoint,
    /// Application profile.
    pub profile: ProfileId,
    /// Cluster (for ZDP: the command).
    pub cluster: ClusterId,
    /// Application payload.
    pub asdu: Vec<u8>,
}

impl ApsDataRequest {
    /// Build a ZDO-to-ZDO request broadcast to every rx-on-when-idle device.
    pub fn zdp_broadcast(cluster: ClusterId, asdu: Vec<u8>) -> Self {
        Self {
            dst_address: ApsAddress::Nwk(NwkAddress::BROADCAST_RX_ON_WHEN_IDLE),
            dst_endpoint: Endpoint::ZDO,
            src_endpoint: Endpoint::ZDO,
            profile: ProfileId::ZDP,
            cluster,
            asdu,
        }
    }
}

/// An `APSDE-DATA.confirm`.
///
/// The host delivers every confirmation on the channel, including those for
/// requests submitted by other consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApsDataConfirm {
    /// Id of the request this confirms.
    pub id: DeliveryId,
    /// Delivery status.
    pub status: ApsStatus,
}

/// An `APSDE-DATA.indication`: an inbound frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApsDataIndication {
    /// Sender address.
    pub src_address: ApsAddress,
    /// Sender endpoint.
    pub src_endpoint: Endpoint,
    /// Local endpoint the frame was addressed to.
    pub dst_endpoint: Endpoint,
    /// Application profile.
    pub profile: ProfileId,
    /// Cluster (for ZDP: the command).
    pub cluster: ClusterId,
    /// Application payload.
    pub asdu: Vec<u8>,
}
