//! Match_Descr_req (ZDP command 0x0006).

use bytes::BufMut;
use meshscout_types::{ClusterId, NwkAddress, ProfileId, TransactionSeq};

/// Encoded length of a request with one input cluster and no output clusters.
pub const MATCH_DESCRIPTOR_REQUEST_LEN: usize = 9;

/// Request asking devices to report endpoints that match a simple descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDescriptorRequest {
    /// ZDP transaction sequence number.
    pub seq: TransactionSeq,
    /// Node whose descriptors should be matched; a broadcast address asks everyone.
    pub nwk_addr_of_interest: NwkAddress,
    /// Profile the endpoints must implement.
    pub profile: ProfileId,
    /// Server clusters, any of which produces a match.
    pub in_clusters: Vec<ClusterId>,
    /// Client clusters, any of which produces a match.
    pub out_clusters: Vec<ClusterId>,
}

impl MatchDescriptorRequest {
    /// Create the discovery query: any rx-on-when-idle device offering a ZLL
    /// On/Off server cluster.
    pub fn on_off_lights(seq: TransactionSeq) -> Self {
        Self {
            seq,
            nwk_addr_of_interest: NwkAddress::BROADCAST_RX_ON_WHEN_IDLE,
            profile: ProfileId::ZLL,
            in_clusters: vec![ClusterId::ON_OFF],
            out_clusters: Vec::new(),
        }
    }

    /// Serialize to the ZDP payload (ASDU).
    ///
    /// Cluster lists longer than 255 entries are cut to fit the 8-bit count.
    pub fn encode(&self) -> Vec<u8> {
        let in_count = self.in_clusters.len().min(u8::MAX as usize);
        let out_count = self.out_clusters.len().min(u8::MAX as usize);
        let mut buf = Vec::with_capacity(7 + 2 * (in_count + out_count));

        buf.put_u8(self.seq.0);
        buf.put_u16_le(self.nwk_addr_of_interest.0);
        buf.put_u16_le(self.profile.0);
        buf.put_u8(in_count as u8);
        for cluster in &self.in_clusters[..in_count] {
            buf.put_u16_le(cluster.0);
        }
        buf.put_u8(out_count as u8);
        for cluster in &self.out_clusters[..out_count] {
            buf.put_u16_le(cluster.0);
        }

        buf
    }
}

/// Encode the fixed On/Off discovery request for the given transaction.
pub fn encode_request(seq: TransactionSeq) -> Vec<u8> {
    MatchDescriptorRequest::on_off_lights(seq).encode()
}
