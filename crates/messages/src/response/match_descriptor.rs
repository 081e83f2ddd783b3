//! Match_Descr_rsp (ZDP command 0x8006).

use crate::DecodeError;
use bytes::Buf;
use meshscout_types::{Endpoint, NwkAddress, TransactionSeq, ZdpStatus};

/// Transaction sequence number plus status.
const PREFIX_LEN: usize = 2;

/// Decoded Match_Descr_rsp payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDescriptorResponse {
    /// ZDP transaction sequence number echoed from the request.
    pub seq: TransactionSeq,
    /// Response status.
    pub status: ZdpStatus,
    /// Node the match applies to. `None` for failures, or when a success
    /// response stops before the field.
    pub nwk_addr_of_interest: Option<NwkAddress>,
    /// Matching endpoints. Always empty for failures.
    pub endpoints: Vec<Endpoint>,
}

impl MatchDescriptorResponse {
    /// Check if the responder reported success.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// Decode a Match_Descr_rsp payload.
///
/// Only a missing sequence/status prefix is an error. Everything after it is
/// read on a best-effort basis: a match list shorter than its announced
/// length yields the endpoints that are present.
pub fn decode_response(payload: &[u8]) -> Result<MatchDescriptorResponse, DecodeError> {
    if payload.len() < PREFIX_LEN {
        return Err(DecodeError::Truncated {
            needed: PREFIX_LEN,
            actual: payload.len(),
        });
    }

    let mut buf = payload;
    let seq = TransactionSeq(buf.get_u8());
    let status = ZdpStatus(buf.get_u8());

    let mut response = MatchDescriptorResponse {
        seq,
        status,
        nwk_addr_of_interest: None,
        endpoints: Vec::new(),
    };

    if !status.is_success() || buf.remaining() < 2 {
        return Ok(response);
    }

    response.nwk_addr_of_interest = Some(NwkAddress(buf.get_u16_le()));

    if !buf.has_remaining() {
        return Ok(response);
    }

    let match_len = buf.get_u8() as usize;
    let available = match_len.min(buf.remaining());
    response.endpoints = buf[..available].iter().copied().map(Endpoint).collect();

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_success_response() {
        let payload = [0x05, 0x00, 0xFF, 0xFF, 0x02, 0x01, 0x02];
        let response = decode_response(&payload).unwrap();
        assert_eq!(response.seq, TransactionSeq(5));
        assert!(response.is_success());
        assert_eq!(response.nwk_addr_of_interest, Some(NwkAddress(0xFFFF)));
        assert_eq!(response.endpoints, vec![Endpoint(0x01), Endpoint(0x02)]);
    }

    #[test]
    fn test_decode_truncated_endpoint_list() {
        let payload = [0x05, 0x00, 0xFF, 0xFF, 0x05, 0x01];
        let response = decode_response(&payload).unwrap();
        assert_eq!(response.seq, TransactionSeq(5));
        assert_eq!(response.endpoints, vec![Endpoint(0x01)]);
    }

    #[test]
    fn test_decode_failure_status_ignores_trailing_bytes() {
        let payload = [0x07, 0x01, 0x34, 0x12, 0x02, 0x0A, 0x0B];
        let response = decode_response(&payload).unwrap();
        assert_eq!(response.seq, TransactionSeq(7));
        assert_eq!(response.status, ZdpStatus(0x01));
        assert!(!response.is_success());
        assert_eq!(response.nwk_addr_of_interest, None);
        assert!(response.endpoints.is_empty());
    }

    #[test]
    fn test_decode_failure_status_without_trailing_bytes() {
        let response = decode_response(&[0x07, 0x81]).unwrap();
        assert_eq!(response.status, ZdpStatus::DEVICE_NOT_FOUND);
        assert!(response.endpoints.is_empty());
    }

    #[test]
    fn test_decode_missing_prefix() {
        assert_eq!(
            decode_response(&[]),
            Err(DecodeError::Truncated {
                needed: 2,
                actual: 0
            })
        );
        assert!(matches!(
            decode_response(&[0x05]),
            Err(DecodeError::Truncated { actual: 1, .. })
        ));
    }

    #[test]
    fn test_decode_success_without_body() {
        let response = decode_response(&[0x09, 0x00]).unwrap();
        assert!(response.is_success());
        assert_eq!(response.nwk_addr_of_interest, None);
        assert!(response.endpoints.is_empty());

        let response = decode_response(&[0x09, 0x00, 0x21, 0x4F]).unwrap();
        assert_eq!(response.nwk_addr_of_interest, Some(NwkAddress(0x4F21)));
        assert!(response.endpoints.is_empty());
    }

    #[test]
    fn test_decode_ignores_bytes_beyond_match_length() {
        let payload = [0x03, 0x00, 0x21, 0x4F, 0x01, 0x0B, 0xEE, 0xEE];
        let response = decode_response(&payload).unwrap();
        assert_eq!(response.endpoints, vec![Endpoint(0x0B)]);
    }
}
