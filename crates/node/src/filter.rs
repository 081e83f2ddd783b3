//! Inbound indication filtering.

use meshscout_core::{ApsDataIndication, Event};
use meshscout_messages::{decode_response, DecodeError};
use meshscout_types::{ClusterId, ProfileId};

/// Outcome of inspecting one inbound indication.
#[derive(Debug, Clone)]
pub enum IndicationVerdict {
    /// A decoded Match_Descr_rsp for the state machine.
    Forward(Event),
    /// Some other profile or command; not ours.
    NotForUs,
    /// A Match_Descr_rsp too short to carry its prefix.
    Malformed(DecodeError),
}

/// Keep only ZDP Match_Descr_rsp frames and decode them.
pub fn filter_indication(indication: &ApsDataIndication) -> IndicationVerdict {
    if indication.profile != ProfileId::ZDP
        || indication.cluster != ClusterId::MATCH_DESCRIPTOR_RESPONSE
    {
        return IndicationVerdict::NotForUs;
    }

    match decode_response(&indication.asdu) {
        Ok(response) => IndicationVerdict::Forward(Event::MatchDescriptorResponse {
            source: indication.src_address,
            response,
        }),
        Err(e) => IndicationVerdict::Malformed(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshscout_types::{ApsAddress, Endpoint, NwkAddress, TransactionSeq};

    fn make_indication(profile: ProfileId, cluster: ClusterId, asdu: Vec<u8>) -> ApsDataIndication {
        ApsDataIndication {
            src_address: ApsAddress::Nwk(NwkAddress(0x1A2B)),
            src_endpoint: Endpoint::ZDO,
            dst_endpoint: Endpoint::ZDO,
            profile,
            cluster,
            asdu,
        }
    }

    #[test]
    fn test_forwards_match_descriptor_response() {
        let ind = make_indication(
            ProfileId::ZDP,
            ClusterId::MATCH_DESCRIPTOR_RESPONSE,
            vec![0x05, 0x00, 0x2B, 0x1A, 0x01, 0x0B],
        );
        match filter_indication(&ind) {
            IndicationVerdict::Forward(Event::MatchDescriptorResponse { source, response }) => {
                assert_eq!(source, ApsAddress::Nwk(NwkAddress(0x1A2B)));
                assert_eq!(response.seq, TransactionSeq(5));
                assert_eq!(response.endpoints, vec![Endpoint(0x0B)]);
            }
            other => panic!("Expected forwarded response, got {:?}", other),
        }
    }

    #[test]
    fn test_drops_other_profiles_and_commands() {
        let payload = vec![0x05, 0x00, 0x2B, 0x1A, 0x01, 0x0B];
        let other_profile = make_indication(
            ProfileId::HOME_AUTOMATION,
            ClusterId::MATCH_DESCRIPTOR_RESPONSE,
            payload.clone(),
        );
        // Match_Descr_req from another coordinator on the same channel.
        let request = make_indication(ProfileId::ZDP, ClusterId::MATCH_DESCRIPTOR_REQUEST, payload);

        assert!(matches!(
            filter_indication(&other_profile),
            IndicationVerdict::NotForUs
        ));
        assert!(matches!(
            filter_indication(&request),
            IndicationVerdict::NotForUs
        ));
    }

    #[test]
    fn test_reports_malformed_response() {
        let ind = make_indication(ProfileId::ZDP, ClusterId::MATCH_DESCRIPTOR_RESPONSE, vec![0x05]);
        assert!(matches!(
            filter_indication(&ind),
            IndicationVerdict::Malformed(DecodeError::Truncated { .. })
        ));
    }
}
