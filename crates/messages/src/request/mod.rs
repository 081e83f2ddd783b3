//! Outbound ZDP requests.

mod match_descriptor;

pub use match_descriptor::{encode_request, MatchDescriptorRequest, MATCH_DESCRIPTOR_REQUEST_LEN};
