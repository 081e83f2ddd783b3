//! Inbound ZDP responses.

mod match_descriptor;

pub use match_descriptor::{decode_response, MatchDescriptorResponse};
