//! ZDP wire codec for match descriptor discovery.
//!
//! # Wire Format
//!
//! All multi-byte fields are little-endian.
//!
//! ```text
//! Match_Descr_req (9 bytes for a single in-cluster query):
//!   [seq:u8][nwk_addr_of_interest:u16][profile:u16]
//!   [num_in:u8][in_cluster:u16 * num_in][num_out:u8][out_cluster:u16 * num_out]
//!
//! Match_Descr_rsp:
//!   [seq:u8][status:u8]
//!   status == SUCCESS: [nwk_addr_of_interest:u16][match_len:u8][endpoint:u8 * match_len]
//! ```
//!
//! The decoder does not read the request schema back: requests go out,
//! responses come in, and each side only implements its own direction.

mod error;
pub mod request;
pub mod response;

pub use error::DecodeError;
pub use request::{encode_request, MatchDescriptorRequest, MATCH_DESCRIPTOR_REQUEST_LEN};
pub use response::{decode_response, MatchDescriptorResponse};
