//! Decoders for the raw byte params of announce requests.
//!
//! `info_hash` and `peer_id` are 20-byte arrays sent percent-encoded in the
//! URL query. They are not UTF-8 strings, so they can't be URL-decoded into a
//! `String`; the raw bytes are decoded instead.
//!
//! ```text
//! info_hash=%3B%24U%04%CF%5F%11%BB%DB%E1%20%1C%EAjk%F4Z%EE%1B%C0
//! ```
use swarm_canary_primitives::info_hash::{self, InfoHash};
use swarm_canary_primitives::peer;

/// Percent decodes a percent encoded infohash.
///
/// # Errors
///
/// Will return `Err` if the decoded bytes do not represent a valid
/// [`InfoHash`]: anything but 20 bytes.
pub fn percent_decode_info_hash(raw_info_hash: &str) -> Result<InfoHash, info_hash::ConversionError> {
    let bytes = percent_encoding::percent_decode_str(raw_info_hash).collect::<Vec<u8>>();
    InfoHash::try_from(bytes)
}

/// Percent decodes a percent encoded peer id.
///
/// # Errors
///
/// Will return `Err` if the decoded bytes do not represent a valid
/// [`peer::Id`]: anything but 20 bytes.
pub fn percent_decode_peer_id(raw_peer_id: &str) -> Result<peer::Id, peer::IdConversionError> {
    let bytes = percent_encoding::percent_decode_str(raw_peer_id).collect::<Vec<u8>>();
    peer::Id::try_from(bytes)
}
