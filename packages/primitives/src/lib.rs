//! Primitive types shared by the swarm canary packages.
//!
//! These are the values that travel between the tracker, the peer listener,
//! the swarm registry and the canary evaluator: content hashes, peer ids,
//! peer records and announce events.
use std::time::Duration;

pub mod announce_event;
pub mod info_hash;
pub mod peer;
pub mod swarm_metadata;

/// Duration since the Unix Epoch.
pub type DurationSinceUnixEpoch = Duration;

/// A byte counter reported by a peer in an announce (`uploaded`, `downloaded`, `left`).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub struct NumberOfBytes(pub i64);

impl NumberOfBytes {
    #[must_use]
    pub fn new(bytes: i64) -> Self {
        Self(bytes)
    }
}

/// IP version used by a peer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IPVersion {
    IPv4,
    IPv6,
}
