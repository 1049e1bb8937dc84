use std::sync::Arc;

use swarm_canary_primitives::info_hash::InfoHash;
use swarm_canary_primitives::swarm_metadata::SwarmMetadata;
use swarm_canary_primitives::{peer, DurationSinceUnixEpoch};

pub mod rw_lock_std;

/// The registry operations used by the tracker and the peer listener.
///
/// Every operation that takes `now` first drops the records that have not
/// been refreshed within the peer TTL, and the swarms left empty.
pub trait Repository<T>: 'static {
    /// Stores the peer in the swarm of `info_hash`, creating the swarm if
    /// needed. It returns the record previously stored under the same peer id.
    fn register(&self, info_hash: &InfoHash, peer: &peer::Peer, now: DurationSinceUnixEpoch) -> Option<Arc<peer::Peer>>;

    /// Up to `max` peers of the swarm, ordered by peer id, leaving `excluded`
    /// out.
    fn list(
        &self,
        info_hash: &InfoHash,
        excluded: Option<&peer::Id>,
        max: usize,
        now: DurationSinceUnixEpoch,
    ) -> Vec<Arc<peer::Peer>>;

    /// Drops the expired records and the empty swarms.
    fn expire(&self, now: DurationSinceUnixEpoch);

    /// The counters of the swarm, zeroed when the swarm is unknown.
    fn get_swarm_metadata(&self, info_hash: &InfoHash) -> SwarmMetadata;

    /// A snapshot of the swarm.
    fn get(&self, info_hash: &InfoHash) -> Option<T>;
}
