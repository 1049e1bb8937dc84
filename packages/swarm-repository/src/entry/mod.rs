use std::fmt::Debug;
use std::sync::Arc;

use swarm_canary_primitives::swarm_metadata::SwarmMetadata;
use swarm_canary_primitives::{peer, DurationSinceUnixEpoch};

use self::peer_list::PeerList;

pub mod peer_list;
pub mod single;

pub trait Entry {
    /// It returns the swarm metadata (statistics) as a struct:
    ///
    /// `(seeders, completed, leechers)`
    fn get_swarm_metadata(&self) -> SwarmMetadata;

    /// Returns True if the Peers is Empty
    fn peers_is_empty(&self) -> bool;

    /// Returns the number of Peers
    fn get_peers_len(&self) -> usize;

    /// Get all swarm peers, optionally limiting the result.
    fn get_peers(&self, limit: Option<usize>) -> Vec<Arc<peer::Peer>>;

    /// It returns the peers to hand to a client, leaving the client itself
    /// out of the list and optionally limiting the result.
    fn get_peers_for_client(&self, client: &peer::Id, limit: Option<usize>) -> Vec<Arc<peer::Peer>>;

    /// It stores the peer under its id and returns the record it replaced.
    ///
    /// A peer announcing `stopped` is removed instead, and the removed record
    /// is returned.
    fn upsert_peer(&mut self, peer: &peer::Peer) -> Option<Arc<peer::Peer>>;

    /// It removes peer from the swarm that have not been updated since `current_cutoff`.
    fn remove_inactive_peers(&mut self, current_cutoff: DurationSinceUnixEpoch);
}

/// The swarm of one content hash.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Swarm {
    /// The peers seen for this content hash.
    pub(crate) peers: PeerList,
    /// The number of peers that have ever announced they completed.
    pub(crate) downloaded: u32,
}
