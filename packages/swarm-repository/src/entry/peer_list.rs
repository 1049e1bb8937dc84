use std::sync::Arc;

use swarm_canary_primitives::{peer, DurationSinceUnixEpoch};

/// The peers of one swarm, ordered by peer id.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeerList {
    peers: std::collections::BTreeMap<peer::Id, Arc<peer::Peer>>,
}

impl PeerList {
    #[must_use]
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub fn insert(&mut self, key: peer::Id, value: Arc<peer::Peer>) -> Option<Arc<peer::Peer>> {
        self.peers.insert(key, value)
    }

    pub fn remove(&mut self, key: &peer::Id) -> Option<Arc<peer::Peer>> {
        self.peers.remove(key)
    }

    #[must_use]
    pub fn get(&self, key: &peer::Id) -> Option<&Arc<peer::Peer>> {
        self.peers.get(key)
    }

    /// Drops the peers last updated at or before `current_cutoff`.
    pub fn remove_inactive(&mut self, current_cutoff: DurationSinceUnixEpoch) {
        self.peers.retain(|_, peer| peer.updated > current_cutoff);
    }

    #[must_use]
    pub fn seeders_and_leechers(&self) -> (usize, usize) {
        let seeders = self.peers.values().filter(|peer| peer.is_seeder()).count();
        let leechers = self.len() - seeders;

        (seeders, leechers)
    }

    /// Peers other than `excluded`, at most `limit` of them.
    #[must_use]
    pub fn get_peers_excluding(&self, excluded: Option<&peer::Id>, limit: Option<usize>) -> Vec<Arc<peer::Peer>> {
        let peers = self
            .peers
            .iter()
            // Take peers which are not the client peer
            .filter(|(id, _)| Some(*id) != excluded)
            .map(|(_, peer)| peer);

        match limit {
            Some(limit) => peers.take(limit).cloned().collect(),
            None => peers.cloned().collect(),
        }
    }
}
