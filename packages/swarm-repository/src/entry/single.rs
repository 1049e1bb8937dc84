use std::sync::Arc;

use swarm_canary_primitives::announce_event::AnnounceEvent;
use swarm_canary_primitives::swarm_metadata::SwarmMetadata;
use swarm_canary_primitives::{peer, DurationSinceUnixEpoch};

use super::Entry;
use crate::EntrySingle;

impl Entry for EntrySingle {
    #[allow(clippy::cast_possible_truncation)]
    fn get_swarm_metadata(&self) -> SwarmMetadata {
        let (seeders, leechers) = self.peers.seeders_and_leechers();

        SwarmMetadata {
            downloaded: self.downloaded,
            complete: seeders as u32,
            incomplete: leechers as u32,
        }
    }

    fn peers_is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    fn get_peers_len(&self) -> usize {
        self.peers.len()
    }

    fn get_peers(&self, limit: Option<usize>) -> Vec<Arc<peer::Peer>> {
        self.peers.get_peers_excluding(None, limit)
    }

    fn get_peers_for_client(&self, client: &peer::Id, limit: Option<usize>) -> Vec<Arc<peer::Peer>> {
        self.peers.get_peers_excluding(Some(client), limit)
    }

    fn upsert_peer(&mut self, peer: &peer::Peer) -> Option<Arc<peer::Peer>> {
        match peer.event {
            AnnounceEvent::Stopped => self.peers.remove(&peer.peer_id),
            AnnounceEvent::Completed => {
                let previous = self.peers.insert(peer.peer_id, Arc::new(*peer));
                // Don't count if peer was not previously known or already completed.
                if previous.as_ref().is_some_and(|p| p.event != AnnounceEvent::Completed) {
                    self.downloaded += 1;
                }
                previous
            }
            AnnounceEvent::Started | AnnounceEvent::None => self.peers.insert(peer.peer_id, Arc::new(*peer)),
        }
    }

    fn remove_inactive_peers(&mut self, current_cutoff: DurationSinceUnixEpoch) {
        self.peers.remove_inactive(current_cutoff);
    }
}
