use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use swarm_canary_configuration::SwarmPolicy;
use swarm_canary_primitives::info_hash::InfoHash;
use swarm_canary_primitives::swarm_metadata::SwarmMetadata;
use swarm_canary_primitives::{peer, DurationSinceUnixEpoch};

use super::Repository;
use crate::entry::Entry;
use crate::{EntrySingle, SwarmsRwLockStd};

#[derive(Debug)]
pub struct RwLockStd<T> {
    pub(crate) swarms: std::sync::RwLock<BTreeMap<InfoHash, T>>,
    pub(crate) policy: SwarmPolicy,
}

impl<T> RwLockStd<T> {
    #[must_use]
    pub fn new(policy: SwarmPolicy) -> Self {
        Self {
            swarms: std::sync::RwLock::new(BTreeMap::new()),
            policy,
        }
    }

    /// The newest `updated` timestamp a record can carry and still be
    /// discarded at `now`. Nothing can be expired before a whole TTL has
    /// passed since the epoch.
    fn cutoff(&self, now: DurationSinceUnixEpoch) -> Option<DurationSinceUnixEpoch> {
        now.checked_sub(Duration::from_secs(u64::from(self.policy.peer_ttl)))
    }
}

impl<T> Default for RwLockStd<T> {
    fn default() -> Self {
        Self::new(SwarmPolicy::default())
    }
}

impl SwarmsRwLockStd {
    fn get_swarms(&self) -> RwLockReadGuard<'_, BTreeMap<InfoHash, EntrySingle>> {
        self.swarms.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn get_swarms_mut(&self) -> RwLockWriteGuard<'_, BTreeMap<InfoHash, EntrySingle>> {
        self.swarms.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn expire_locked(swarms: &mut BTreeMap<InfoHash, EntrySingle>, current_cutoff: Option<DurationSinceUnixEpoch>) {
        let Some(current_cutoff) = current_cutoff else {
            return;
        };

        for entry in swarms.values_mut() {
            entry.remove_inactive_peers(current_cutoff);
        }

        swarms.retain(|_, entry| !entry.peers_is_empty());
    }
}

impl Repository<EntrySingle> for SwarmsRwLockStd
where
    EntrySingle: Entry,
{
    fn register(&self, info_hash: &InfoHash, peer: &peer::Peer, now: DurationSinceUnixEpoch) -> Option<Arc<peer::Peer>> {
        let mut swarms = self.get_swarms_mut();

        Self::expire_locked(&mut swarms, self.cutoff(now));

        let entry = swarms.entry(*info_hash).or_default();

        let previous = entry.upsert_peer(peer);

        if entry.peers_is_empty() {
            swarms.remove(info_hash);
        }

        previous
    }

    fn list(
        &self,
        info_hash: &InfoHash,
        excluded: Option<&peer::Id>,
        max: usize,
        now: DurationSinceUnixEpoch,
    ) -> Vec<Arc<peer::Peer>> {
        let mut swarms = self.get_swarms_mut();

        Self::expire_locked(&mut swarms, self.cutoff(now));

        match swarms.get(info_hash) {
            None => vec![],
            Some(entry) => match excluded {
                Some(client) => entry.get_peers_for_client(client, Some(max)),
                None => entry.get_peers(Some(max)),
            },
        }
    }

    fn expire(&self, now: DurationSinceUnixEpoch) {
        let mut swarms = self.get_swarms_mut();

        Self::expire_locked(&mut swarms, self.cutoff(now));
    }

    fn get_swarm_metadata(&self, info_hash: &InfoHash) -> SwarmMetadata {
        self.get_swarms()
            .get(info_hash)
            .map_or_else(SwarmMetadata::zeroed, Entry::get_swarm_metadata)
    }

    fn get(&self, info_hash: &InfoHash) -> Option<EntrySingle> {
        self.get_swarms().get(info_hash).cloned()
    }
}
