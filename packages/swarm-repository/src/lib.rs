//! In-memory registry of the swarms the canary has seen.
//!
//! There is one [`entry::Swarm`] per content hash, holding the peers that
//! announced it or completed a handshake for it. Records expire when they are
//! not refreshed within the [`SwarmPolicy`](swarm_canary_configuration::SwarmPolicy)
//! TTL. Expiry runs on access, there is no background job.
use repository::rw_lock_std::RwLockStd;

pub mod entry;
pub mod repository;

// Swarm Entry

pub type EntrySingle = entry::Swarm;

// Repos

pub type SwarmsRwLockStd = RwLockStd<EntrySingle>;
