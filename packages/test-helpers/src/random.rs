use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use swarm_canary_primitives::info_hash::InfoHash;
use swarm_canary_primitives::peer;

/// Returns a random alphanumeric string of a certain size.
pub fn string(size: usize) -> String {
    thread_rng().sample_iter(&Alphanumeric).take(size).map(char::from).collect()
}

/// Returns a random content hash.
#[must_use]
pub fn info_hash() -> InfoHash {
    InfoHash(thread_rng().gen())
}

/// Returns a random client peer id, `-qB4650-` followed by 12 alphanumerics.
#[must_use]
pub fn peer_id() -> peer::Id {
    let mut bytes = [0u8; 20];
    bytes[..8].copy_from_slice(b"-qB4650-");
    bytes[8..].copy_from_slice(string(12).as_bytes());
    peer::Id(bytes)
}
