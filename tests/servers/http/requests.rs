use std::fmt;

use percent_encoding::{percent_encode, NON_ALPHANUMERIC};
use swarm_canary_primitives::info_hash::InfoHash;
use swarm_canary_primitives::peer;

/// An announce query, with the raw bytes the client sends.
pub struct Query {
    pub info_hash: Vec<u8>,
    pub peer_id: [u8; 20],
    pub port: u16,
    pub left: i64,
    pub event: Option<&'static str>,
    pub compact: Option<u8>,
}

impl Query {
    pub fn new(info_hash: &InfoHash, peer_id: &peer::Id, port: u16) -> Self {
        Self {
            info_hash: info_hash.0.to_vec(),
            peer_id: peer_id.0,
            port,
            left: 1,
            event: Some("started"),
            compact: None,
        }
    }

    #[must_use]
    pub fn with_info_hash_bytes(mut self, info_hash: &[u8]) -> Self {
        self.info_hash = info_hash.to_vec();
        self
    }

    #[must_use]
    pub fn with_compact(mut self, compact: u8) -> Self {
        self.compact = Some(compact);
        self
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "info_hash={}&peer_id={}&port={}&uploaded=0&downloaded=0&left={}",
            percent_encode(&self.info_hash, NON_ALPHANUMERIC),
            percent_encode(&self.peer_id, NON_ALPHANUMERIC),
            self.port,
            self.left
        )?;

        if let Some(event) = self.event {
            write!(f, "&event={event}")?;
        }

        if let Some(compact) = self.compact {
            write!(f, "&compact={compact}")?;
        }

        Ok(())
    }
}
