use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};

/// Configuration for the peer wire listener.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct PeerListener {
    /// The address the listener will bind to. Port `0` lets the operating
    /// system choose.
    #[serde(default = "PeerListener::default_bind_address")]
    pub bind_address: SocketAddr,

    /// Seconds a connection has to send its handshake.
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "PeerListener::default_handshake_timeout")]
    pub handshake_timeout: Duration,

    /// Whether to answer an accepted handshake with our own.
    #[serde(default = "PeerListener::default_reply_handshake")]
    pub reply_handshake: bool,
}

impl Default for PeerListener {
    fn default() -> Self {
        Self {
            bind_address: Self::default_bind_address(),
            handshake_timeout: Self::default_handshake_timeout(),
            reply_handshake: Self::default_reply_handshake(),
        }
    }
}

impl PeerListener {
    fn default_bind_address() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 16_384)
    }

    fn default_handshake_timeout() -> Duration {
        Duration::from_secs(10)
    }

    fn default_reply_handshake() -> bool {
        true
    }
}
