use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};

/// Configuration for the HTTP tracker.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct HttpTracker {
    /// The address the tracker will bind to.
    /// The format is `ip:port`, for example `0.0.0.0:3000`. If you want to
    /// listen to all interfaces, use `0.0.0.0`. If you want the operating
    /// system to choose a random port, use port `0`.
    #[serde(default = "HttpTracker::default_bind_address")]
    pub bind_address: SocketAddr,

    /// Seconds a request may take before it is answered with a timeout.
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "HttpTracker::default_request_timeout")]
    pub request_timeout: Duration,

    /// Maximum number of peers returned in an announce response, the
    /// canary's own peer included.
    #[serde(default = "HttpTracker::default_max_peers")]
    pub max_peers: usize,
}

impl Default for HttpTracker {
    fn default() -> Self {
        Self {
            bind_address: Self::default_bind_address(),
            request_timeout: Self::default_request_timeout(),
            max_peers: Self::default_max_peers(),
        }
    }
}

impl HttpTracker {
    fn default_bind_address() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 3000)
    }

    fn default_request_timeout() -> Duration {
        Duration::from_secs(5)
    }

    fn default_max_peers() -> usize {
        50
    }
}
