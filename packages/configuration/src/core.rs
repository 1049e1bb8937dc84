use std::net::{IpAddr, Ipv4Addr};

use serde::{Deserialize, Serialize};

use crate::AnnouncePolicy;

/// Settings shared by the tracker and the peer listener.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Default)]
pub struct Core {
    // Announce policy configuration.
    #[serde(default = "Core::default_announce_policy")]
    pub announce_policy: AnnouncePolicy,

    // Swarm registry configuration.
    #[serde(default = "Core::default_swarm_policy")]
    pub swarm_policy: SwarmPolicy,

    // Network configuration.
    #[serde(default = "Core::default_network")]
    pub net: Network,
}

impl Core {
    fn default_announce_policy() -> AnnouncePolicy {
        AnnouncePolicy::default()
    }

    fn default_swarm_policy() -> SwarmPolicy {
        SwarmPolicy::default()
    }

    fn default_network() -> Network {
        Network::default()
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy)]
pub struct SwarmPolicy {
    /// Seconds a peer record survives without being refreshed by a new
    /// announce or handshake. Twice the default announce interval.
    #[serde(default = "SwarmPolicy::default_peer_ttl")]
    pub peer_ttl: u32,
}

impl Default for SwarmPolicy {
    fn default() -> Self {
        Self {
            peer_ttl: Self::default_peer_ttl(),
        }
    }
}

impl SwarmPolicy {
    fn default_peer_ttl() -> u32 {
        2 * AnnouncePolicy::default().interval
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Network {
    /// The host peers are told to reach the canary on. It is used in the
    /// announce URL of the descriptor file and advertised as the canary's own
    /// peer.
    #[serde(default = "Network::default_host")]
    pub host: String,

    /// The public IP address of the canary. When set it is advertised in the
    /// announce responses, whatever the `advertise` mode.
    #[serde(default = "Network::default_external_ip")]
    pub external_ip: Option<IpAddr>,

    /// What is advertised as the canary's own peer when there is no
    /// `external_ip`.
    #[serde(default = "Network::default_advertise")]
    pub advertise: Advertise,
}

impl Default for Network {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            external_ip: Self::default_external_ip(),
            advertise: Self::default_advertise(),
        }
    }
}

impl Network {
    fn default_host() -> String {
        Ipv4Addr::LOCALHOST.to_string()
    }

    fn default_external_ip() -> Option<IpAddr> {
        None
    }

    fn default_advertise() -> Advertise {
        Advertise::default()
    }

    /// The host as an IP address, if it is one.
    #[must_use]
    pub fn host_ip(&self) -> Option<IpAddr> {
        self.host.parse().ok()
    }
}

/// How the canary's own peer address is chosen.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum Advertise {
    /// The configured `host`, which may be a domain name.
    Host,
    /// The local address of the connection each announce came in on, that is,
    /// the address the client already reached the canary at.
    #[default]
    Infer,
}
