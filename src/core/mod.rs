//! The core `canary` module contains the logic that turns a `BitTorrent`
//! swarm into an IP-exposure sensor. It is independent of the delivery layer.
//!
//! The canary tracks one swarm, identified by a content hash (the
//! [`InfoHash`]). The hash is either given by the operator or computed from a
//! file with the [`content`] builder. Then:
//!
//! 1. A client that is told about the hash (typically through the torrent file)
//!    announces itself to the canary HTTP tracker. The tracker registers it in
//!    the swarm and answers with a peer list that contains the canary's own
//!    peer listener.
//! 2. The client connects to the peer listener and sends the peer wire
//!    handshake for the hash.
//! 3. Both the announce and the handshake reveal the client's network address.
//!    Each one is reported to the [`canary`] evaluator, which runs the
//!    operator's notify command when the address is not one of the expected
//!    addresses.
//!
//! If the client's traffic is supposed to go through a VPN, the only expected
//! address is the VPN exit. Any other address means the traffic leaked.
//!
//! The [`Canary`] service is the shared state behind both servers:
//!
//! - the tracked hash and the announce policy,
//! - the swarm registry,
//! - the sender for the canary events.
//!
//! ```text
//! Delivery layer     Domain layer
//!
//!     HTTP tracker |
//!    Peer listener |> Canary --> swarm registry
//!                  |         \-> canary events
//! ```
//!
//! # Announce
//!
//! The `announce` operation registers the peer and reports its address. Only
//! the tracked hash is registered and reported. Any other hash is answered
//! with an empty swarm.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use swarm_canary_configuration::AnnouncePolicy;
//! use swarm_canary_primitives::peer;
//! use swarm_canary_primitives::swarm_metadata::SwarmMetadata;
//! use swarm_canary::core::OwnPeer;
//!
//! pub struct AnnounceData {
//!     pub own: Option<OwnPeer>,          // the canary's own peer listener
//!     pub peers: Vec<Arc<peer::Peer>>,   // the other peers in the swarm
//!     pub stats: SwarmMetadata,
//!     pub policy: AnnouncePolicy,
//! }
//! ```
//!
//! # Handshake
//!
//! A peer that completed a handshake for the tracked hash is registered too,
//! with the address of its connection, so tracker clients learn about it.
pub mod canary;
pub mod content;

use std::net::IpAddr;
use std::sync::{Arc, OnceLock};

use derive_more::Constructor;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use swarm_canary_clock::clock::Time;
use swarm_canary_configuration::{Advertise, AnnouncePolicy, Configuration};
use swarm_canary_primitives::announce_event::AnnounceEvent;
use swarm_canary_primitives::info_hash::InfoHash;
use swarm_canary_primitives::swarm_metadata::SwarmMetadata;
use swarm_canary_primitives::{peer, NumberOfBytes};
use swarm_canary_swarm_repository::repository::Repository;
use swarm_canary_swarm_repository::SwarmsRwLockStd;
use tracing::{debug, error};

use self::canary::event::{CanaryEvent, Source};
use self::canary::expected::normalize;
use self::canary::{EventSender, CANARY_LOG_TARGET};
use crate::CurrentClock;

/// Prefix of the canary's own peer id, in the Azureus style.
pub const PEER_ID_PREFIX: &[u8; 8] = b"-SC0100-";

/// A new peer id for the canary: the prefix followed by 12 random
/// alphanumerics.
#[must_use]
pub fn generate_peer_id() -> peer::Id {
    let mut id = [0u8; 20];

    id[..PEER_ID_PREFIX.len()].copy_from_slice(PEER_ID_PREFIX);

    for (byte, random) in id[PEER_ID_PREFIX.len()..]
        .iter_mut()
        .zip(thread_rng().sample_iter(&Alphanumeric))
    {
        *byte = random;
    }

    peer::Id(id)
}

/// The canary's own peer listener, as advertised in announce responses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnPeer {
    pub peer_id: peer::Id,
    /// The configured host, which may be a domain name.
    pub host: String,
    /// The address the listener is reachable on, when it is known.
    pub ip: Option<IpAddr>,
    pub port: u16,
}

/// Structure that holds the data returned by the `announce` request.
#[derive(Clone, Debug, PartialEq, Constructor, Default)]
pub struct AnnounceData {
    /// The canary's own peer listener. It's absent for untracked hashes.
    pub own: Option<OwnPeer>,
    /// The other peers in the swarm. It excludes the peer that made the request.
    pub peers: Vec<Arc<peer::Peer>>,
    /// Swarm statistics. The canary's own listener counts as a seeder.
    pub stats: SwarmMetadata,
    pub policy: AnnouncePolicy,
}

/// The domain layer canary service.
///
/// > **NOTICE**: the `Canary` is not responsible for handling the network
/// layer. The HTTP tracker and the peer listener share it.
pub struct Canary {
    info_hash: InfoHash,
    announce_policy: AnnouncePolicy,
    max_peers: usize,
    own_peer_id: peer::Id,
    own_host: String,
    own_host_ip: Option<IpAddr>,
    external_ip: Option<IpAddr>,
    advertise: Advertise,
    configured_listener_port: u16,
    listener_port: OnceLock<u16>,
    pub swarms: Arc<SwarmsRwLockStd>,
    event_sender: Box<dyn EventSender>,
}

impl Canary {
    #[must_use]
    pub fn new(config: &Configuration, info_hash: InfoHash, event_sender: Box<dyn EventSender>) -> Canary {
        Canary {
            info_hash,
            announce_policy: config.core.announce_policy,
            max_peers: config.http_tracker.max_peers,
            own_peer_id: generate_peer_id(),
            own_host: config.core.net.host.clone(),
            own_host_ip: config.core.net.host_ip(),
            external_ip: config.core.net.external_ip,
            advertise: config.core.net.advertise,
            configured_listener_port: config.peer_listener.bind_address.port(),
            listener_port: OnceLock::new(),
            swarms: Arc::new(SwarmsRwLockStd::new(config.core.swarm_policy)),
            event_sender,
        }
    }

    /// The hash of the one swarm the canary watches.
    #[must_use]
    pub fn info_hash(&self) -> InfoHash {
        self.info_hash
    }

    #[must_use]
    pub fn is_tracked(&self, info_hash: &InfoHash) -> bool {
        self.info_hash == *info_hash
    }

    #[must_use]
    pub fn get_announce_policy(&self) -> AnnouncePolicy {
        self.announce_policy
    }

    #[must_use]
    pub fn own_peer_id(&self) -> peer::Id {
        self.own_peer_id
    }

    /// Records the port the peer listener was actually bound to. Until then,
    /// the configured one is advertised. Only the first call has any effect.
    pub fn set_listener_port(&self, port: u16) {
        if self.listener_port.set(port).is_err() {
            debug!(target: CANARY_LOG_TARGET, "the peer listener port was already set");
        }
    }

    /// The port the peer listener is advertised on.
    #[must_use]
    pub fn listener_port(&self) -> u16 {
        self.listener_port.get().copied().unwrap_or(self.configured_listener_port)
    }

    /// The canary's own peer as advertised to a client that reached the
    /// tracker at `local_ip`.
    ///
    /// The external IP always wins. Otherwise the advertise mode picks either
    /// the configured host or `local_ip`.
    #[must_use]
    pub fn own_peer(&self, local_ip: &IpAddr) -> OwnPeer {
        let ip = match (self.external_ip, self.advertise) {
            (Some(external_ip), _) => Some(external_ip),
            (None, Advertise::Host) => self.own_host_ip,
            (None, Advertise::Infer) => Some(normalize(*local_ip)),
        };

        OwnPeer {
            peer_id: self.own_peer_id,
            host: ip.map_or_else(|| self.own_host.clone(), |ip| ip.to_string()),
            ip,
            port: self.listener_port(),
        }
    }

    /// It handles an announce request.
    ///
    /// The peer address is always the transport-level source address of the
    /// request, never an address reported by the client. `local_ip` is the
    /// address the request was received on.
    ///
    /// Announces for any hash other than the tracked one are answered with an
    /// empty swarm. They are neither registered nor reported.
    pub async fn announce(
        &self,
        info_hash: &InfoHash,
        peer: &mut peer::Peer,
        remote_client_ip: &IpAddr,
        local_ip: &IpAddr,
    ) -> AnnounceData {
        if !self.is_tracked(info_hash) {
            debug!(target: CANARY_LOG_TARGET, "announce for untracked hash {info_hash} from {remote_client_ip}");

            return AnnounceData {
                own: None,
                peers: vec![],
                stats: SwarmMetadata::zeroed(),
                policy: self.get_announce_policy(),
            };
        }

        let now = CurrentClock::now();

        peer.change_ip(remote_client_ip);
        peer.updated = now;

        let previous = self.swarms.register(info_hash, peer, now);

        self.send_event(
            CanaryEvent::new(peer.ip(), Source::Tracker, *info_hash, now).with_previous_address(previous.map(|p| p.ip())),
        )
        .await;

        let mut stats = self.swarms.get_swarm_metadata(info_hash);
        stats.complete += 1;

        let peers = self
            .swarms
            .list(info_hash, Some(&peer.peer_id), self.max_peers.saturating_sub(1), now);

        AnnounceData {
            own: Some(self.own_peer(local_ip)),
            peers,
            stats,
            policy: self.get_announce_policy(),
        }
    }

    /// It handles a peer that completed the handshake for the tracked hash:
    /// the address is reported and the peer joins the swarm.
    ///
    /// A handshake carries no transfer counters. The peer is registered as
    /// still downloading, since it connected to the canary to get the content.
    pub async fn handshake(&self, peer_id: peer::Id, peer_addr: std::net::SocketAddr) {
        let now = CurrentClock::now();

        let peer = peer::Peer {
            peer_id,
            peer_addr,
            updated: now,
            uploaded: NumberOfBytes::new(0),
            downloaded: NumberOfBytes::new(0),
            left: NumberOfBytes::new(1),
            event: AnnounceEvent::None,
        };

        let previous = self.swarms.register(&self.info_hash, &peer, now);

        self.send_event(
            CanaryEvent::new(peer_addr.ip(), Source::Peer, self.info_hash, now).with_previous_address(previous.map(|p| p.ip())),
        )
        .await;
    }

    async fn send_event(&self, event: CanaryEvent) {
        if let Some(Err(err)) = self.event_sender.send_event(event).await {
            error!(target: CANARY_LOG_TARGET, "could not report {}: {err}", err.0.observed);
        }
    }
}
