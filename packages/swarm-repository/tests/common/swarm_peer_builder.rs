use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use swarm_canary_primitives::announce_event::AnnounceEvent;
use swarm_canary_primitives::peer;
use swarm_canary_primitives::peer::fixture::PeerBuilder;

/// A peer that announced `started` from its own address at `updated` seconds.
#[must_use]
pub fn a_started_peer(id: i32, updated: u64) -> peer::Peer {
    PeerBuilder::default()
        .with_peer_id(&peer::Id::from(id))
        .with_peer_addr(&an_address(id))
        .with_bytes_pending_to_download(1)
        .with_event(AnnounceEvent::Started)
        .last_updated_on(Duration::from_secs(updated))
        .build()
}

/// A peer that announced `completed` from its own address at `updated` seconds.
#[must_use]
pub fn a_completed_peer(id: i32, updated: u64) -> peer::Peer {
    PeerBuilder::default()
        .with_peer_id(&peer::Id::from(id))
        .with_peer_addr(&an_address(id))
        .with_no_bytes_pending_to_download()
        .with_event(AnnounceEvent::Completed)
        .last_updated_on(Duration::from_secs(updated))
        .build()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn an_address(id: i32) -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(203, 0, 113, id as u8)), 6881)
}
