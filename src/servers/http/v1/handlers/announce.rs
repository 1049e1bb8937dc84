//! Axum [`handlers`](axum#handlers) for the `announce` requests.
//!
//! Refer to [HTTP server](crate::servers::http) for more information about the
//! `announce` request.
//!
//! The peer address is the source address of the connection. Nothing in the
//! request can change it. The local address of the connection is the one the
//! canary's own peer may be advertised on.
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::extract::{ConnectInfo, State};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use swarm_canary_clock::clock::Time;
use swarm_canary_primitives::{peer, NumberOfBytes};
use tracing::debug;

use crate::core::Canary;
use crate::servers::http::connection::LocalAddr;
use crate::servers::http::v1::extractors::announce_request::ExtractRequest;
use crate::servers::http::v1::requests::announce::{Announce, Compact};
use crate::servers::http::v1::responses::{self, AnnounceReply};
use crate::servers::http::HTTP_TRACKER_LOG_TARGET;
use crate::CurrentClock;

/// It handles the `announce` request.
pub async fn handle(
    State(canary): State<Arc<Canary>>,
    ConnectInfo(remote_addr): ConnectInfo<SocketAddr>,
    Extension(LocalAddr(local_addr)): Extension<LocalAddr>,
    ExtractRequest(announce_request): ExtractRequest,
) -> Response {
    debug!(target: HTTP_TRACKER_LOG_TARGET, "http announce request from {remote_addr} to {local_addr}: {:#?}", announce_request);

    let reply = handle_announce(&canary, &announce_request, &remote_addr.ip(), &local_addr.ip()).await;

    build_response(&announce_request, reply)
}

async fn handle_announce(
    canary: &Arc<Canary>,
    announce_request: &Announce,
    remote_client_ip: &IpAddr,
    local_ip: &IpAddr,
) -> AnnounceReply {
    let mut peer = peer_from_request(announce_request, remote_client_ip);

    let announce_data = canary
        .announce(&announce_request.info_hash, &mut peer, remote_client_ip, local_ip)
        .await;

    AnnounceReply::new(announce_data, *remote_client_ip)
}

fn build_response(announce_request: &Announce, reply: AnnounceReply) -> Response {
    if announce_request.compact.as_ref().is_some_and(|f| *f == Compact::Accepted) {
        let response: responses::Announce<responses::Compact> = reply.into();
        response.into_response()
    } else {
        let response: responses::Announce<responses::Normal> = reply.into();
        response.into_response()
    }
}

/// It builds a `Peer` from the announce request.
///
/// Absent counters default to zero. Absent events are `AnnounceEvent::None`.
#[must_use]
fn peer_from_request(announce_request: &Announce, peer_ip: &IpAddr) -> peer::Peer {
    peer::Peer {
        peer_id: announce_request.peer_id,
        peer_addr: SocketAddr::new(*peer_ip, announce_request.port),
        updated: CurrentClock::now(),
        uploaded: NumberOfBytes(announce_request.uploaded.unwrap_or(0)),
        downloaded: NumberOfBytes(announce_request.downloaded.unwrap_or(0)),
        left: NumberOfBytes(announce_request.left.unwrap_or(0)),
        event: announce_request.event.unwrap_or_default(),
    }
}
