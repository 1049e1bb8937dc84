//! `Announce` response for the HTTP tracker [`announce`](crate::servers::http::v1::requests::announce::Announce) request.
//!
//! Data structures and logic to build the `announce` response.
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

use axum::http::StatusCode;
use derive_more::{AsRef, Constructor, From};
use swarm_canary_contrib_bencode::{ben_bytes, ben_int, ben_map, BencodeMut};
use swarm_canary_primitives::peer;

use super::Response;
use crate::core::{AnnounceData, OwnPeer};
use crate::servers::http::v1::responses;

/// What the tracker answers to an announce: the swarm as seen by the canary
/// and the address the request came from.
#[derive(Clone, Debug, PartialEq, Constructor)]
pub struct AnnounceReply {
    pub data: AnnounceData,
    pub observed: IpAddr,
}

impl AnnounceReply {
    /// The `warning message` that tells the client the address the canary saw.
    #[must_use]
    pub fn warning_message(&self) -> String {
        format!("Your IP is {}", self.observed)
    }
}

/// An [`Announce`] response, that can be anything that is convertible from [`AnnounceReply`].
///
/// The two standard forms of an announce response are: [`Normal`] and [`Compact`].
///
/// _"To reduce the size of tracker responses and to reduce memory and
/// computational requirements in trackers, trackers may return peers as a
/// packed string rather than as a bencoded list."_
///
/// Refer to the official BEPs for more information:
///
/// - [BEP 03: The `BitTorrent` Protocol Specification](https://www.bittorrent.org/beps/bep_0003.html)
/// - [BEP 23: Tracker Returns Compact Peer Lists](https://www.bittorrent.org/beps/bep_0023.html)
/// - [BEP 07: IPv6 Tracker Extension](https://www.bittorrent.org/beps/bep_0007.html)
#[derive(Debug, AsRef, PartialEq, Constructor)]
pub struct Announce<E>
where
    E: From<AnnounceReply> + Into<Vec<u8>>,
{
    data: E,
}

/// Build any [`Announce`] from an [`AnnounceReply`].
impl<E: From<AnnounceReply> + Into<Vec<u8>>> From<AnnounceReply> for Announce<E> {
    fn from(reply: AnnounceReply) -> Self {
        Self::new(reply.into())
    }
}

/// Convert any Announce [`Announce`] into a [`axum::response::Response`]
impl<E: From<AnnounceReply> + Into<Vec<u8>>> axum::response::IntoResponse for Announce<E>
where
    Announce<E>: Response,
{
    fn into_response(self) -> axum::response::Response {
        axum::response::IntoResponse::into_response(self.body().map(|bytes| (StatusCode::OK, bytes)))
    }
}

impl<E: From<AnnounceReply> + Into<Vec<u8>>> Response for Announce<E> {
    fn body(self) -> Result<Vec<u8>, responses::error::Error> {
        Ok(self.data.into())
    }
}

/// Format of the [`Normal`] (Non-Compact) Encoding
pub struct Normal {
    complete: i64,
    incomplete: i64,
    interval: i64,
    min_interval: i64,
    peers: Vec<NormalPeer>,
    warning_message: String,
}

impl From<AnnounceReply> for Normal {
    fn from(reply: AnnounceReply) -> Self {
        let warning_message = reply.warning_message();
        let data = reply.data;

        let own = data.own.map(NormalPeer::from);
        let peers = own.into_iter().chain(data.peers.iter().map(NormalPeer::from)).collect();

        Self {
            complete: data.stats.complete.into(),
            incomplete: data.stats.incomplete.into(),
            interval: data.policy.interval.into(),
            min_interval: data.policy.interval_min.into(),
            peers,
            warning_message,
        }
    }
}

#[allow(clippy::from_over_into)]
impl Into<Vec<u8>> for Normal {
    fn into(self) -> Vec<u8> {
        let peers_list = BencodeMut::from_list(self.peers.iter().map(BencodeMut::from).collect());

        (ben_map! {
            "complete" => ben_int!(self.complete),
            "incomplete" => ben_int!(self.incomplete),
            "interval" => ben_int!(self.interval),
            "min interval" => ben_int!(self.min_interval),
            "peers" => peers_list,
            "warning message" => ben_bytes!(self.warning_message.as_str())
        })
        .encode()
    }
}

/// Format of the [`Compact`] Encoding
pub struct Compact {
    complete: i64,
    incomplete: i64,
    interval: i64,
    min_interval: i64,
    peers: Vec<u8>,
    peers6: Vec<u8>,
    warning_message: String,
}

impl From<AnnounceReply> for Compact {
    fn from(reply: AnnounceReply) -> Self {
        let warning_message = reply.warning_message();
        let data = reply.data;

        // The own listener can only be packed when its address is known.
        let own = data
            .own
            .and_then(|own| own.ip.map(|ip| CompactPeer::new(ip, own.port)));

        let (peers, peers6): (Vec<CompactPeerData<Ipv4Addr>>, Vec<CompactPeerData<Ipv6Addr>>) =
            own.into_iter().chain(data.peers.iter().map(CompactPeer::from)).collect();

        let peers_encoded: CompactPeersEncoded = peers.into_iter().collect();
        let peers_encoded_6: CompactPeersEncoded = peers6.into_iter().collect();

        Self {
            complete: data.stats.complete.into(),
            incomplete: data.stats.incomplete.into(),
            interval: data.policy.interval.into(),
            min_interval: data.policy.interval_min.into(),
            peers: peers_encoded.0,
            peers6: peers_encoded_6.0,
            warning_message,
        }
    }
}

#[allow(clippy::from_over_into)]
impl Into<Vec<u8>> for Compact {
    fn into(self) -> Vec<u8> {
        (ben_map! {
            "complete" => ben_int!(self.complete),
            "incomplete" => ben_int!(self.incomplete),
            "interval" => ben_int!(self.interval),
            "min interval" => ben_int!(self.min_interval),
            "peers" => ben_bytes!(self.peers),
            "peers6" => ben_bytes!(self.peers6),
            "warning message" => ben_bytes!(self.warning_message.as_str())
        })
        .encode()
    }
}

/// A [`NormalPeer`], for the [`Normal`] form.
///
/// The `ip` is text. For the canary's own listener it can be a host name.
///
/// ```rust
/// use swarm_canary::servers::http::v1::responses::announce::NormalPeer;
///
/// let peer = NormalPeer {
///     peer_id: *b"-qB00000000000000001",
///     ip: "105.105.105.105".to_string(),
///     port: 0x7070, // 28784
/// };
/// ```
#[derive(Debug, PartialEq)]
pub struct NormalPeer {
    /// The peer's ID.
    pub peer_id: [u8; 20],
    /// The peer's IP address or host name.
    pub ip: String,
    /// The peer's port number.
    pub port: u16,
}

impl From<&Arc<peer::Peer>> for NormalPeer {
    fn from(peer: &Arc<peer::Peer>) -> Self {
        NormalPeer {
            peer_id: peer.peer_id.0,
            ip: peer.peer_addr.ip().to_string(),
            port: peer.peer_addr.port(),
        }
    }
}

impl From<OwnPeer> for NormalPeer {
    fn from(own: OwnPeer) -> Self {
        NormalPeer {
            peer_id: own.peer_id.0,
            ip: own.host,
            port: own.port,
        }
    }
}

impl From<&NormalPeer> for BencodeMut<'_> {
    fn from(value: &NormalPeer) -> Self {
        ben_map! {
            "peer id" => ben_bytes!(value.peer_id.to_vec()),
            "ip" => ben_bytes!(value.ip.clone()),
            "port" => ben_int!(i64::from(value.port))
        }
    }
}

/// A [`CompactPeer`], for the [`Compact`] form.
///
/// Apart from reducing the size of the response, this format does not contain
/// the peer's ID.
///
/// Refer to [BEP 23: Tracker Returns Compact Peer Lists](https://www.bittorrent.org/beps/bep_0023.html)
/// for more information.
#[derive(Clone, Debug, PartialEq)]
pub enum CompactPeer {
    /// An IPv4 peer, 6 bytes once packed.
    V4(CompactPeerData<Ipv4Addr>),
    /// An IPv6 peer, 18 bytes once packed.
    V6(CompactPeerData<Ipv6Addr>),
}

impl CompactPeer {
    #[must_use]
    pub fn new(ip: IpAddr, port: u16) -> Self {
        match ip {
            IpAddr::V4(ip) => Self::V4(CompactPeerData { ip, port }),
            IpAddr::V6(ip) => Self::V6(CompactPeerData { ip, port }),
        }
    }
}

impl From<&Arc<peer::Peer>> for CompactPeer {
    fn from(peer: &Arc<peer::Peer>) -> Self {
        Self::new(peer.peer_addr.ip(), peer.peer_addr.port())
    }
}

/// The [`CompactPeerData`], made with either a [`Ipv4Addr`], or [`Ipv6Addr`] along with a `port`.
#[derive(Clone, Debug, PartialEq)]
pub struct CompactPeerData<V> {
    /// The peer's IP address.
    pub ip: V,
    /// The peer's port number.
    pub port: u16,
}

impl FromIterator<CompactPeer> for (Vec<CompactPeerData<Ipv4Addr>>, Vec<CompactPeerData<Ipv6Addr>>) {
    fn from_iter<T: IntoIterator<Item = CompactPeer>>(iter: T) -> Self {
        let mut peers_v4: Vec<CompactPeerData<Ipv4Addr>> = vec![];
        let mut peers_v6: Vec<CompactPeerData<Ipv6Addr>> = vec![];

        for peer in iter {
            match peer {
                CompactPeer::V4(peer) => peers_v4.push(peer),
                CompactPeer::V6(peer6) => peers_v6.push(peer6),
            }
        }

        (peers_v4, peers_v6)
    }
}

#[derive(From, PartialEq)]
struct CompactPeersEncoded(Vec<u8>);

impl FromIterator<CompactPeerData<Ipv4Addr>> for CompactPeersEncoded {
    fn from_iter<T: IntoIterator<Item = CompactPeerData<Ipv4Addr>>>(iter: T) -> Self {
        let mut bytes: Vec<u8> = vec![];

        for peer in iter {
            bytes.extend_from_slice(&peer.ip.octets());
            bytes.extend_from_slice(&peer.port.to_be_bytes());
        }

        bytes.into()
    }
}

impl FromIterator<CompactPeerData<Ipv6Addr>> for CompactPeersEncoded {
    fn from_iter<T: IntoIterator<Item = CompactPeerData<Ipv6Addr>>>(iter: T) -> Self {
        let mut bytes: Vec<u8> = Vec::new();

        for peer in iter {
            bytes.extend_from_slice(&peer.ip.octets());
            bytes.extend_from_slice(&peer.port.to_be_bytes());
        }

        bytes.into()
    }
}
