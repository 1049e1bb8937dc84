//! Peer records kept by the swarm registry.
//!
//! A sample peer:
//!
//! ```rust,no_run
//! use std::net::{IpAddr, Ipv4Addr, SocketAddr};
//!
//! use swarm_canary_primitives::announce_event::AnnounceEvent;
//! use swarm_canary_primitives::{peer, DurationSinceUnixEpoch, NumberOfBytes};
//!
//! peer::Peer {
//!     peer_id: peer::Id(*b"-qB00000000000000000"),
//!     peer_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::new(126, 0, 0, 1)), 8080),
//!     updated: DurationSinceUnixEpoch::new(1_669_397_478_934, 0),
//!     uploaded: NumberOfBytes::new(0),
//!     downloaded: NumberOfBytes::new(0),
//!     left: NumberOfBytes::new(0),
//!     event: AnnounceEvent::Started,
//! };
//! ```
use std::net::{IpAddr, SocketAddr};
use std::panic::Location;

use thiserror::Error;

use crate::announce_event::AnnounceEvent;
use crate::{DurationSinceUnixEpoch, IPVersion, NumberOfBytes};

pub const PEER_ID_BYTES_LEN: usize = 20;

/// A peer seen in the swarm, either through a tracker announce or a peer wire handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Peer {
    /// ID the peer presented.
    pub peer_id: Id,
    /// The transport address the peer was observed from. The port is the
    /// one the peer announced, or the connection's source port for handshakes.
    pub peer_addr: SocketAddr,
    /// Last time the peer was seen (timestamp).
    pub updated: DurationSinceUnixEpoch,
    /// The total amount of bytes uploaded by this peer so far.
    pub uploaded: NumberOfBytes,
    /// The total amount of bytes downloaded by this peer so far.
    pub downloaded: NumberOfBytes,
    /// The number of bytes this peer still has to download.
    pub left: NumberOfBytes,
    /// This is an optional key which maps to started, completed, or stopped (or empty, which is the same as not being present).
    pub event: AnnounceEvent,
}

impl Ord for Peer {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.peer_id.cmp(&other.peer_id)
    }
}

impl PartialOrd for Peer {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Peer {
    #[must_use]
    pub fn is_seeder(&self) -> bool {
        self.left.0 <= 0 && self.event != AnnounceEvent::Stopped
    }

    #[must_use]
    pub fn ip(&self) -> IpAddr {
        self.peer_addr.ip()
    }

    pub fn change_ip(&mut self, new_ip: &IpAddr) {
        self.peer_addr = SocketAddr::new(*new_ip, self.peer_addr.port());
    }

    /// The IP version used by the peer: IPV4 or IPV6
    #[must_use]
    pub fn ip_version(&self) -> IPVersion {
        if self.peer_addr.is_ipv4() {
            return IPVersion::IPv4;
        }
        IPVersion::IPv6
    }
}

/// Error returned when trying to convert an invalid peer id from another type.
///
/// Usually because the source format does not contain 20 bytes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IdConversionError {
    #[error("not enough bytes for peer id: {message} {location}")]
    NotEnoughBytes {
        location: &'static Location<'static>,
        message: String,
    },
    #[error("too many bytes for peer id: {message} {location}")]
    TooManyBytes {
        location: &'static Location<'static>,
        message: String,
    },
}

/// Peer ID. A 20 byte opaque token chosen by the peer.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Default, PartialOrd, Ord)]
pub struct Id(pub [u8; 20]);

impl From<[u8; 20]> for Id {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl From<i32> for Id {
    fn from(number: i32) -> Self {
        let mut bytes = [0u8; PEER_ID_BYTES_LEN];
        bytes[16..].copy_from_slice(&number.to_le_bytes());

        Id(bytes)
    }
}

impl TryFrom<&[u8]> for Id {
    type Error = IdConversionError;

    #[track_caller]
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let message = format!("got {} bytes, expected {}", bytes.len(), PEER_ID_BYTES_LEN);

        match <[u8; PEER_ID_BYTES_LEN]>::try_from(bytes) {
            Ok(data) => Ok(Self(data)),
            Err(_) if bytes.len() < PEER_ID_BYTES_LEN => Err(IdConversionError::NotEnoughBytes {
                location: Location::caller(),
                message,
            }),
            Err(_) => Err(IdConversionError::TooManyBytes {
                location: Location::caller(),
                message,
            }),
        }
    }
}

impl TryFrom<Vec<u8>> for Id {
    type Error = IdConversionError;

    #[track_caller]
    fn try_from(bytes: Vec<u8>) -> Result<Self, Self::Error> {
        Self::try_from(bytes.as_slice())
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex_string())
    }
}

impl Id {
    /// Converts to a `0x` prefixed hex string.
    ///
    /// For the `Id` `-qB00000000000000000` it returns `0x2d71423030303030303030303030303030303030`
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        let mut tmp = [0u8; PEER_ID_BYTES_LEN * 2];

        match binascii::bin2hex(&self.0, &mut tmp) {
            Ok(hex) => format!("0x{}", String::from_utf8_lossy(hex)),
            Err(_) => String::new(),
        }
    }

    /// The id as text, with non UTF-8 bytes replaced. Client ids are
    /// usually printable, e.g. `-qB4650-...`.
    #[must_use]
    pub fn to_lossy_string(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }
}

pub mod fixture {
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};

    use super::{Id, Peer};
    use crate::announce_event::AnnounceEvent;
    use crate::{DurationSinceUnixEpoch, NumberOfBytes};

    #[derive(PartialEq, Debug)]
    pub struct PeerBuilder {
        peer: Peer,
    }

    impl Default for PeerBuilder {
        fn default() -> Self {
            Self {
                peer: Peer {
                    peer_id: Id(*b"-qB00000000000000000"),
                    peer_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::new(126, 0, 0, 1)), 8080),
                    updated: DurationSinceUnixEpoch::new(1_669_397_478_934, 0),
                    uploaded: NumberOfBytes::new(0),
                    downloaded: NumberOfBytes::new(0),
                    left: NumberOfBytes::new(0),
                    event: AnnounceEvent::Started,
                },
            }
        }
    }

    impl PeerBuilder {
        #[must_use]
        pub fn seeder() -> Self {
            Self::default()
                .with_peer_id(&Id(*b"-qB00000000000000001"))
                .with_peer_addr(&SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)), 8080))
                .with_no_bytes_pending_to_download()
                .with_event(AnnounceEvent::Completed)
        }

        #[must_use]
        pub fn leecher() -> Self {
            Self::default()
                .with_peer_id(&Id(*b"-qB00000000000000002"))
                .with_peer_addr(&SocketAddr::new(IpAddr::V4(Ipv4Addr::new(127, 0, 0, 2)), 8080))
                .with_bytes_pending_to_download(10)
                .with_event(AnnounceEvent::Started)
        }

        #[must_use]
        pub fn with_peer_id(mut self, peer_id: &Id) -> Self {
            self.peer.peer_id = *peer_id;
            self
        }

        #[must_use]
        pub fn with_peer_addr(mut self, peer_addr: &SocketAddr) -> Self {
            self.peer.peer_addr = *peer_addr;
            self
        }

        #[must_use]
        pub fn with_bytes_pending_to_download(mut self, left: i64) -> Self {
            self.peer.left = NumberOfBytes::new(left);
            self
        }

        #[must_use]
        pub fn with_no_bytes_pending_to_download(mut self) -> Self {
            self.peer.left = NumberOfBytes::new(0);
            self
        }

        #[must_use]
        pub fn with_event(mut self, event: AnnounceEvent) -> Self {
            self.peer.event = event;
            self
        }

        #[must_use]
        pub fn last_updated_on(mut self, updated: DurationSinceUnixEpoch) -> Self {
            self.peer.updated = updated;
            self
        }

        #[must_use]
        pub fn build(self) -> Peer {
            self.peer
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv6Addr};

    use super::fixture::PeerBuilder;
    use super::{Id, IdConversionError};
    use crate::announce_event::AnnounceEvent;
    use crate::IPVersion;

    #[test]
    fn a_peer_id_should_be_displayed_as_a_prefixed_hex_string() {
        let id = Id(*b"-qB00000000000000000");

        assert_eq!(id.to_string(), "0x2d71423030303030303030303030303030303030");
    }

    #[test]
    fn a_peer_id_should_only_be_built_from_exactly_twenty_bytes() {
        assert!(Id::try_from(&b"-SC0100-abcdefghijkl"[..]).is_ok());
        assert!(matches!(
            Id::try_from(vec![0u8; 19]),
            Err(IdConversionError::NotEnoughBytes { .. })
        ));
        assert!(matches!(
            Id::try_from(vec![0u8; 21]),
            Err(IdConversionError::TooManyBytes { .. })
        ));
    }

    #[test]
    fn a_peer_with_nothing_left_to_download_should_be_a_seeder_unless_it_stopped() {
        assert!(PeerBuilder::seeder().build().is_seeder());
        assert!(!PeerBuilder::leecher().build().is_seeder());
        assert!(!PeerBuilder::seeder().with_event(AnnounceEvent::Stopped).build().is_seeder());
    }

    #[test]
    fn changing_the_ip_should_keep_the_port() {
        let mut peer = PeerBuilder::default().build();
        let new_ip = IpAddr::V6(Ipv6Addr::LOCALHOST);

        peer.change_ip(&new_ip);

        assert_eq!(peer.ip(), new_ip);
        assert_eq!(peer.peer_addr.port(), 8080);
        assert_eq!(peer.ip_version(), IPVersion::IPv6);
    }
}
