//! The `BitTorrent` peer-wire handshake.
use std::net::SocketAddr;
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use derive_more::Display;
use swarm_canary_primitives::info_hash::InfoHash;
use swarm_canary_primitives::peer;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use super::PEER_LISTENER_LOG_TARGET;
use crate::core::Canary;

/// The protocol name every handshake starts with.
pub const PROTOCOL: &[u8; 19] = b"BitTorrent protocol";

/// The first byte of every handshake: the length of [`PROTOCOL`].
pub const PROTOCOL_NAME_LEN: u8 = 19;

/// The length of a full handshake message.
pub const HANDSHAKE_LEN: usize = 1 + PROTOCOL.len() + 8 + 20 + 20;

/// Why a handshake was not accepted.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch {
    /// The connection does not speak the `BitTorrent` protocol.
    #[display("unknown protocol name")]
    ProtocolName,
    /// The connection is for a swarm the canary does not track.
    #[display("untracked info hash {_0}")]
    InfoHash(InfoHash),
}

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("handshake from {remote} not completed within {timeout:?}, {location}")]
    HandshakeTimeout {
        remote: SocketAddr,
        timeout: Duration,
        location: &'static Location<'static>,
    },

    #[error("handshake mismatch from {remote}: {mismatch}, {location}")]
    HandshakeMismatch {
        remote: SocketAddr,
        mismatch: Mismatch,
        location: &'static Location<'static>,
    },

    #[error("connection with {remote} failed: {source}, {location}")]
    Io {
        remote: SocketAddr,
        source: Arc<std::io::Error>,
        location: &'static Location<'static>,
    },
}

/// A handshake message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Handshake {
    pub reserved: [u8; 8],
    pub info_hash: InfoHash,
    pub peer_id: peer::Id,
}

impl Handshake {
    /// A handshake with no extension bits set.
    #[must_use]
    pub fn new(info_hash: InfoHash, peer_id: peer::Id) -> Self {
        Self {
            reserved: [0; 8],
            info_hash,
            peer_id,
        }
    }

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HANDSHAKE_LEN);

        bytes.push(PROTOCOL_NAME_LEN);
        bytes.extend_from_slice(PROTOCOL);
        bytes.extend_from_slice(&self.reserved);
        bytes.extend_from_slice(&self.info_hash.0);
        bytes.extend_from_slice(&self.peer_id.0);

        bytes
    }
}

/// Reads a handshake for `tracked` from `reader`.
///
/// The fields are checked as they arrive. When the hash is not the tracked
/// one, the peer id is not read.
///
/// # Errors
///
/// Will return `Error::HandshakeMismatch` for a wrong protocol name or hash
/// and `Error::Io` when the stream fails or ends early.
pub async fn read_handshake<R>(reader: &mut R, tracked: &InfoHash, remote: SocketAddr) -> Result<Handshake, Error>
where
    R: AsyncRead + Unpin,
{
    let location = Location::caller();

    let io_error = |source: std::io::Error| Error::Io {
        remote,
        source: Arc::new(source),
        location,
    };

    let mismatch = |mismatch: Mismatch| Error::HandshakeMismatch {
        remote,
        mismatch,
        location,
    };

    let protocol_name_len = reader.read_u8().await.map_err(io_error)?;

    if protocol_name_len != PROTOCOL_NAME_LEN {
        return Err(mismatch(Mismatch::ProtocolName));
    }

    let mut protocol_name = [0u8; 19];
    reader.read_exact(&mut protocol_name).await.map_err(io_error)?;

    if &protocol_name != PROTOCOL {
        return Err(mismatch(Mismatch::ProtocolName));
    }

    let mut reserved = [0u8; 8];
    reader.read_exact(&mut reserved).await.map_err(io_error)?;

    let mut info_hash = InfoHash([0u8; 20]);
    reader.read_exact(&mut info_hash.0).await.map_err(io_error)?;

    if info_hash != *tracked {
        return Err(mismatch(Mismatch::InfoHash(info_hash)));
    }

    let mut peer_id = peer::Id([0u8; 20]);
    reader.read_exact(&mut peer_id.0).await.map_err(io_error)?;

    Ok(Handshake {
        reserved,
        info_hash,
        peer_id,
    })
}

/// It serves one connection to the peer listener.
///
/// A handshake for the tracked hash is reported to the canary and, when
/// `reply` is set, answered with the canary's own handshake. The connection is
/// closed afterwards in every case.
///
/// # Errors
///
/// Will return an error if the handshake is not received within
/// `handshake_timeout`, does not match, or the connection fails.
pub async fn handle_connection<S>(
    canary: Arc<Canary>,
    stream: &mut S,
    remote: SocketAddr,
    handshake_timeout: Duration,
    reply: bool,
) -> Result<(), Error>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let tracked = canary.info_hash();

    let handshake = match tokio::time::timeout(handshake_timeout, read_handshake(stream, &tracked, remote)).await {
        Ok(handshake) => handshake?,
        Err(_) => {
            return Err(Error::HandshakeTimeout {
                remote,
                timeout: handshake_timeout,
                location: Location::caller(),
            })
        }
    };

    canary.handshake(handshake.peer_id, remote).await;

    if reply {
        let own = Handshake::new(tracked, canary.own_peer_id());

        stream.write_all(&own.encode()).await.map_err(|source| Error::Io {
            remote,
            source: Arc::new(source),
            location: Location::caller(),
        })?;

        stream.flush().await.map_err(|source| Error::Io {
            remote,
            source: Arc::new(source),
            location: Location::caller(),
        })?;
    }

    Ok(())
}

/// Logs the outcome of a connection. Unrelated traffic is expected on an
/// open port, so mismatches only show up at debug level.
pub fn log_outcome(remote: SocketAddr, result: &Result<(), Error>) {
    match result {
        Ok(()) => info!(target: PEER_LISTENER_LOG_TARGET, "handshake from {remote} completed"),
        Err(err @ Error::HandshakeMismatch { .. }) => debug!(target: PEER_LISTENER_LOG_TARGET, "{err}"),
        Err(err @ Error::HandshakeTimeout { .. }) => info!(target: PEER_LISTENER_LOG_TARGET, "{err}"),
        Err(err @ Error::Io { .. }) => warn!(target: PEER_LISTENER_LOG_TARGET, "{err}"),
    }
}
