//! Content descriptors and the content hash that identifies the canary swarm.
//!
//! A [`Descriptor`] is the single-file `info` dictionary of a torrent file:
//!
//! ```text
//! {
//!     "length": <total length in bytes>,
//!     "name": <file name>,
//!     "piece length": <bytes per piece>,
//!     "pieces": <concatenated 20-byte SHA-1 digests, one per piece>
//! }
//! ```
//!
//! The content hash (the `InfoHash`) is the SHA-1 digest of its canonical
//! bencoding. Since the bencode encoder always sorts dictionary keys, the same
//! descriptor always produces the same hash.
//!
//! The operator can skip all of this and give the tracked hash as a literal.
//! See [`parse_info_hash`].
use std::fs::File;
use std::io::{BufReader, Read};
use std::net::Ipv6Addr;
use std::panic::Location;
use std::str::FromStr;
use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use sha1::{Digest, Sha1};
use swarm_canary_contrib_bencode::{ben_bytes, ben_int, ben_map, BencodeMut};
use swarm_canary_primitives::info_hash::InfoHash;
use thiserror::Error;
use tracing::{error, info};

const CONTENT_LOG_TARGET: &str = "CONTENT";

/// Length of a single piece digest.
pub const PIECE_HASH_LEN: usize = 20;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("could not read {path}: {source}, {location}")]
    Io {
        path: Utf8PathBuf,
        source: Arc<std::io::Error>,
        location: &'static Location<'static>,
    },

    #[error("path {path} has no file name, {location}")]
    NoFileName {
        path: Utf8PathBuf,
        location: &'static Location<'static>,
    },

    #[error("the piece length must be greater than zero, {location}")]
    ZeroPieceLength { location: &'static Location<'static> },

    #[error("invalid hash {literal:?}, expected 40 hex characters or 20 raw bytes, {location}")]
    InvalidHash {
        literal: String,
        location: &'static Location<'static>,
    },
}

/// The `info` dictionary of a single-file torrent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub name: String,
    pub piece_length: u64,
    pub pieces: Vec<[u8; PIECE_HASH_LEN]>,
    pub length: u64,
}

impl Descriptor {
    /// The canonical bencode form of the descriptor.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn to_bencode(&self) -> BencodeMut<'_> {
        ben_map! {
            "length" => ben_int!(self.length as i64),
            "name" => ben_bytes!(self.name.as_str()),
            "piece length" => ben_int!(self.piece_length as i64),
            "pieces" => ben_bytes!(self.pieces.concat())
        }
    }

    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        self.to_bencode().encode()
    }
}

/// Builds the descriptor of the file at `path`, hashing it in
/// `piece_length` chunks. The last chunk may be shorter.
///
/// # Errors
///
/// Will return an error if the piece length is zero, the path has no file name
/// or the file can't be read.
#[track_caller]
pub fn build_descriptor(path: &Utf8Path, piece_length: u64) -> Result<Descriptor, Error> {
    let location = Location::caller();

    if piece_length == 0 {
        return Err(Error::ZeroPieceLength { location });
    }

    let Some(name) = path.file_name() else {
        return Err(Error::NoFileName {
            path: path.to_owned(),
            location,
        });
    };

    let io_error = |source: std::io::Error| Error::Io {
        path: path.to_owned(),
        source: Arc::new(source),
        location,
    };

    let mut reader = BufReader::new(File::open(path).map_err(io_error)?);

    let mut pieces: Vec<[u8; PIECE_HASH_LEN]> = Vec::new();
    let mut length = 0;

    loop {
        let mut piece = Vec::new();

        let read = (&mut reader).take(piece_length).read_to_end(&mut piece).map_err(io_error)? as u64;

        if read == 0 {
            break;
        }

        length += read;
        pieces.push(Sha1::digest(&piece).into());

        if read < piece_length {
            break;
        }
    }

    Ok(Descriptor {
        name: name.to_owned(),
        piece_length,
        pieces,
        length,
    })
}

/// The content hash of a descriptor: the SHA-1 of its canonical bencoding.
#[must_use]
pub fn hash_of(descriptor: &Descriptor) -> InfoHash {
    InfoHash(Sha1::digest(descriptor.encode()).into())
}

/// Parses a literal content hash, given either as 40 hex characters in any
/// case or as exactly 20 raw bytes.
///
/// # Errors
///
/// Will return `Error::InvalidHash` for anything else.
#[track_caller]
pub fn parse_info_hash(literal: &str) -> Result<InfoHash, Error> {
    if let Ok(info_hash) = InfoHash::from_str(literal) {
        return Ok(info_hash);
    }

    InfoHash::try_from(literal.as_bytes()).map_err(|_| Error::InvalidHash {
        literal: literal.to_owned(),
        location: Location::caller(),
    })
}

/// The `announce` URL that points clients at the canary tracker. IPv6 hosts
/// are bracketed.
#[must_use]
pub fn announce_url(host: &str, tracker_port: u16) -> String {
    match host.parse::<Ipv6Addr>() {
        Ok(ip) => format!("http://[{ip}]:{tracker_port}/announce"),
        Err(_) => format!("http://{host}:{tracker_port}/announce"),
    }
}

/// Writes a torrent file for the descriptor, announcing to `announce_url`.
///
/// Failing to write the file does not invalidate the computed hash, so the
/// failure is only logged.
pub fn write_descriptor_file(descriptor: &Descriptor, announce_url: &str, path: &Utf8Path) {
    let torrent = ben_map! {
        "announce" => ben_bytes!(announce_url),
        "info" => descriptor.to_bencode()
    };

    match std::fs::write(path, torrent.encode()) {
        Ok(()) => info!(target: CONTENT_LOG_TARGET, "Torrent file written to: {path}"),
        Err(err) => error!(target: CONTENT_LOG_TARGET, "Could not write the torrent file {path}: {err}"),
    }
}
