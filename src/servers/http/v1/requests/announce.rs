//! `Announce` request for the HTTP tracker.
//!
//! Data structures and logic for parsing the `announce` request.
use std::fmt;
use std::panic::Location;
use std::str::FromStr;

use swarm_canary_primitives::announce_event::{AnnounceEvent, ParseAnnounceEventError};
use swarm_canary_primitives::info_hash::{ConversionError, InfoHash};
use swarm_canary_primitives::peer::{self, IdConversionError};
use thiserror::Error;

use crate::servers::http::percent_encoding::{percent_decode_info_hash, percent_decode_peer_id};
use crate::servers::http::v1::query::{ParseQueryError, Query};
use crate::servers::http::v1::responses;

/// The number of bytes `downloaded`, `uploaded` or `left`.
pub type NumberOfBytes = i64;

// Query param names
const INFO_HASH: &str = "info_hash";
const PEER_ID: &str = "peer_id";
const PORT: &str = "port";
const DOWNLOADED: &str = "downloaded";
const UPLOADED: &str = "uploaded";
const LEFT: &str = "left";
const EVENT: &str = "event";
const COMPACT: &str = "compact";

/// The `Announce` request. Fields use the domain types after parsing the
/// query params of the request.
///
/// ```rust
/// use swarm_canary::servers::http::v1::requests::announce::{Announce, Compact};
/// use swarm_canary_primitives::announce_event::AnnounceEvent;
/// use swarm_canary_primitives::info_hash::InfoHash;
/// use swarm_canary_primitives::peer;
///
/// let request = Announce {
///     // Mandatory params
///     info_hash: "3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0".parse::<InfoHash>().unwrap(),
///     peer_id: peer::Id(*b"-qB00000000000000001"),
///     port: 17548,
///     // Optional params
///     downloaded: Some(1),
///     uploaded: Some(2),
///     left: Some(3),
///     event: Some(AnnounceEvent::Started),
///     compact: Some(Compact::NotAccepted)
/// };
/// ```
///
/// > **NOTICE**: The struct does not contain the `IP` of the peer. The `IP`
/// is always the source address of the request.
#[derive(Debug, PartialEq)]
pub struct Announce {
    // Mandatory params
    /// The `InfoHash` of the torrent.
    pub info_hash: InfoHash,
    /// The `peer::Id` of the peer.
    pub peer_id: peer::Id,
    /// The port of the peer. Never `0`.
    pub port: u16,

    // Optional params
    /// The number of bytes downloaded by the peer.
    pub downloaded: Option<NumberOfBytes>,

    /// The number of bytes uploaded by the peer.
    pub uploaded: Option<NumberOfBytes>,

    /// The number of bytes left to download by the peer.
    pub left: Option<NumberOfBytes>,

    /// The event that the peer is reporting.
    pub event: Option<AnnounceEvent>,

    /// Whether the response should be in compact mode or not.
    pub compact: Option<Compact>,
}

/// Errors that can occur when parsing the `Announce` request.
///
/// The `info_hash` and `peer_id` query params are special because they contain
/// binary data. Both are 20-byte arrays.
#[derive(Error, Debug)]
pub enum ParseAnnounceQueryError {
    /// The request has no query at all.
    #[error("missing query params for announce request in {location}")]
    MissingParams { location: &'static Location<'static> },
    /// A mandatory param is missing.
    #[error("missing param {param_name} in {location}")]
    MissingParam {
        location: &'static Location<'static>,
        param_name: String,
    },
    /// The param cannot be parsed into the domain type.
    #[error("invalid param value {param_value} for {param_name} in {location}")]
    InvalidParam {
        param_name: String,
        param_value: String,
        location: &'static Location<'static>,
    },
    /// The param value is out of range.
    #[error("param value overflow {param_value} for {param_name} in {location}")]
    NumberOfBytesOverflow {
        param_name: String,
        param_value: String,
        location: &'static Location<'static>,
    },
    /// The `info_hash` is invalid.
    #[error("invalid param value {param_value} for {param_name}: {source}")]
    InvalidInfoHashParam {
        param_name: String,
        param_value: String,
        source: ConversionError,
    },
    /// The `peer_id` is invalid.
    #[error("invalid param value {param_value} for {param_name}: {source}")]
    InvalidPeerIdParam {
        param_name: String,
        param_value: String,
        source: IdConversionError,
    },
    /// The `event` is not one of the known events.
    #[error("invalid param value for {param_name}: {source}")]
    InvalidEventParam {
        param_name: String,
        source: ParseAnnounceEventError,
    },
}

/// Whether the `announce` response should be in compact mode or not.
///
/// Depending on the value of this param, the tracker will return a different
/// response:
///
/// - [`Normal`](crate::servers::http::v1::responses::announce::Normal) response.
/// - [`Compact`](crate::servers::http::v1::responses::announce::Compact) response.
///
/// Refer to [BEP 23. Tracker Returns Compact Peer Lists](https://www.bittorrent.org/beps/bep_0023.html)
#[derive(PartialEq, Debug)]
pub enum Compact {
    /// The client advises the tracker that the client prefers compact format.
    Accepted = 1,
    /// The client advises the tracker that is prefers the original format
    /// described in [BEP 03. The BitTorrent Protocol Specification](https://www.bittorrent.org/beps/bep_0003.html)
    NotAccepted = 0,
}

impl fmt::Display for Compact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Compact::Accepted => write!(f, "1"),
            Compact::NotAccepted => write!(f, "0"),
        }
    }
}

impl FromStr for Compact {
    type Err = ParseAnnounceQueryError;

    #[track_caller]
    fn from_str(raw_param: &str) -> Result<Self, Self::Err> {
        match raw_param {
            "1" => Ok(Self::Accepted),
            "0" => Ok(Self::NotAccepted),
            _ => Err(ParseAnnounceQueryError::InvalidParam {
                param_name: COMPACT.to_owned(),
                param_value: raw_param.to_owned(),
                location: Location::caller(),
            }),
        }
    }
}

impl From<ParseQueryError> for responses::error::Error {
    fn from(err: ParseQueryError) -> Self {
        responses::error::Error {
            failure_reason: format!("Cannot parse query params: {err}"),
        }
    }
}

impl From<ParseAnnounceQueryError> for responses::error::Error {
    fn from(err: ParseAnnounceQueryError) -> Self {
        responses::error::Error {
            failure_reason: format!("Cannot parse query params for announce request: {err}"),
        }
    }
}

impl TryFrom<Query> for Announce {
    type Error = ParseAnnounceQueryError;

    /// The mandatory params are checked in order: `info_hash`, `peer_id` and
    /// `port`. The first failure is the one reported.
    fn try_from(query: Query) -> Result<Self, Self::Error> {
        Ok(Self {
            info_hash: extract_info_hash(&query)?,
            peer_id: extract_peer_id(&query)?,
            port: extract_port(&query)?,
            downloaded: extract_downloaded(&query)?,
            uploaded: extract_uploaded(&query)?,
            left: extract_left(&query)?,
            event: extract_event(&query)?,
            compact: extract_compact(&query)?,
        })
    }
}

// Mandatory params

fn extract_info_hash(query: &Query) -> Result<InfoHash, ParseAnnounceQueryError> {
    match query.get_param(INFO_HASH) {
        Some(raw_param) => percent_decode_info_hash(&raw_param).map_err(|err| ParseAnnounceQueryError::InvalidInfoHashParam {
            param_name: INFO_HASH.to_owned(),
            param_value: raw_param.clone(),
            source: err,
        }),
        None => Err(ParseAnnounceQueryError::MissingParam {
            location: Location::caller(),
            param_name: INFO_HASH.to_owned(),
        }),
    }
}

fn extract_peer_id(query: &Query) -> Result<peer::Id, ParseAnnounceQueryError> {
    match query.get_param(PEER_ID) {
        Some(raw_param) => percent_decode_peer_id(&raw_param).map_err(|err| ParseAnnounceQueryError::InvalidPeerIdParam {
            param_name: PEER_ID.to_owned(),
            param_value: raw_param.clone(),
            source: err,
        }),
        None => Err(ParseAnnounceQueryError::MissingParam {
            location: Location::caller(),
            param_name: PEER_ID.to_owned(),
        }),
    }
}

fn extract_port(query: &Query) -> Result<u16, ParseAnnounceQueryError> {
    match query.get_param(PORT) {
        Some(raw_param) => match u16::from_str(&raw_param) {
            Ok(port) if port != 0 => Ok(port),
            _ => Err(ParseAnnounceQueryError::InvalidParam {
                param_name: PORT.to_owned(),
                param_value: raw_param.clone(),
                location: Location::caller(),
            }),
        },
        None => Err(ParseAnnounceQueryError::MissingParam {
            location: Location::caller(),
            param_name: PORT.to_owned(),
        }),
    }
}

// Optional params

fn extract_downloaded(query: &Query) -> Result<Option<NumberOfBytes>, ParseAnnounceQueryError> {
    extract_number_of_bytes_from_param(DOWNLOADED, query)
}

fn extract_uploaded(query: &Query) -> Result<Option<NumberOfBytes>, ParseAnnounceQueryError> {
    extract_number_of_bytes_from_param(UPLOADED, query)
}

fn extract_left(query: &Query) -> Result<Option<NumberOfBytes>, ParseAnnounceQueryError> {
    extract_number_of_bytes_from_param(LEFT, query)
}

fn extract_number_of_bytes_from_param(param_name: &str, query: &Query) -> Result<Option<NumberOfBytes>, ParseAnnounceQueryError> {
    match query.get_param(param_name) {
        Some(raw_param) => {
            let number_of_bytes = u64::from_str(&raw_param).map_err(|_e| ParseAnnounceQueryError::InvalidParam {
                param_name: param_name.to_owned(),
                param_value: raw_param.clone(),
                location: Location::caller(),
            })?;

            Ok(Some(i64::try_from(number_of_bytes).map_err(|_e| {
                ParseAnnounceQueryError::NumberOfBytesOverflow {
                    param_name: param_name.to_owned(),
                    param_value: raw_param.clone(),
                    location: Location::caller(),
                }
            })?))
        }
        None => Ok(None),
    }
}

fn extract_event(query: &Query) -> Result<Option<AnnounceEvent>, ParseAnnounceQueryError> {
    match query.get_param(EVENT) {
        Some(raw_param) => AnnounceEvent::from_str(&raw_param)
            .map(Some)
            .map_err(|err| ParseAnnounceQueryError::InvalidEventParam {
                param_name: EVENT.to_owned(),
                source: err,
            }),
        None => Ok(None),
    }
}

fn extract_compact(query: &Query) -> Result<Option<Compact>, ParseAnnounceQueryError> {
    match query.get_param(COMPACT) {
        Some(raw_param) => Ok(Some(Compact::from_str(&raw_param)?)),
        None => Ok(None),
    }
}
