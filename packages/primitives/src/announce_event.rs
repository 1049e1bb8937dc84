use std::panic::Location;
use std::str::FromStr;

use derive_more::Display;
use thiserror::Error;

/// Announce events. Described on the
/// [BEP 3. The `BitTorrent` Protocol Specification](https://www.bittorrent.org/beps/bep_0003.html)
#[derive(Hash, Clone, Copy, Debug, Display, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum AnnounceEvent {
    /// The peer has started downloading the torrent.
    #[display("started")]
    Started,
    /// The peer has ceased downloading the torrent.
    #[display("stopped")]
    Stopped,
    /// The peer has completed downloading the torrent.
    #[display("completed")]
    Completed,
    /// One of the announcements done at regular intervals, or a peer seen
    /// through a handshake rather than an announce.
    #[default]
    #[display("")]
    None,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("unknown announce event {value:?}, {location}")]
pub struct ParseAnnounceEventError {
    pub value: String,
    pub location: &'static Location<'static>,
}

impl FromStr for AnnounceEvent {
    type Err = ParseAnnounceEventError;

    #[track_caller]
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "started" => Ok(Self::Started),
            "stopped" => Ok(Self::Stopped),
            "completed" => Ok(Self::Completed),
            "empty" | "" => Ok(Self::None),
            _ => Err(ParseAnnounceEventError {
                value: raw.to_owned(),
                location: Location::caller(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::AnnounceEvent;

    #[test]
    fn it_should_parse_the_announce_events_sent_by_clients() {
        assert_eq!(AnnounceEvent::from_str("started").unwrap(), AnnounceEvent::Started);
        assert_eq!(AnnounceEvent::from_str("stopped").unwrap(), AnnounceEvent::Stopped);
        assert_eq!(AnnounceEvent::from_str("completed").unwrap(), AnnounceEvent::Completed);
        assert_eq!(AnnounceEvent::from_str("empty").unwrap(), AnnounceEvent::None);
    }

    #[test]
    fn it_should_fail_parsing_an_unknown_event() {
        assert!(AnnounceEvent::from_str("paused").is_err());
    }
}
