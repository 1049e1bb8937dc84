use std::net::IpAddr;

use derive_more::Display;
use swarm_canary_primitives::info_hash::InfoHash;
use swarm_canary_primitives::DurationSinceUnixEpoch;

/// Where an address was observed.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// An announce request to the canary tracker.
    #[display("tracker")]
    Tracker,
    /// A handshake on the canary peer listener.
    #[display("peer")]
    Peer,
}

/// An address observed in the canary swarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanaryEvent {
    pub observed: IpAddr,
    pub source: Source,
    pub info_hash: InfoHash,
    pub timestamp: DurationSinceUnixEpoch,
    /// The address the same peer id was registered from before, when it was
    /// a different one.
    pub previous_address: Option<IpAddr>,
}

impl CanaryEvent {
    #[must_use]
    pub fn new(observed: IpAddr, source: Source, info_hash: InfoHash, timestamp: DurationSinceUnixEpoch) -> Self {
        Self {
            observed,
            source,
            info_hash,
            timestamp,
            previous_address: None,
        }
    }

    #[must_use]
    pub fn with_previous_address(mut self, previous_address: Option<IpAddr>) -> Self {
        self.previous_address = previous_address.filter(|previous| *previous != self.observed);
        self
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};
    use std::time::Duration;

    use swarm_canary_primitives::info_hash::InfoHash;

    use super::{CanaryEvent, Source};

    #[test]
    fn the_source_should_be_displayed_in_lowercase() {
        assert_eq!(Source::Tracker.to_string(), "tracker");
        assert_eq!(Source::Peer.to_string(), "peer");
    }

    #[test]
    fn the_previous_address_should_be_dropped_when_it_is_the_observed_one() {
        let ip = IpAddr::V4(Ipv4Addr::new(203, 0, 113, 5));

        let event =
            CanaryEvent::new(ip, Source::Tracker, InfoHash([0x11; 20]), Duration::from_secs(1)).with_previous_address(Some(ip));

        assert_eq!(event.previous_address, None);
    }
}
