use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use swarm_canary_configuration::{Configuration, Threshold};

use crate::random;

/// This configuration is used for testing. It binds every server to an
/// ephemeral port on the loopback interface, so more than one canary can
/// run at the same time, and it tracks a random hash.
///
/// Loopback is expected, so requests sent by the tests do not fire the
/// canary unless the expected addresses are changed.
#[must_use]
pub fn ephemeral() -> Configuration {
    let mut config = Configuration::default();

    config.logging.threshold = Threshold::Off; // Change to `debug` for tests debugging

    config.canary.info_hash = Some(random::info_hash().to_hex_string());
    config.canary.notify_command = "echo %IP".to_owned();

    // Nothing is hashed or written to disk.
    config.content.file = None;
    config.content.torrent_file = None;

    // Ephemeral socket address for the HTTP tracker
    config.http_tracker.bind_address = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0);

    // Ephemeral socket address for the peer listener
    config.peer_listener.bind_address = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0);
    config.peer_listener.handshake_timeout = Duration::from_secs(2);

    config.shutdown.grace_period = Duration::from_secs(1);

    config
}

/// Same as [`ephemeral`] but only the given addresses are expected. With an
/// empty list every connection made by the tests fires the canary.
#[must_use]
pub fn ephemeral_with_expected_addresses(expected_addresses: Vec<IpAddr>) -> Configuration {
    let mut config = ephemeral();

    config.canary.expected_addresses = expected_addresses;

    config
}
