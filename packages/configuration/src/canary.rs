use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationMilliSeconds, DurationSeconds};

/// What the canary watches for and what it does when it sees it.
#[serde_as]
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Canary {
    /// The tracked content hash, as 40 hex characters. When it is not set
    /// the hash is computed from `[content] file`.
    #[serde(default = "Canary::default_info_hash")]
    pub info_hash: Option<String>,

    /// Addresses that are allowed to show up in the swarm. An empty list
    /// makes every observation fire.
    #[serde(default = "Canary::default_expected_addresses")]
    pub expected_addresses: Vec<IpAddr>,

    /// The command run when an unexpected address is seen. Every `%IP`
    /// token is replaced with the address, for example:
    /// `notify-send "leak" %IP`.
    #[serde(default = "Canary::default_notify_command")]
    pub notify_command: String,

    /// Seconds during which repeated sightings of the same address do not
    /// run the command again.
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "Canary::default_cooldown")]
    pub cooldown: Duration,

    /// Milliseconds to wait for the command to exit before reporting it as
    /// still running.
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(default = "Canary::default_completion_check_ms")]
    pub completion_check_ms: Duration,
}

impl Default for Canary {
    fn default() -> Self {
        Self {
            info_hash: Self::default_info_hash(),
            expected_addresses: Self::default_expected_addresses(),
            notify_command: Self::default_notify_command(),
            cooldown: Self::default_cooldown(),
            completion_check_ms: Self::default_completion_check_ms(),
        }
    }
}

impl Canary {
    fn default_info_hash() -> Option<String> {
        None
    }

    fn default_expected_addresses() -> Vec<IpAddr> {
        vec![IpAddr::V4(Ipv4Addr::LOCALHOST), IpAddr::V6(Ipv6Addr::LOCALHOST)]
    }

    fn default_notify_command() -> String {
        String::new()
    }

    fn default_cooldown() -> Duration {
        Duration::from_secs(60)
    }

    fn default_completion_check_ms() -> Duration {
        Duration::from_millis(100)
    }
}
