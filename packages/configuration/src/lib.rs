//! Configuration data structures for the swarm canary.
//!
//! The configuration is loaded, in increasing order of priority, from:
//!
//! 1. The defaults defined in this crate.
//! 2. A TOML file, or the whole TOML document passed in the
//!    `SWARM_CANARY_CONFIG_TOML` environment variable.
//! 3. Environment variables prefixed with `SWARM_CANARY_CONFIG_OVERRIDE_`,
//!    using `__` to separate sections from keys. For example:
//!    `SWARM_CANARY_CONFIG_OVERRIDE_HTTP_TRACKER__BIND_ADDRESS=0.0.0.0:7070`.
//!
//! Each section in the TOML structure is mapped to a data structure:
//!
//! - [`Logging`]
//! - [`Core`]
//! - [`Canary`]
//! - [`Content`]
//! - [`HttpTracker`]
//! - [`PeerListener`]
//! - [`Shutdown`]
//!
//! Default configuration:
//!
//! ```toml
//! [logging]
//! threshold = "info"
//! style = "compact"
//!
//! [core.announce_policy]
//! interval = 300
//! interval_min = 120
//!
//! [core.swarm_policy]
//! peer_ttl = 600
//!
//! [core.net]
//! host = "127.0.0.1"
//! advertise = "infer"
//!
//! [canary]
//! expected_addresses = ["127.0.0.1", "::1"]
//! notify_command = ""
//! cooldown = 60
//! completion_check_ms = 100
//!
//! [content]
//! piece_length = 16384
//! torrent_file = "file.torrent"
//!
//! [http_tracker]
//! bind_address = "0.0.0.0:3000"
//! request_timeout = 5
//! max_peers = 50
//!
//! [peer_listener]
//! bind_address = "0.0.0.0:16384"
//! handshake_timeout = 10
//! reply_handshake = true
//!
//! [shutdown]
//! grace_period = 5
//! ```
pub mod canary;
pub mod content;
pub mod core;
pub mod http_tracker;
pub mod logging;
pub mod peer_listener;
pub mod validator;

use std::env;
use std::panic::Location;
use std::time::Duration;

use camino::Utf8PathBuf;
use derive_more::Constructor;
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};
use thiserror::Error;
use validator::{SemanticValidationError, Validator};

pub type Canary = canary::Canary;
pub type Content = content::Content;
pub type Core = core::Core;
pub type HttpTracker = http_tracker::HttpTracker;
pub type Logging = logging::Logging;
pub type LogStyle = logging::Style;
pub type Advertise = core::Advertise;
pub type Network = core::Network;
pub type PeerListener = peer_listener::PeerListener;
pub type SwarmPolicy = core::SwarmPolicy;
pub type Threshold = logging::Threshold;

// Environment variables

/// The whole `canary.toml` file content. It has priority over the config file.
pub const ENV_VAR_CONFIG_TOML: &str = "SWARM_CANARY_CONFIG_TOML";

/// The `canary.toml` file location.
pub const ENV_VAR_CONFIG_TOML_PATH: &str = "SWARM_CANARY_CONFIG_TOML_PATH";

/// Prefix for the environment variables that override single options.
pub const CONFIG_OVERRIDE_PREFIX: &str = "SWARM_CANARY_CONFIG_OVERRIDE_";

/// Separator between nested keys in the override variables.
pub const CONFIG_OVERRIDE_SEPARATOR: &str = "__";

/// Information required for loading config
#[derive(Debug, Default, Clone)]
pub struct Info {
    config_toml: Option<String>,
    config_toml_path: Option<Utf8PathBuf>,
}

impl Info {
    /// Build Configuration Info from the environment.
    ///
    /// An explicit `config_toml_path` wins over the path in
    /// `SWARM_CANARY_CONFIG_TOML_PATH`. A TOML document in
    /// `SWARM_CANARY_CONFIG_TOML` wins over both.
    #[must_use]
    pub fn new(config_toml_path: Option<Utf8PathBuf>) -> Self {
        let config_toml = if let Ok(config_toml) = env::var(ENV_VAR_CONFIG_TOML) {
            println!("Loading configuration from environment variable:\n {config_toml}");
            Some(config_toml)
        } else {
            None
        };

        let config_toml_path = config_toml_path.or_else(|| env::var(ENV_VAR_CONFIG_TOML_PATH).ok().map(Utf8PathBuf::from));

        if config_toml.is_none() {
            if let Some(path) = &config_toml_path {
                println!("Loading configuration from file: `{path}` ...");
            }
        }

        Self {
            config_toml,
            config_toml_path,
        }
    }

    /// Configuration Info holding a whole TOML document.
    #[must_use]
    pub fn from_toml(config_toml: &str) -> Self {
        Self {
            config_toml: Some(config_toml.to_owned()),
            config_toml_path: None,
        }
    }
}

/// Announce policy
#[derive(PartialEq, Eq, Debug, Clone, Copy, Constructor, Serialize, Deserialize)]
pub struct AnnouncePolicy {
    /// Interval in seconds that the client should wait between sending regular
    /// announce requests to the tracker.
    #[serde(default = "AnnouncePolicy::default_interval")]
    pub interval: u32,

    /// Minimum announce interval. Clients must not reannounce more frequently
    /// than this.
    #[serde(default = "AnnouncePolicy::default_interval_min")]
    pub interval_min: u32,
}

impl Default for AnnouncePolicy {
    fn default() -> Self {
        Self {
            interval: Self::default_interval(),
            interval_min: Self::default_interval_min(),
        }
    }
}

impl AnnouncePolicy {
    fn default_interval() -> u32 {
        300
    }

    fn default_interval_min() -> u32 {
        120
    }
}

/// How the running servers are brought down.
#[serde_as]
#[derive(PartialEq, Eq, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Shutdown {
    /// Seconds in-flight requests and handshakes get to finish once the
    /// listening sockets are closed.
    #[serde_as(as = "DurationSeconds<u64>")]
    #[serde(default = "Shutdown::default_grace_period")]
    pub grace_period: Duration,
}

impl Default for Shutdown {
    fn default() -> Self {
        Self {
            grace_period: Self::default_grace_period(),
        }
    }
}

impl Shutdown {
    fn default_grace_period() -> Duration {
        Duration::from_secs(5)
    }
}

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed processing the configuration: {source}, {location}")]
    ConfigError {
        location: &'static Location<'static>,
        source: Box<figment::Error>,
    },

    #[error("Unable to encode the configuration as {format}: {message}, {location}")]
    Encode {
        location: &'static Location<'static>,
        format: &'static str,
        message: String,
    },

    #[error("Invalid configuration: {source}")]
    Invalid {
        #[from]
        source: SemanticValidationError,
    },
}

impl From<figment::Error> for Error {
    #[track_caller]
    fn from(err: figment::Error) -> Self {
        Self::ConfigError {
            location: Location::caller(),
            source: Box::new(err),
        }
    }
}

/// Core configuration for the canary.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Default)]
pub struct Configuration {
    /// Logging configuration
    #[serde(default)]
    pub logging: Logging,

    /// Core configuration.
    #[serde(default)]
    pub core: Core,

    /// What is tracked and who gets told.
    #[serde(default)]
    pub canary: Canary,

    /// The file the tracked hash is computed from.
    #[serde(default)]
    pub content: Content,

    /// The HTTP tracker configuration.
    #[serde(default)]
    pub http_tracker: HttpTracker,

    /// The peer wire listener configuration.
    #[serde(default)]
    pub peer_listener: PeerListener,

    /// Graceful shutdown configuration.
    #[serde(default)]
    pub shutdown: Shutdown,
}

impl Configuration {
    /// Loads the configuration from the `Info` struct.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the TOML document or the override variables
    /// contain a bad configuration.
    pub fn load(info: &Info) -> Result<Configuration, Error> {
        let figment = if let Some(config_toml) = &info.config_toml {
            Figment::from(Toml::string(config_toml))
        } else if let Some(config_toml_path) = &info.config_toml_path {
            Figment::from(Toml::file(config_toml_path))
        } else {
            Figment::new()
        };

        let figment = figment.merge(Env::prefixed(CONFIG_OVERRIDE_PREFIX).split(CONFIG_OVERRIDE_SEPARATOR));

        let config: Configuration = figment.extract()?;

        Ok(config)
    }

    /// Encodes the configuration to TOML.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the configuration cannot be represented in TOML.
    #[track_caller]
    pub fn to_toml(&self) -> Result<String, Error> {
        toml::to_string(self).map_err(|err| Error::Encode {
            location: Location::caller(),
            format: "toml",
            message: err.to_string(),
        })
    }

    /// Encodes the configuration to JSON.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the configuration cannot be represented in JSON.
    #[track_caller]
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|err| Error::Encode {
            location: Location::caller(),
            format: "json",
            message: err.to_string(),
        })
    }
}

impl Validator for Configuration {
    #[track_caller]
    fn validate(&self) -> Result<(), SemanticValidationError> {
        if self.canary.notify_command.split_whitespace().next().is_none() {
            return Err(SemanticValidationError::EmptyCommand {
                location: Location::caller(),
            });
        }

        if self.content.piece_length == 0 {
            return Err(SemanticValidationError::ZeroPieceLength {
                location: Location::caller(),
            });
        }

        let announce_policy = self.core.announce_policy;

        if announce_policy.interval_min > announce_policy.interval {
            return Err(SemanticValidationError::MinIntervalAboveInterval {
                location: Location::caller(),
                interval: announce_policy.interval,
                interval_min: announce_policy.interval_min,
            });
        }

        if self.canary.info_hash.is_none() && self.content.file.is_none() {
            return Err(SemanticValidationError::NothingToTrack {
                location: Location::caller(),
            });
        }

        Ok(())
    }
}
