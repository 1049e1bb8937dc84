//! Setup for the main canary application.
//!
//! The [`setup`] only builds the application and its dependencies but it does
//! not start the application. In fact, there is no such thing as the main
//! application process. When the application starts, the only thing it does
//! is starting a bunch of independent jobs.
//!
//! Setup steps:
//!
//! 1. Load the global application configuration.
//! 2. Initialize static variables.
//! 3. Initialize logging.
//! 4. Resolve the tracked content hash.
//! 5. Initialize the domain canary.
//!
//! [`start`] does it all from the bare parameters of a canary, and runs it
//! until the process gets the shutdown signal.
use std::net::{IpAddr, SocketAddr};
use std::panic::Location;
use std::sync::Arc;

use swarm_canary_clock::static_time;
use swarm_canary_configuration::validator::{SemanticValidationError, Validator};
use swarm_canary_configuration::{Configuration, Info};
use swarm_canary_primitives::info_hash::InfoHash;
use thiserror::Error;
use tracing::{error, info};

use super::logging;
use crate::app;
use crate::core::canary::evaluator::Evaluator;
use crate::core::canary::expected::ExpectedAddresses;
use crate::core::canary::notifier::{CommandNotifier, Notifier};
use crate::core::canary::{Keeper, CANARY_LOG_TARGET};
use crate::core::content::{self, announce_url, build_descriptor, hash_of, parse_info_hash, write_descriptor_file};
use crate::core::Canary;

/// Errors that stop the canary before any server is started.
#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {source}")]
    Configuration {
        #[from]
        source: swarm_canary_configuration::Error,
    },

    #[error("invalid configuration: {source}")]
    Validation {
        #[from]
        source: SemanticValidationError,
    },

    #[error("unable to resolve the tracked hash: {source}")]
    Content {
        #[from]
        source: content::Error,
    },

    #[error("neither an info hash nor a content file was given, {location}")]
    NothingToTrack { location: &'static Location<'static> },

    #[error("unable to start the canary: {source}")]
    Start {
        #[from]
        source: app::Error,
    },
}

/// It runs a canary for `info_hash` until the process gets the shutdown
/// signal.
///
/// The tracker and the peer listener are bound to every interface on the given
/// ports, and `host` is the address advertised for both. Any other option
/// keeps its default value.
///
/// # Errors
///
/// Will return an error if the options are not valid or a server can't be
/// started.
pub async fn start(
    info_hash: InfoHash,
    expected_addresses: Vec<IpAddr>,
    notify_command: &str,
    host: &str,
    tracker_port: u16,
    peer_port: u16,
) -> Result<(), Error> {
    let mut configuration = Configuration::default();

    configuration.canary.info_hash = Some(info_hash.to_hex_string());
    configuration.canary.expected_addresses = expected_addresses;
    configuration.canary.notify_command = notify_command.to_owned();
    configuration.core.net.host = host.to_owned();
    configuration.content.torrent_file = None;
    configuration.http_tracker.bind_address = SocketAddr::new(configuration.http_tracker.bind_address.ip(), tracker_port);
    configuration.peer_listener.bind_address = SocketAddr::new(configuration.peer_listener.bind_address.ip(), peer_port);

    let canary = initialize_with_configuration(&configuration)?;

    run(&configuration, canary).await
}

/// It starts the jobs and waits for them. They stop on the shutdown signal.
///
/// # Errors
///
/// Will return an error if a server can't be started.
pub async fn run(configuration: &Configuration, canary: Arc<Canary>) -> Result<(), Error> {
    let jobs = app::start(configuration, canary).await?;

    for job in futures::future::join_all(jobs).await {
        if let Err(err) = job {
            error!("a canary job failed: {err}");
        }
    }

    info!("Swarm canary successfully shutdown.");

    Ok(())
}

/// It loads the configuration, initializes the static variables and logging,
/// and builds the canary.
///
/// # Errors
///
/// Will return an error if the configuration can't be loaded or validated, or
/// if the tracked hash can't be resolved.
pub fn setup(info: &Info) -> Result<(Configuration, Arc<Canary>), Error> {
    let configuration = Configuration::load(info)?;

    let canary = initialize_with_configuration(&configuration)?;

    Ok((configuration, canary))
}

/// It initializes the application with the given configuration.
///
/// # Errors
///
/// Will return an error if the configuration is not valid or the tracked hash
/// can't be resolved.
pub fn initialize_with_configuration(configuration: &Configuration) -> Result<Arc<Canary>, Error> {
    initialize_static();
    initialize_logging(configuration);

    configuration.validate()?;

    let info_hash = resolve_info_hash(configuration)?;

    Ok(initialize_canary(configuration, info_hash))
}

/// It initializes the application static values.
pub fn initialize_static() {
    // Set the time of the canary app starting
    lazy_static::initialize(&static_time::TIME_AT_APP_START);
}

/// It resolves the content hash of the swarm the canary watches.
///
/// A content file wins over a literal hash. The torrent file for the content
/// is written when a path for it is configured, announcing to the advertised
/// address of the HTTP tracker.
///
/// # Errors
///
/// Will return an error if the content file can't be read, the literal is not
/// a valid hash or neither was given.
#[track_caller]
pub fn resolve_info_hash(configuration: &Configuration) -> Result<InfoHash, Error> {
    let location = Location::caller();

    if let Some(file) = &configuration.content.file {
        let descriptor = build_descriptor(file, configuration.content.piece_length)?;
        let info_hash = hash_of(&descriptor);

        info!(target: CANARY_LOG_TARGET, "Tracking {info_hash} computed from: {file}");

        if let Some(torrent_file) = &configuration.content.torrent_file {
            let host = configuration
                .core
                .net
                .external_ip
                .map_or_else(|| configuration.core.net.host.clone(), |ip| ip.to_string());

            let url = announce_url(&host, configuration.http_tracker.bind_address.port());

            write_descriptor_file(&descriptor, &url, torrent_file);
        }

        return Ok(info_hash);
    }

    if let Some(literal) = &configuration.canary.info_hash {
        let info_hash = parse_info_hash(literal)?;

        info!(target: CANARY_LOG_TARGET, "Tracking {info_hash}");

        return Ok(info_hash);
    }

    Err(Error::NothingToTrack { location })
}

/// It builds the canary, reporting to the operator's notify command.
#[must_use]
pub fn initialize_canary(configuration: &Configuration, info_hash: InfoHash) -> Arc<Canary> {
    let notifier = CommandNotifier::new(&configuration.canary.notify_command, configuration.canary.completion_check_ms);

    initialize_canary_with_notifier(configuration, info_hash, Arc::new(notifier))
}

/// It builds the canary with the given notifier.
///
/// The evaluator is fed from a dedicated task, so the servers never wait for a
/// notification.
#[must_use]
pub fn initialize_canary_with_notifier(
    configuration: &Configuration,
    info_hash: InfoHash,
    notifier: Arc<dyn Notifier>,
) -> Arc<Canary> {
    let evaluator = Arc::new(Evaluator::new(
        expected_addresses(configuration),
        configuration.canary.cooldown,
        notifier,
    ));

    let event_sender = Keeper::new_active_instance(evaluator);

    Arc::new(Canary::new(configuration, info_hash, event_sender))
}

/// The addresses the canary stays quiet for: exactly the configured list.
/// Neither the host nor the external IP is added to it.
#[must_use]
pub fn expected_addresses(configuration: &Configuration) -> ExpectedAddresses {
    ExpectedAddresses::new(configuration.canary.expected_addresses.iter().copied())
}

/// It initializes the log threshold, format and channel.
///
/// See [the logging setup](crate::bootstrap::logging::setup) for more info
/// about logging.
pub fn initialize_logging(configuration: &Configuration) {
    logging::setup(configuration);
}
