//! Module to handle the peer listener instances.
//!
//! Like the HTTP tracker, the listener is a state machine:
//!
//! ```text
//! PeerListener<Stopped> --start--> PeerListener<Running> --stop--> PeerListener<Stopped>
//! ```
//!
//! Every accepted connection is served on its own task. On shutdown the
//! listening socket is closed first, then the open connections get the grace
//! period to finish and the remaining ones are aborted.
use std::net::SocketAddr;
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use derive_more::Constructor;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, info, warn};

use super::handshake::{handle_connection, log_outcome};
use super::PEER_LISTENER_LOG_TARGET;
use crate::core::Canary;
use crate::servers::logging::STARTED_ON;
use crate::servers::signals::{shutdown_signal_with_message, Halted};

/// Pause after a failed `accept`. Errors like running out of file
/// descriptors persist, so retrying at once would spin.
pub const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Error that can occur when starting or stopping the peer listener.
#[derive(Error, Debug)]
pub enum Error {
    #[error("unable to bind to {addr}: {source}, {location}")]
    UnableToBind {
        addr: SocketAddr,
        source: std::io::Error,
        location: &'static Location<'static>,
    },

    #[error("unable to get the local address of the socket bound to {addr}: {source}, {location}")]
    UnableToGetLocalAddress {
        addr: SocketAddr,
        source: std::io::Error,
        location: &'static Location<'static>,
    },

    #[error("unable to send the halt signal to the listener on {addr}, {location}")]
    UnableToSendHaltingMessage {
        addr: SocketAddr,
        location: &'static Location<'static>,
    },

    #[error("the listener task on {addr} failed: {source}, {location}")]
    TaskFailed {
        addr: SocketAddr,
        source: tokio::task::JoinError,
        location: &'static Location<'static>,
    },
}

/// A stopped peer listener.
pub type StoppedPeerListener = PeerListener<Stopped>;

/// A running peer listener.
pub type RunningPeerListener = PeerListener<Running>;

/// A peer listener controller. The state is `running` or `stopped`.
pub struct PeerListener<S> {
    pub state: S,
}

/// A stopped peer listener state.
pub struct Stopped {
    launcher: Launcher,
}

/// A running peer listener state.
pub struct Running {
    /// The address where the listener is bound.
    pub binding: SocketAddr,
    pub halt_task: oneshot::Sender<Halted>,
    pub task: JoinHandle<Launcher>,
}

/// Knows how to run the peer listener with graceful shutdown.
#[derive(Constructor, Clone, Debug)]
pub struct Launcher {
    pub bind_to: SocketAddr,
    pub handshake_timeout: Duration,
    pub reply_handshake: bool,
    pub grace_period: Duration,
}

impl Launcher {
    /// It accepts connections until halted. Then it stops accepting and
    /// waits for the open connections.
    async fn run_with_graceful_shutdown(self, listener: TcpListener, canary: Arc<Canary>, rx_halt: oneshot::Receiver<Halted>) -> Self {
        let binding = listener.local_addr().map_or_else(|_| self.bind_to.to_string(), |addr| addr.to_string());

        let halt = shutdown_signal_with_message(rx_halt, format!("Halting peer listener bound to: {binding}"));
        tokio::pin!(halt);

        let mut connections = JoinSet::new();

        loop {
            tokio::select! {
                () = &mut halt => break,

                accepted = listener.accept() => match accepted {
                    Ok((mut stream, remote)) => {
                        debug!(target: PEER_LISTENER_LOG_TARGET, "connection from {remote}");

                        let canary = canary.clone();
                        let handshake_timeout = self.handshake_timeout;
                        let reply = self.reply_handshake;

                        connections.spawn(async move {
                            let result = handle_connection(canary, &mut stream, remote, handshake_timeout, reply).await;
                            log_outcome(remote, &result);
                        });
                    }
                    Err(err) => back_off_after_accept_error(&binding, &err).await,
                },

                Some(joined) = connections.join_next(), if !connections.is_empty() => {
                    if let Err(err) = joined {
                        warn!(target: PEER_LISTENER_LOG_TARGET, "a connection task failed: {err}");
                    }
                }
            }
        }

        drop(listener);

        if !connections.is_empty() {
            info!(target: PEER_LISTENER_LOG_TARGET, "waiting for {} open connections", connections.len());

            let drained = tokio::time::timeout(self.grace_period, async {
                while connections.join_next().await.is_some() {}
            })
            .await;

            if drained.is_err() {
                warn!(target: PEER_LISTENER_LOG_TARGET, "aborting {} connections after the grace period", connections.len());
                connections.shutdown().await;
            }
        }

        info!(target: PEER_LISTENER_LOG_TARGET, "Stopped listener running on: tcp://{binding}");

        self
    }
}

impl PeerListener<Stopped> {
    #[must_use]
    pub fn new(launcher: Launcher) -> Self {
        Self {
            state: Stopped { launcher },
        }
    }

    /// It binds the socket, records the bound port on the canary so it's the
    /// one advertised, and starts accepting connections.
    ///
    /// # Errors
    ///
    /// It would return an error if the listener can't bind to the configured
    /// address.
    pub async fn start(self, canary: Arc<Canary>) -> Result<PeerListener<Running>, Error> {
        let launcher = self.state.launcher;

        let listener = TcpListener::bind(launcher.bind_to)
            .await
            .map_err(|source| Error::UnableToBind {
                addr: launcher.bind_to,
                source,
                location: Location::caller(),
            })?;

        let binding = listener.local_addr().map_err(|source| Error::UnableToGetLocalAddress {
            addr: launcher.bind_to,
            source,
            location: Location::caller(),
        })?;

        canary.set_listener_port(binding.port());

        info!(target: PEER_LISTENER_LOG_TARGET, "{STARTED_ON}: tcp://{binding}");

        let (tx_halt, rx_halt) = oneshot::channel::<Halted>();

        let task = tokio::spawn(launcher.run_with_graceful_shutdown(listener, canary, rx_halt));

        Ok(PeerListener {
            state: Running {
                binding,
                halt_task: tx_halt,
                task,
            },
        })
    }
}

impl PeerListener<Running> {
    /// It stops the listener and returns a controller in `stopped` state.
    ///
    /// # Errors
    ///
    /// It would return an error if the halt channel is closed or the listener
    /// task failed.
    pub async fn stop(self) -> Result<PeerListener<Stopped>, Error> {
        let addr = self.state.binding;

        self.state
            .halt_task
            .send(Halted::Normal)
            .map_err(|_| Error::UnableToSendHaltingMessage {
                addr,
                location: Location::caller(),
            })?;

        let launcher = self.state.task.await.map_err(|source| Error::TaskFailed {
            addr,
            source,
            location: Location::caller(),
        })?;

        Ok(PeerListener {
            state: Stopped { launcher },
        })
    }
}

async fn back_off_after_accept_error(binding: &str, err: &std::io::Error) {
    warn!(target: PEER_LISTENER_LOG_TARGET, "unable to accept a connection on {binding}: {err}");

    tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
}
