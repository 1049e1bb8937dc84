//! Module to handle the HTTP server instances.
//!
//! The server is a state machine:
//!
//! ```text
//! HttpServer<Stopped> --start--> HttpServer<Running> --stop--> HttpServer<Stopped>
//! ```
//!
//! The configuration is kept by the [`Launcher`], so a stopped server can be
//! started again on the same address.
use std::net::SocketAddr;
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use derive_more::Constructor;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::connection::LocalAddrAcceptor;
use super::v1::routes::router;
use super::HTTP_TRACKER_LOG_TARGET;
use crate::core::Canary;
use crate::servers::logging::STARTED_ON;
use crate::servers::signals::{graceful_shutdown, Halted};

/// Error that can occur when starting or stopping the HTTP server.
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

    #[error("unable to send the halt signal to the server running on {addr}, {location}")]
    UnableToSendHaltingMessage {
        addr: SocketAddr,
        location: &'static Location<'static>,
    },

    #[error("the server task running on {addr} failed: {source}, {location}")]
    TaskFailed {
        addr: SocketAddr,
        source: tokio::task::JoinError,
        location: &'static Location<'static>,
    },
}

/// A stopped HTTP server.
#[allow(clippy::module_name_repetitions)]
pub type StoppedHttpServer = HttpServer<Stopped>;

/// A running HTTP server.
#[allow(clippy::module_name_repetitions)]
pub type RunningHttpServer = HttpServer<Running>;

/// A HTTP server controller. The state is `running` or `stopped`.
#[allow(clippy::module_name_repetitions)]
pub struct HttpServer<S> {
    pub state: S,
}

/// A stopped HTTP server state.
pub struct Stopped {
    launcher: Launcher,
}

/// A running HTTP server state.
pub struct Running {
    /// The address where the server is bound.
    pub binding: SocketAddr,
    pub halt_task: oneshot::Sender<Halted>,
    pub task: JoinHandle<Launcher>,
}

/// Knows how to run the HTTP tracker with graceful shutdown.
#[derive(Constructor, Clone, Debug)]
pub struct Launcher {
    pub bind_to: SocketAddr,
    pub request_timeout: Duration,
    pub grace_period: Duration,
}

impl Launcher {
    /// It binds the socket and spawns the server. The returned task ends once
    /// the server has shut down, giving the launcher back.
    #[track_caller]
    fn start(self, canary: Arc<Canary>, rx_halt: oneshot::Receiver<Halted>) -> Result<(SocketAddr, JoinHandle<Launcher>), Error> {
        let location = Location::caller();

        let listener = std::net::TcpListener::bind(self.bind_to).map_err(|source| Error::UnableToBind {
            addr: self.bind_to,
            source,
            location,
        })?;

        let binding = listener.local_addr().map_err(|source| Error::UnableToGetLocalAddress {
            addr: self.bind_to,
            source,
            location,
        })?;

        listener.set_nonblocking(true).map_err(|source| Error::UnableToBind {
            addr: self.bind_to,
            source,
            location,
        })?;

        let handle = axum_server::Handle::new();

        tokio::task::spawn(graceful_shutdown(
            handle.clone(),
            rx_halt,
            format!("Shutting down HTTP server on socket address: {binding}"),
            self.grace_period,
        ));

        let make_service = router(canary, &binding, self.request_timeout).into_make_service_with_connect_info::<SocketAddr>();

        let task = tokio::task::spawn(async move {
            info!(target: HTTP_TRACKER_LOG_TARGET, "{STARTED_ON}: http://{binding}");

            if let Err(err) = axum_server::from_tcp(listener)
                .acceptor(LocalAddrAcceptor)
                .handle(handle)
                .serve(make_service)
                .await
            {
                error!(target: HTTP_TRACKER_LOG_TARGET, "the server on {binding} stopped with an error: {err}");
            }

            info!(target: HTTP_TRACKER_LOG_TARGET, "Stopped server running on: http://{binding}");

            self
        });

        Ok((binding, task))
    }
}

impl HttpServer<Stopped> {
    #[must_use]
    pub fn new(launcher: Launcher) -> Self {
        Self {
            state: Stopped { launcher },
        }
    }

    /// It starts the server and returns a `HttpServer` controller in `running`
    /// state.
    ///
    /// # Errors
    ///
    /// It would return an error if the server can't bind to the configured
    /// address.
    pub fn start(self, canary: Arc<Canary>) -> Result<HttpServer<Running>, Error> {
        let (tx_halt, rx_halt) = oneshot::channel::<Halted>();

        let (binding, task) = self.state.launcher.start(canary, rx_halt)?;

        Ok(HttpServer {
            state: Running {
                binding,
                halt_task: tx_halt,
                task,
            },
        })
    }
}

impl HttpServer<Running> {
    /// It stops the server and returns a `HttpServer` controller in `stopped`
    /// state. Open connections get the configured grace period to finish.
    ///
    /// # Errors
    ///
    /// It would return an error if the halt channel is closed or the server
    /// task failed.
    pub async fn stop(self) -> Result<HttpServer<Stopped>, Error> {
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

        Ok(HttpServer {
            state: Stopped { launcher },
        })
    }
}
