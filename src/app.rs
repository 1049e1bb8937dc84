//! Swarm canary application.
//!
//! The application is a container for the jobs that share one
//! [`Canary`](crate::core::Canary):
//!
//! - Peer listener: answers the peer wire handshake for the tracked hash.
//! - HTTP tracker: answers the announces for the tracked hash.
//!
//! There is no cleanup job: inactive peers are expired whenever the swarm is
//! read or written.
//!
//! The peer listener is started first, so the port it was bound to is the one
//! the tracker advertises from the first announce on.
use std::sync::Arc;

use swarm_canary_configuration::Configuration;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::bootstrap::jobs::{http_tracker, peer_listener};
use crate::core::Canary;
use crate::servers;

/// A server that could not be started.
#[derive(Error, Debug)]
pub enum Error {
    #[error("unable to start the peer listener: {source}")]
    PeerListener {
        #[from]
        source: servers::peer::server::Error,
    },

    #[error("unable to start the HTTP tracker: {source}")]
    HttpTracker {
        #[from]
        source: servers::http::server::Error,
    },
}

/// It starts every job of the application.
///
/// # Errors
///
/// Will return an error if any of the servers can't be started. The jobs
/// already started are aborted then.
pub async fn start(config: &Configuration, canary: Arc<Canary>) -> Result<Vec<JoinHandle<()>>, Error> {
    let mut jobs: Vec<JoinHandle<()>> = Vec::new();

    let grace_period = config.shutdown.grace_period;

    // Start the peer listener
    jobs.push(peer_listener::start_job(&config.peer_listener, canary.clone(), grace_period).await?);

    // Start the HTTP tracker
    match http_tracker::start_job(&config.http_tracker, canary, grace_period) {
        Ok(job) => jobs.push(job),
        Err(err) => {
            jobs.iter().for_each(JoinHandle::abort);
            return Err(err.into());
        }
    }

    Ok(jobs)
}
