//! HTTP tracker job starter.
//!
//! The function [`http_tracker::start_job`](crate::bootstrap::jobs::http_tracker::start_job)
//! starts the HTTP tracker server.
//!
//! The returned job ends once the server has shut down, after the global
//! shutdown signal.
use std::sync::Arc;
use std::time::Duration;

use swarm_canary_configuration::HttpTracker;
use tokio::task::JoinHandle;
use tracing::error;

use crate::core::Canary;
use crate::servers::http::server::{Error, HttpServer, Launcher};
use crate::servers::http::HTTP_TRACKER_LOG_TARGET;

/// It starts a new HTTP tracker with the provided configuration.
///
/// # Errors
///
/// It would return an error if the server can't bind to the configured
/// address.
pub fn start_job(config: &HttpTracker, canary: Arc<Canary>, grace_period: Duration) -> Result<JoinHandle<()>, Error> {
    let server = HttpServer::new(Launcher::new(config.bind_address, config.request_timeout, grace_period)).start(canary)?;

    Ok(tokio::spawn(async move {
        let binding = server.state.binding;

        if let Err(err) = server.state.task.await {
            error!(target: HTTP_TRACKER_LOG_TARGET, "the HTTP tracker on {binding} failed: {err}");
        }
    }))
}
