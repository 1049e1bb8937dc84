//! Peer listener job starter.
//!
//! The function [`peer_listener::start_job`](crate::bootstrap::jobs::peer_listener::start_job)
//! starts the listener that answers the peer wire handshake for the tracked
//! hash.
use std::sync::Arc;
use std::time::Duration;

use swarm_canary_configuration::PeerListener as PeerListenerConfig;
use tokio::task::JoinHandle;
use tracing::error;

use crate::core::Canary;
use crate::servers::peer::server::{Error, Launcher, PeerListener};
use crate::servers::peer::PEER_LISTENER_LOG_TARGET;

/// It starts the peer listener with the provided configuration. The bound port
/// is the one the canary advertises from then on.
///
/// # Errors
///
/// It would return an error if the listener can't bind to the configured
/// address.
pub async fn start_job(
    config: &PeerListenerConfig,
    canary: Arc<Canary>,
    grace_period: Duration,
) -> Result<JoinHandle<()>, Error> {
    let listener = PeerListener::new(Launcher::new(
        config.bind_address,
        config.handshake_timeout,
        config.reply_handshake,
        grace_period,
    ))
    .start(canary)
    .await?;

    Ok(tokio::spawn(async move {
        let binding = listener.state.binding;

        if let Err(err) = listener.state.task.await {
            error!(target: PEER_LISTENER_LOG_TARGET, "the peer listener on {binding} failed: {err}");
        }
    }))
}
