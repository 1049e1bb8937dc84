use std::net::SocketAddr;
use std::sync::Arc;

use swarm_canary::bootstrap::app::{initialize_canary_with_notifier, resolve_info_hash};
use swarm_canary::core::Canary;
use swarm_canary::servers::http::server::{self as http_server, HttpServer};
use swarm_canary::servers::peer::server::{self as peer_server, PeerListener};
use swarm_canary_configuration::Configuration;

use crate::common::notifier::{Notifications, RecordingNotifier};

/// A running canary: the HTTP tracker and the peer listener sharing one
/// canary that records its notifications.
pub struct Environment {
    pub config: Arc<Configuration>,
    pub canary: Arc<Canary>,
    pub notifications: Notifications,
    pub http_tracker: HttpServer<http_server::Running>,
    pub peer_listener: PeerListener<peer_server::Running>,
}

impl Environment {
    pub async fn new(configuration: Configuration) -> Self {
        let config = Arc::new(configuration);

        let (notifier, notifications) = RecordingNotifier::new();

        let info_hash = resolve_info_hash(&config).expect("the test configuration should track a valid hash");
        let canary = initialize_canary_with_notifier(&config, info_hash, Arc::new(notifier));

        let peer_listener = PeerListener::new(peer_server::Launcher::new(
            config.peer_listener.bind_address,
            config.peer_listener.handshake_timeout,
            config.peer_listener.reply_handshake,
            config.shutdown.grace_period,
        ))
        .start(canary.clone())
        .await
        .expect("it should start the peer listener");

        let http_tracker = HttpServer::new(http_server::Launcher::new(
            config.http_tracker.bind_address,
            config.http_tracker.request_timeout,
            config.shutdown.grace_period,
        ))
        .start(canary.clone())
        .expect("it should start the HTTP tracker");

        Self {
            config,
            canary,
            notifications,
            http_tracker,
            peer_listener,
        }
    }

    pub fn tracker_address(&self) -> SocketAddr {
        self.http_tracker.state.binding
    }

    pub fn listener_address(&self) -> SocketAddr {
        self.peer_listener.state.binding
    }

    pub async fn stop(self) {
        self.http_tracker.stop().await.expect("it should stop the HTTP tracker");
        self.peer_listener.stop().await.expect("it should stop the peer listener");
    }
}
