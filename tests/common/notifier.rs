use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use swarm_canary::core::canary::notifier::{Error, Notifier, Outcome};
use tokio::sync::mpsc;

/// A notifier that records the notified addresses instead of running a
/// command.
pub struct RecordingNotifier {
    sender: mpsc::UnboundedSender<IpAddr>,
}

/// The addresses notified by a [`RecordingNotifier`].
pub struct Notifications {
    receiver: mpsc::UnboundedReceiver<IpAddr>,
}

impl RecordingNotifier {
    pub fn new() -> (Self, Notifications) {
        let (sender, receiver) = mpsc::unbounded_channel();

        (Self { sender }, Notifications { receiver })
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, ip: IpAddr) -> Result<Outcome, Error> {
        // The test may be over already.
        let _ = self.sender.send(ip);

        Ok(Outcome::StillRunning)
    }
}

impl Notifications {
    /// Waits for the next notification, for one second at most.
    pub async fn next(&mut self) -> Option<IpAddr> {
        tokio::time::timeout(Duration::from_secs(1), self.receiver.recv())
            .await
            .ok()
            .flatten()
    }

    /// Waits a moment and tells whether nothing was notified in between.
    pub async fn is_quiet(&mut self) -> bool {
        tokio::time::timeout(Duration::from_millis(300), self.receiver.recv())
            .await
            .is_err()
    }
}
